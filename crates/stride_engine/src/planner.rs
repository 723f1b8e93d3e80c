//! Plan-generation orchestration.
//!
//! One request flows: classify mood from polarity → suggest a scheduling
//! slot → decompose each split task under the mood instruction → append the
//! resulting plan to the ledger. Gamification is awarded separately by the
//! caller on explicit events.

use anyhow::Result;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::Arc;

use crate::decompose::{decompose_with_retry, Decomposer};
use crate::split::split_tasks;
use stride_core::energy::{Difficulty, TimeEnergyModel};
use stride_core::mood::{classify, Mood};
use stride_core::TaskPlan;
use stride_store::ProgressLedger;

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Anti-overwhelm cap on tasks per request.
    pub max_tasks: usize,
    /// Attempts per task before falling back to the static steps.
    pub max_attempts: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_tasks: 3,
            max_attempts: 3,
        }
    }
}

/// Everything a caller needs to render one generated plan.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPlan {
    pub entry_id: u64,
    pub mood: Mood,
    pub plan: Vec<TaskPlan>,
    pub suggested_time: DateTime<Local>,
    pub reason: String,
}

pub struct Planner {
    decomposer: Arc<dyn Decomposer>,
    ledger: Arc<ProgressLedger>,
    energy: TimeEnergyModel,
    config: PlannerConfig,
}

impl Planner {
    pub fn new(
        decomposer: Arc<dyn Decomposer>,
        ledger: Arc<ProgressLedger>,
        energy: TimeEnergyModel,
    ) -> Self {
        Self {
            decomposer,
            ledger,
            energy,
            config: PlannerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate a plan for free-text input and record it in the ledger.
    ///
    /// `polarity` comes from whatever sentiment analyzer the caller uses;
    /// `energy_level` is the caller-supplied tag stored with the entry.
    pub async fn generate_plan(
        &self,
        input: &str,
        energy_level: &str,
        polarity: f32,
        difficulty: Difficulty,
        now: DateTime<Local>,
    ) -> Result<GeneratedPlan> {
        let reading = classify(polarity);
        let slot = self.energy.suggest_slot(difficulty, now);

        let mut tasks = split_tasks(input);
        tasks.truncate(self.config.max_tasks);
        tracing::info!(
            "Planning {} task(s), mood {}, suggested slot {}",
            tasks.len(),
            reading.mood.as_str(),
            slot.suggested_time.format("%I:%M %p")
        );

        let mut plan = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let steps = decompose_with_retry(
                self.decomposer.as_ref(),
                task,
                reading.instruction,
                self.config.max_attempts,
            )
            .await;
            plan.push(TaskPlan {
                task: task.clone(),
                steps,
            });
        }

        let entry = self.ledger.append(input, plan.clone(), energy_level).await?;

        Ok(GeneratedPlan {
            entry_id: entry.id,
            mood: reading.mood,
            plan,
            suggested_time: slot.suggested_time,
            reason: slot.reason,
        })
    }
}

// ============================================================================
// Step walking
// ============================================================================

/// A view onto one step of a task's plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepView {
    pub task: String,
    pub current_step: String,
    pub next_step_index: usize,
    pub total_steps: usize,
}

/// Advance through a plan's steps; past the end, report completion and stop
/// advancing the index.
pub fn next_step(task: &str, steps: &[String], step_index: usize) -> StepView {
    if step_index >= steps.len() {
        return StepView {
            task: task.to_string(),
            current_step: "🎉 Task completed. Take a short break.".to_string(),
            next_step_index: step_index,
            total_steps: steps.len(),
        };
    }

    StepView {
        task: task.to_string(),
        current_step: steps[step_index].clone(),
        next_step_index: step_index + 1,
        total_steps: steps.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decompose::{DecomposeError, MockDecomposer, FALLBACK_STEPS};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use stride_store::MemoryStore;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap()
    }

    async fn planner_with_mock() -> Planner {
        let ledger = Arc::new(ProgressLedger::open(Arc::new(MemoryStore::new())).await);
        Planner::new(Arc::new(MockDecomposer), ledger, TimeEnergyModel::default())
    }

    #[tokio::test]
    async fn test_generate_plan_appends_to_ledger() {
        let ledger = Arc::new(ProgressLedger::open(Arc::new(MemoryStore::new())).await);
        let planner = Planner::new(
            Arc::new(MockDecomposer),
            ledger.clone(),
            TimeEnergyModel::default(),
        );

        let generated = planner
            .generate_plan("write report", "high", 0.0, Difficulty::Medium, noon())
            .await
            .unwrap();

        assert_eq!(generated.entry_id, 1);
        assert_eq!(generated.mood, Mood::Neutral);
        assert_eq!(generated.plan.len(), 1);
        assert!(!generated.plan[0].steps.is_empty());

        let entry = ledger.get_by_id(1).await.unwrap();
        assert_eq!(entry.user_query, "write report");
        assert_eq!(entry.energy_level.as_deref(), Some("high"));
        assert_eq!(entry.generated_plan, generated.plan);
    }

    #[tokio::test]
    async fn test_task_cap_limits_plan() {
        let planner = planner_with_mock().await;
        let generated = planner
            .generate_plan(
                "one, two, three, four, five",
                "medium",
                0.0,
                Difficulty::Easy,
                noon(),
            )
            .await
            .unwrap();
        assert_eq!(generated.plan.len(), 3);
        assert_eq!(generated.plan[0].task, "one");
        assert_eq!(generated.plan[2].task, "three");
    }

    #[tokio::test]
    async fn test_mood_flows_from_polarity() {
        let planner = planner_with_mock().await;
        let stressed = planner
            .generate_plan("everything", "low", -0.8, Difficulty::Easy, noon())
            .await
            .unwrap();
        assert_eq!(stressed.mood, Mood::Stressed);

        let excited = planner
            .generate_plan("everything", "high", 0.8, Difficulty::Hard, noon())
            .await
            .unwrap();
        assert_eq!(excited.mood, Mood::Excited);
    }

    struct BrokenDecomposer;

    #[async_trait]
    impl Decomposer for BrokenDecomposer {
        async fn decompose(
            &self,
            _task: &str,
            _instruction: &str,
        ) -> Result<Vec<String>, DecomposeError> {
            Err(DecomposeError::Transient("backend down".into()))
        }
    }

    #[tokio::test]
    async fn test_broken_decomposer_still_yields_a_plan() {
        let ledger = Arc::new(ProgressLedger::open(Arc::new(MemoryStore::new())).await);
        let planner = Planner::new(
            Arc::new(BrokenDecomposer),
            ledger,
            TimeEnergyModel::default(),
        );
        let generated = planner
            .generate_plan("write report", "medium", 0.0, Difficulty::Medium, noon())
            .await
            .unwrap();
        assert_eq!(
            generated.plan[0].steps,
            FALLBACK_STEPS.map(String::from).to_vec()
        );
    }

    #[test]
    fn test_next_step_walks_and_terminates() {
        let steps = vec!["outline".to_string(), "draft".to_string()];

        let first = next_step("report", &steps, 0);
        assert_eq!(first.current_step, "outline");
        assert_eq!(first.next_step_index, 1);
        assert_eq!(first.total_steps, 2);

        let second = next_step("report", &steps, first.next_step_index);
        assert_eq!(second.current_step, "draft");
        assert_eq!(second.next_step_index, 2);

        let done = next_step("report", &steps, second.next_step_index);
        assert!(done.current_step.contains("Task completed"));
        assert_eq!(done.next_step_index, 2);
    }
}
