//! Retrospective insights derived from the full ledger history.
//!
//! Everything here is computed fresh per request and never stored. The
//! engine tolerates entries missing optional fields — an absent energy tag
//! simply drops that entry from the energy statistic, it never errors.

use chrono::Timelike;
use serde::Serialize;

use stride_core::HistoryEntry;

/// Coarse time-of-day buckets for session timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    /// Fixed iteration order; ties between equal counts resolve to the
    /// earliest period in this list.
    pub const ALL: [DayPeriod; 4] = [
        DayPeriod::Morning,
        DayPeriod::Afternoon,
        DayPeriod::Evening,
        DayPeriod::Night,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => DayPeriod::Morning,
            12..=16 => DayPeriod::Afternoon,
            17..=21 => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "Morning",
            DayPeriod::Afternoon => "Afternoon",
            DayPeriod::Evening => "Evening",
            DayPeriod::Night => "Night",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }
}

/// Aggregate report over the full history. Ephemeral — never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum InsightSummary {
    InsufficientData { message: String },
    Report(InsightReport),
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightReport {
    pub best_period: String,
    pub best_period_count: usize,
    pub best_energy: String,
    /// Completion rate of the best energy group, as a percentage.
    pub best_energy_rate: f64,
    pub total_sessions: usize,
    pub insights: Vec<String>,
}

pub struct InsightEngine;

impl InsightEngine {
    /// Derive the summary from the full entry set. Total over its input:
    /// an empty set yields the "not enough data" marker, never an error.
    pub fn summarize(entries: &[HistoryEntry]) -> InsightSummary {
        if entries.is_empty() {
            return InsightSummary::InsufficientData {
                message: "Not enough data yet.".to_string(),
            };
        }

        let (best_period, best_period_count) = best_period(entries);
        let (best_energy, best_energy_rate) = best_energy(entries);
        let total_sessions = entries.len();

        let mut insights = Vec::new();
        insights.push(format!(
            "🧠 You are most active in the **{}** ({} sessions).",
            best_period.as_str(),
            best_period_count
        ));
        if best_energy != "Unknown" && best_energy_rate > 0.0 {
            insights.push(format!(
                "⚡ You have a {:.0}% success rate when your energy is **{}**.",
                best_energy_rate, best_energy
            ));
        }
        if total_sessions > 5 {
            insights.push(format!(
                "📊 You've logged {} total sessions. Consistent tracking builds data accuracy!",
                total_sessions
            ));
        } else {
            insights.push("💡 Keep logging tasks to unlock deeper insights.".to_string());
        }

        tracing::debug!("Summarized {} sessions into {} insights", total_sessions, insights.len());
        InsightSummary::Report(InsightReport {
            best_period: best_period.as_str().to_string(),
            best_period_count,
            best_energy,
            best_energy_rate,
            total_sessions,
            insights,
        })
    }
}

/// Tally sessions per day period; the earliest period in `DayPeriod::ALL`
/// wins ties.
fn best_period(entries: &[HistoryEntry]) -> (DayPeriod, usize) {
    let mut counts = [0usize; 4];
    for entry in entries {
        counts[DayPeriod::from_hour(entry.timestamp.hour()).index()] += 1;
    }

    let mut best = DayPeriod::Morning;
    let mut best_count = 0;
    for period in DayPeriod::ALL {
        if counts[period.index()] > best_count {
            best = period;
            best_count = counts[period.index()];
        }
    }
    (best, best_count)
}

/// Group by energy tag and pick the group with the highest completion
/// fraction. Groups are kept in first-encounter order so ties are broken
/// deterministically; entries without a tag are skipped. No groups at all
/// yields ("Unknown", 0).
fn best_energy(entries: &[HistoryEntry]) -> (String, f64) {
    let mut groups: Vec<(String, usize, usize)> = Vec::new(); // (tag, completed, total)
    for entry in entries {
        let Some(tag) = &entry.energy_level else {
            continue;
        };
        match groups.iter_mut().find(|(t, _, _)| t == tag) {
            Some((_, completed, total)) => {
                *total += 1;
                if entry.completed {
                    *completed += 1;
                }
            }
            None => groups.push((tag.clone(), entry.completed as usize, 1)),
        }
    }

    let mut best: Option<(&str, f64)> = None;
    for (tag, completed, total) in &groups {
        let rate = *completed as f64 / *total as f64 * 100.0;
        if best.map_or(true, |(_, r)| rate > r) {
            best = Some((tag.as_str(), rate));
        }
    }
    match best {
        Some((tag, rate)) => (tag.to_string(), rate),
        None => ("Unknown".to_string(), 0.0),
    }
}
