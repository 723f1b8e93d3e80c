//! Append-only ledger of plan-generation events.
//!
//! Entries are immutable after append except for the completion fields.
//! IDs are 1-based and strictly increasing in insertion order; nothing is
//! ever reordered or individually deleted — only a full clear. Every
//! mutation holds the write lock for its whole read-modify-persist step, so
//! concurrent appends can never reuse an id. Reads clone a snapshot under
//! the read lock.

use anyhow::Result;
use chrono::{Duration, Local};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::store::StateStore;
use stride_core::{HistoryEntry, TaskPlan};

pub struct ProgressLedger {
    entries: RwLock<Vec<HistoryEntry>>,
    store: Arc<dyn StateStore<Vec<HistoryEntry>>>,
}

impl ProgressLedger {
    /// Open the ledger, loading whatever the store holds. An unreadable
    /// store yields an empty ledger rather than an error.
    pub async fn open(store: Arc<dyn StateStore<Vec<HistoryEntry>>>) -> Self {
        let entries = store.load().await;
        tracing::debug!("Ledger opened with {} entries", entries.len());
        Self {
            entries: RwLock::new(entries),
            store,
        }
    }

    /// Append a new entry and persist before returning it.
    pub async fn append(
        &self,
        user_query: &str,
        generated_plan: Vec<TaskPlan>,
        energy_level: &str,
    ) -> Result<HistoryEntry> {
        let mut entries = self.entries.write().await;

        let entry = HistoryEntry {
            id: entries.len() as u64 + 1,
            timestamp: Local::now(),
            user_query: user_query.to_string(),
            energy_level: Some(energy_level.to_string()),
            generated_plan,
            completed: false,
            completed_at: None,
        };
        entries.push(entry.clone());
        self.store.save(&entries).await?;

        tracing::info!("Appended ledger entry {}", entry.id);
        Ok(entry)
    }

    /// Full history in insertion order, or only the last `limit` entries.
    pub async fn get_all(&self, limit: Option<usize>) -> Vec<HistoryEntry> {
        let entries = self.entries.read().await;
        match limit {
            Some(n) => entries.iter().rev().take(n).rev().cloned().collect(),
            None => entries.clone(),
        }
    }

    pub async fn get_by_id(&self, id: u64) -> Option<HistoryEntry> {
        let entries = self.entries.read().await;
        entries.iter().find(|e| e.id == id).cloned()
    }

    /// Mark an entry completed. Returns false (without persisting) when the
    /// id doesn't exist. Repeat calls return true and re-stamp
    /// `completed_at` with the current time.
    pub async fn mark_completed(&self, id: u64) -> Result<bool> {
        let mut entries = self.entries.write().await;

        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        entry.completed = true;
        entry.completed_at = Some(Local::now());

        self.store.save(&entries).await?;
        tracing::info!("Marked ledger entry {} completed", id);
        Ok(true)
    }

    /// Case-insensitive substring match over `user_query`, insertion order.
    pub async fn search(&self, query: &str) -> Vec<HistoryEntry> {
        let needle = query.to_lowercase();
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|e| e.user_query.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Entries strictly newer than `window_days` ago.
    pub async fn recent(&self, window_days: i64) -> Vec<HistoryEntry> {
        let cutoff = Local::now() - Duration::days(window_days);
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|e| e.timestamp > cutoff)
            .cloned()
            .collect()
    }

    /// Empty the ledger and persist the empty state.
    pub async fn clear(&self) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.clear();
        self.store.save(&entries).await?;
        tracing::info!("Ledger cleared");
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    async fn fresh_ledger() -> ProgressLedger {
        ProgressLedger::open(Arc::new(MemoryStore::new())).await
    }

    fn plan(task: &str) -> Vec<TaskPlan> {
        vec![TaskPlan {
            task: task.to_string(),
            steps: vec!["step one".into(), "step two".into()],
        }]
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let ledger = fresh_ledger().await;
        for i in 1..=5u64 {
            let entry = ledger.append("write report", plan("report"), "high").await.unwrap();
            assert_eq!(entry.id, i);
        }
        let all = ledger.get_all(None).await;
        assert_eq!(all.len(), 5);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_get_all_limit_returns_tail_in_order() {
        let ledger = fresh_ledger().await;
        for i in 0..4 {
            ledger
                .append(&format!("task {}", i), plan("t"), "medium")
                .await
                .unwrap();
        }
        let tail = ledger.get_all(Some(2)).await;
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].id, 3);
        assert_eq!(tail[1].id, 4);

        // Limit larger than the ledger just returns everything
        assert_eq!(ledger.get_all(Some(100)).await.len(), 4);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let ledger = fresh_ledger().await;
        ledger.append("clean desk", plan("desk"), "low").await.unwrap();
        assert!(ledger.get_by_id(1).await.is_some());
        assert!(ledger.get_by_id(99).await.is_none());
    }

    #[tokio::test]
    async fn test_mark_completed() {
        let ledger = fresh_ledger().await;
        ledger.append("pay bills", plan("bills"), "medium").await.unwrap();

        assert!(ledger.mark_completed(1).await.unwrap());
        let entry = ledger.get_by_id(1).await.unwrap();
        assert!(entry.completed);
        assert!(entry.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_mark_completed_missing_id_leaves_ledger_unchanged() {
        let ledger = fresh_ledger().await;
        ledger.append("pay bills", plan("bills"), "medium").await.unwrap();

        assert!(!ledger.mark_completed(42).await.unwrap());
        let entry = ledger.get_by_id(1).await.unwrap();
        assert!(!entry.completed);
        assert!(entry.completed_at.is_none());
    }

    #[tokio::test]
    async fn test_mark_completed_is_repeat_safe() {
        let ledger = fresh_ledger().await;
        ledger.append("pay bills", plan("bills"), "medium").await.unwrap();

        assert!(ledger.mark_completed(1).await.unwrap());
        assert!(ledger.mark_completed(1).await.unwrap());
        assert_eq!(ledger.len().await, 1);
        assert!(ledger.get_by_id(1).await.unwrap().completed);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_ordered() {
        let ledger = fresh_ledger().await;
        ledger.append("Write the Report", plan("a"), "high").await.unwrap();
        ledger.append("go for a run", plan("b"), "low").await.unwrap();
        ledger.append("edit report draft", plan("c"), "medium").await.unwrap();

        let hits = ledger.search("REPORT").await;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, 1);
        assert_eq!(hits[1].id, 3);

        assert!(ledger.search("nothing matches this").await.is_empty());
    }

    #[tokio::test]
    async fn test_recent_window() {
        let ledger = fresh_ledger().await;
        ledger.append("today's task", plan("t"), "medium").await.unwrap();
        // Freshly appended entries are within any positive window,
        // and outside a zero-day window only by sub-second margins — so
        // check the positive case and the far-past cutoff.
        assert_eq!(ledger.recent(7).await.len(), 1);
        assert_eq!(ledger.recent(3650).await.len(), 1);
    }

    #[tokio::test]
    async fn test_clear_then_ids_restart() {
        let ledger = fresh_ledger().await;
        ledger.append("one", plan("1"), "medium").await.unwrap();
        ledger.append("two", plan("2"), "medium").await.unwrap();

        ledger.clear().await.unwrap();
        assert!(ledger.is_empty().await);

        let entry = ledger.append("fresh start", plan("3"), "medium").await.unwrap();
        assert_eq!(entry.id, 1);
    }
}
