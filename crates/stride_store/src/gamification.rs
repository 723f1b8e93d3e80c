//! XP, level, and daily-streak state machine.
//!
//! One singleton record, mutated in place and persisted on every award.
//! Level is always recomputed from XP so the two can never drift apart.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::store::StateStore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GamificationRecord {
    pub xp: i64,
    pub level: i64,
    pub streak: u32,
    pub last_active: Option<NaiveDate>,
}

impl Default for GamificationRecord {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            streak: 0,
            last_active: None,
        }
    }
}

impl GamificationRecord {
    /// Level derived from XP: 1 + xp / 100. XP never goes negative, so the
    /// level is always ≥ 1.
    pub fn level_for(xp: i64) -> i64 {
        1 + xp / 100
    }
}

/// Result of an XP award.
#[derive(Debug, Clone, Serialize)]
pub struct XpAward {
    pub xp: i64,
    pub level: i64,
    pub leveled_up: bool,
}

pub struct GamificationState {
    record: RwLock<GamificationRecord>,
    store: Arc<dyn StateStore<GamificationRecord>>,
}

impl GamificationState {
    /// Open the state, degrading to a fresh record if the store is unreadable.
    pub async fn open(store: Arc<dyn StateStore<GamificationRecord>>) -> Self {
        let record = store.load().await;
        Self {
            record: RwLock::new(record),
            store,
        }
    }

    /// Award XP (negative amounts are accepted; the accumulator saturates
    /// at zero), recompute the level, run the streak check for today, and
    /// persist.
    pub async fn add_xp(&self, amount: i64) -> Result<XpAward> {
        self.add_xp_at(amount, Local::now().date_naive()).await
    }

    /// Like [`add_xp`](Self::add_xp) with an explicit "today" for testability.
    pub async fn add_xp_at(&self, amount: i64, today: NaiveDate) -> Result<XpAward> {
        let mut record = self.record.write().await;

        record.xp = (record.xp + amount).max(0);
        let new_level = GamificationRecord::level_for(record.xp);
        let leveled_up = new_level > record.level;
        record.level = new_level;

        apply_streak(&mut record, today);
        self.store.save(&record).await?;

        if leveled_up {
            tracing::info!("Leveled up to {}", record.level);
        }
        Ok(XpAward {
            xp: record.xp,
            level: record.level,
            leveled_up,
        })
    }

    /// Run the daily-streak transition for `today` and persist if anything
    /// changed. Same-day repeat calls are no-ops.
    pub async fn check_streak(&self, today: NaiveDate) -> Result<()> {
        let mut record = self.record.write().await;
        if apply_streak(&mut record, today) {
            self.store.save(&record).await?;
        }
        Ok(())
    }

    /// Read-only snapshot of the current record.
    pub async fn stats(&self) -> GamificationRecord {
        self.record.read().await.clone()
    }
}

/// Streak transition. Returns whether the record changed.
///
/// Consecutive-day activity increments the streak; a gap of more than one
/// day resets it to 1, as does a backwards clock jump.
fn apply_streak(record: &mut GamificationRecord, today: NaiveDate) -> bool {
    match record.last_active {
        Some(last) if last == today => false,
        Some(last) => {
            let delta = (today - last).num_days();
            if delta == 1 {
                record.streak += 1;
            } else {
                record.streak = 1;
            }
            record.last_active = Some(today);
            true
        }
        None => {
            record.streak = 1;
            record.last_active = Some(today);
            true
        }
    }
}
