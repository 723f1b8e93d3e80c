//! Time-of-day energy model and greedy slot suggestion.
//!
//! Maps wall-clock hours to qualitative energy tiers via configured peak and
//! slump windows, and scans forward for the nearest hour whose tier suits a
//! task's difficulty. This is a nearest-match search, not an optimal
//! assignment — ties go to the earliest time.

use chrono::{DateTime, Duration, Local, Timelike};
use serde::{Deserialize, Serialize};

use crate::config::EnergyConfig;

/// Qualitative label for expected cognitive capacity at a given hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnergyTier {
    High,
    Medium,
    Low,
}

impl EnergyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyTier::High => "high",
            EnergyTier::Medium => "medium",
            EnergyTier::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Hard,
    Medium,
    Easy,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Hard => "hard",
            Difficulty::Medium => "medium",
            Difficulty::Easy => "easy",
        }
    }

    /// Lenient parse; unrecognized input falls back to Medium.
    pub fn parse_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "hard" => Difficulty::Hard,
            "easy" => Difficulty::Easy,
            _ => Difficulty::Medium,
        }
    }
}

/// A suggested scheduling slot and the reason it was chosen.
#[derive(Debug, Clone, Serialize)]
pub struct SlotSuggestion {
    pub suggested_time: DateTime<Local>,
    pub reason: String,
}

const REASON_PEAK: &str = "This is your peak energy time.";
const REASON_BALANCED: &str = "Balanced energy time.";
const REASON_LOW_EFFORT: &str = "Good time for low-effort tasks.";
const REASON_FALLBACK: &str = "No perfect slot found soon, start now.";

/// Hour-to-tier mapping over configured peak/slump windows.
///
/// Windows are half-open `[start, end)` intervals in 24-hour local time.
/// Peaks are checked before slumps, each list in configured order, first
/// match wins — so an hour listed in both resolves to the peak tier.
#[derive(Debug, Clone)]
pub struct TimeEnergyModel {
    pub peak_hours: Vec<(u32, u32)>,
    pub slump_hours: Vec<(u32, u32)>,
}

impl Default for TimeEnergyModel {
    fn default() -> Self {
        let cfg = EnergyConfig::default();
        Self::from_config(&cfg)
    }
}

impl TimeEnergyModel {
    pub fn from_config(cfg: &EnergyConfig) -> Self {
        Self {
            peak_hours: cfg.peak_hours.clone(),
            slump_hours: cfg.slump_hours.clone(),
        }
    }

    /// Pure lookup: hour (0-23) to energy tier.
    pub fn energy_tier(&self, hour: u32) -> EnergyTier {
        for &(start, end) in &self.peak_hours {
            if start <= hour && hour < end {
                return EnergyTier::High;
            }
        }
        for &(start, end) in &self.slump_hours {
            if start <= hour && hour < end {
                return EnergyTier::Low;
            }
        }
        EnergyTier::Medium
    }

    /// Greedy scan of the next 12 hours (current hour inclusive) for the
    /// first slot whose tier suits the difficulty:
    /// hard↔high, medium↔{medium,high}, easy↔{medium,low}.
    ///
    /// Falls back to `now` with a generic reason when no slot qualifies.
    pub fn suggest_slot(&self, difficulty: Difficulty, now: DateTime<Local>) -> SlotSuggestion {
        for i in 0..12 {
            let candidate = now + Duration::hours(i);
            let tier = self.energy_tier(candidate.hour());

            let reason = match (difficulty, tier) {
                (Difficulty::Hard, EnergyTier::High) => Some(REASON_PEAK),
                (Difficulty::Medium, EnergyTier::Medium | EnergyTier::High) => {
                    Some(REASON_BALANCED)
                }
                (Difficulty::Easy, EnergyTier::Medium | EnergyTier::Low) => Some(REASON_LOW_EFFORT),
                _ => None,
            };

            if let Some(reason) = reason {
                return SlotSuggestion {
                    suggested_time: candidate,
                    reason: reason.to_string(),
                };
            }
        }

        SlotSuggestion {
            suggested_time: now,
            reason: REASON_FALLBACK.to_string(),
        }
    }
}
