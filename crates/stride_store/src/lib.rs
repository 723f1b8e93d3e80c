pub mod gamification;
pub mod ledger;
pub mod store;

pub use gamification::{GamificationRecord, GamificationState, XpAward};
pub use ledger::ProgressLedger;
pub use store::{JsonFileStore, MemoryStore, StateStore};
