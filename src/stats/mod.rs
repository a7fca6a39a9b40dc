//! Durable game statistics shared by every session.

mod error;
mod models;
mod storage;
mod store;

pub use error::StorageError;
pub use models::{GameOutcome, Lead, StatsRecord, StatsSummary};
pub use storage::{FileStorage, MemoryStorage, StatsStorage};
pub use store::{STATS_KEY, StatsChanged, StatsStore, StatsSubscription};
