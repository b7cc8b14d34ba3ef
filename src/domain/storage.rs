use super::{MedalRecord, ScheduleRecord};
use crate::error::Result;

/// Persistence sink for extracted tables. Every save overwrites the artifact at its key.
pub trait Storage: Send + Sync {
    fn save_medals(&self, medals: &[MedalRecord]) -> Result<()>;
    fn load_medals(&self) -> Result<Option<Vec<MedalRecord>>>;
    fn save_schedule(&self, key: &str, events: &[ScheduleRecord]) -> Result<()>;
    fn load_schedule(&self, key: &str) -> Result<Option<Vec<ScheduleRecord>>>;
}

pub struct StorageKeys;

impl StorageKeys {
    pub const MEDALS: &'static str = "medal_data";

    /// Artifact key for one day of the schedule, e.g. `20240724_data`.
    pub fn schedule(compact_date: &str) -> String {
        format!("{}_data", compact_date)
    }
}
