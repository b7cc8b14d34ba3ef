mod date_range;
mod records;
pub(crate) mod storage;

pub use date_range::{compact_key, human_key, DateRange};
pub use records::{MedalRecord, RowFields, ScheduleRecord, TableRecord};
