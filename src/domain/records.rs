use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A record type the table extractor can build from one row.
///
/// `FIELDS` lists the output field names in serialization order. A column
/// mapping must cover each of them exactly once.
pub trait TableRecord: Sized {
    const FIELDS: &'static [&'static str];

    fn from_row(row: &mut RowFields) -> Self;
}

/// Cleaned field values resolved for a single table row, keyed by field name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RowFields {
    values: HashMap<String, String>,
}

impl RowFields {
    pub fn insert(&mut self, field: impl Into<String>, value: String) {
        self.values.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Moves a value out of the row. Unresolved fields come back empty.
    pub fn take(&mut self, field: &str) -> String {
        self.values.remove(field).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub time: String,
    pub sport: String,
    pub name: String,
    pub venue: String,
}

impl TableRecord for ScheduleRecord {
    const FIELDS: &'static [&'static str] = &["time", "sport", "name", "venue"];

    fn from_row(row: &mut RowFields) -> Self {
        Self {
            time: row.take("time"),
            sport: row.take("sport"),
            name: row.take("name"),
            venue: row.take("venue"),
        }
    }
}

/// One country's line in the medal table. Counts stay as the page printed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalRecord {
    pub rank: String,
    /// Taken from the `countryid` query parameter of the country link, not the cell text.
    #[serde(rename = "country")]
    pub country_code: String,
    pub gold: String,
    pub silver: String,
    pub bronze: String,
    pub total: String,
}

impl TableRecord for MedalRecord {
    const FIELDS: &'static [&'static str] =
        &["rank", "country", "gold", "silver", "bronze", "total"];

    fn from_row(row: &mut RowFields) -> Self {
        Self {
            rank: row.take("rank"),
            country_code: row.take("country"),
            gold: row.take("gold"),
            silver: row.take("silver"),
            bronze: row.take("bronze"),
            total: row.take("total"),
        }
    }
}
