use crate::domain::human_key;
use crate::error::HarvestError;
use chrono::NaiveDate;
use std::fmt;
use tracing::{info, warn};

/// Step of a day's pipeline that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Render,
    Extract,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Render => "render",
            Stage::Extract => "extract",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum DayOutcome {
    Written {
        date: NaiveDate,
        key: String,
        records: usize,
    },
    Failed {
        date: NaiveDate,
        stage: Stage,
        cause: HarvestError,
    },
}

impl DayOutcome {
    pub fn date(&self) -> NaiveDate {
        match self {
            DayOutcome::Written { date, .. } | DayOutcome::Failed { date, .. } => *date,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, DayOutcome::Written { .. })
    }
}

impl fmt::Display for DayOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayOutcome::Written { key, records, .. } => {
                write!(f, "Saved {} events to {}", records, key)
            }
            DayOutcome::Failed { date, stage, cause } => write!(
                f,
                "Failed to {} data for date {}: {}",
                stage,
                human_key(*date),
                cause
            ),
        }
    }
}

/// Outcomes of one pass over a date range, in date order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<DayOutcome>,
}

impl RunReport {
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_written()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &DayOutcome> {
        self.outcomes.iter().filter(|o| !o.is_written())
    }
}

/// Receives every day's outcome as soon as it is known.
pub trait Reporter: Send + Sync {
    fn report(&self, outcome: &DayOutcome);
}

pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, outcome: &DayOutcome) {
        if outcome.is_written() {
            info!("{}", outcome);
        } else {
            warn!("{}", outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::RenderError;
    use std::time::Duration;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 30).unwrap()
    }

    #[test]
    fn failure_line_names_date_stage_and_cause() {
        let outcome = DayOutcome::Failed {
            date: day(),
            stage: Stage::Render,
            cause: RenderError::Timeout(Duration::from_secs(60)).into(),
        };

        assert_eq!(
            outcome.to_string(),
            "Failed to render data for date 2024-07-30: Render error: page not ready after 60s"
        );
        TracingReporter.report(&outcome);
    }

    #[test]
    fn written_line_names_key_and_count() {
        let outcome = DayOutcome::Written {
            date: day(),
            key: "20240730_data".into(),
            records: 12,
        };

        assert_eq!(outcome.to_string(), "Saved 12 events to 20240730_data");
        TracingReporter.report(&outcome);
    }
}
