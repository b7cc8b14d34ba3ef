use crate::config::cli::{Args, Command};
use crate::domain::{compact_key, human_key, DateRange};
use crate::error::{HarvestError, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub(crate) mod cli;

const MEDALS_URL: &str =
    "https://sports.cctv.cn/Paris2024/medal_list/index.shtml?spm=C73465.PkN5JcjBF6mp.E6mpRwlrGbbT.1";
const SCHEDULE_URL: &str = "https://sports.cctv.cn/Paris2024/schedule/date/index.shtml?date={date}";

/// Where a field's raw value comes from inside its cell.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSource {
    /// Concatenated text of the cell.
    #[default]
    Text,
    /// Attribute of the first node under the cell matching `selector`. With
    /// `derive_param` set, only that query parameter of the attribute value is kept.
    Attribute {
        selector: String,
        name: String,
        #[serde(default)]
        derive_param: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnSpec {
    pub field: String,
    pub column: usize,
    #[serde(default)]
    pub source: ColumnSource,
}

impl ColumnSpec {
    pub fn text(field: &str, column: usize) -> Self {
        Self {
            field: field.to_string(),
            column,
            source: ColumnSource::Text,
        }
    }

    pub fn derived(field: &str, column: usize, selector: &str, attr: &str, param: &str) -> Self {
        Self {
            field: field.to_string(),
            column,
            source: ColumnSource::Attribute {
                selector: selector.to_string(),
                name: attr.to_string(),
                derive_param: Some(param.to_string()),
            },
        }
    }
}

fn default_cell_selector() -> String {
    "td".to_string()
}

/// Declarative description of one table on a page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableSpec {
    pub row_selector: String,
    #[serde(default = "default_cell_selector")]
    pub cell_selector: String,
    pub columns: Vec<ColumnSpec>,
    /// Rows whose value for this field is empty are dropped. Defaults to the first column.
    #[serde(default)]
    pub validity_field: Option<String>,
}

impl TableSpec {
    pub fn validity_field(&self) -> Option<&str> {
        self.validity_field
            .as_deref()
            .or_else(|| self.columns.first().map(|c| c.field.as_str()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageConfig {
    pub url: String,
    pub ready_selector: String,
    pub table: TableSpec,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    #[serde(flatten)]
    pub page: PageConfig,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ScheduleConfig {
    /// Fills `{date}` (YYYYMMDD) and `{iso_date}` (YYYY-MM-DD) in the URL template.
    pub fn url_for(&self, date: NaiveDate) -> String {
        self.page
            .url
            .replace("{date}", &compact_key(date))
            .replace("{iso_date}", &human_key(date))
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    fn validate(&self) -> Result<()> {
        if !self.page.url.contains("{date}") && !self.page.url.contains("{iso_date}") {
            return Err(HarvestError::Config(format!(
                "schedule url has no {{date}} or {{iso_date}} placeholder: {}",
                self.page.url
            )));
        }
        Ok(())
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            page: PageConfig {
                url: SCHEDULE_URL.to_string(),
                ready_selector: "#data_list".to_string(),
                table: TableSpec {
                    row_selector: "#data_list tr".to_string(),
                    cell_selector: default_cell_selector(),
                    columns: vec![
                        ColumnSpec::text("time", 0),
                        ColumnSpec::text("sport", 2),
                        ColumnSpec::text("name", 3),
                        ColumnSpec::text("venue", 4),
                    ],
                    validity_field: None,
                },
            },
            start_date: NaiveDate::from_ymd_opt(2024, 7, 24).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 8, 11).unwrap_or_default(),
        }
    }
}

pub fn default_medals_page() -> PageConfig {
    PageConfig {
        url: MEDALS_URL.to_string(),
        ready_selector: "#medal_list1".to_string(),
        table: TableSpec {
            row_selector: "#medal_list1 tr".to_string(),
            cell_selector: default_cell_selector(),
            columns: vec![
                ColumnSpec::text("rank", 0),
                ColumnSpec::derived("country", 1, "a", "href", "countryid"),
                ColumnSpec::text("gold", 2),
                ColumnSpec::text("silver", 3),
                ColumnSpec::text("bronze", 4),
                ColumnSpec::text("total", 5),
            ],
            validity_field: None,
        },
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    #[serde(default = "default_medals_page")]
    pub medals: PageConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            medals: default_medals_page(),
            schedule: ScheduleConfig::default(),
        }
    }
}

impl ScraperConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config: ScraperConfig = if path.exists() {
            info!("Loading scraper config from {:?}", path);
            serde_json::from_str(&std::fs::read_to_string(path)?)?
        } else {
            info!("No config at {:?}, using built-in pages", path);
            ScraperConfig::default()
        };

        config.schedule.validate()?;
        Ok(config)
    }
}

pub struct Config {
    pub args: Args,
    pub scraper_config: ScraperConfig,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self> {
        if args.concurrency == 0 {
            return Err(HarvestError::Config("concurrency must be at least 1".into()));
        }

        let scraper_config = ScraperConfig::load(&args.config_file)?;

        Ok(Self {
            args,
            scraper_config,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.args.timeout_secs)
    }

    pub fn runs_medals(&self) -> bool {
        matches!(self.args.command, None | Some(Command::Medals))
    }

    pub fn runs_schedule(&self) -> bool {
        matches!(self.args.command, None | Some(Command::Schedule { .. }))
    }

    /// Configured window, narrowed by `schedule --start/--end` when given.
    pub fn schedule_range(&self) -> DateRange {
        let configured = self.scraper_config.schedule.range();
        match &self.args.command {
            Some(Command::Schedule { start, end }) => DateRange::new(
                start.unwrap_or(configured.start()),
                end.unwrap_or(configured.end()),
            ),
            _ => configured,
        }
    }

    pub fn ensure_directories(&self) -> Result<()> {
        if !self.args.data_dir.exists() {
            std::fs::create_dir_all(&self.args.data_dir)?;
        }

        info!("Data dir {:?} exists", self.args.data_dir);
        Ok(())
    }
}
