use crate::config::ScheduleConfig;
use crate::domain::storage::{Storage, StorageKeys};
use crate::domain::{compact_key, human_key, DateRange, ScheduleRecord};
use crate::error::{HarvestError, Result};
use crate::infrastructure::TableExtractor;
use crate::services::report::{DayOutcome, Reporter, RunReport, Stage};
use crate::services::scraping::ScrapingService;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tracing::info;

/// Walks a date range and writes one schedule artifact per day.
///
/// A day that fails to render, extract or write is reported and skipped; it never
/// stops the days after it. Up to `concurrency` days are in flight at once, and the
/// report lists them in date order either way.
pub struct ScheduleService {
    scraping: Arc<ScrapingService>,
    store: Arc<dyn Storage>,
    reporter: Arc<dyn Reporter>,
    config: ScheduleConfig,
    extractor: TableExtractor<ScheduleRecord>,
    concurrency: usize,
    show_progress: bool,
}

impl ScheduleService {
    pub fn new(
        scraping: Arc<ScrapingService>,
        store: Arc<dyn Storage + 'static>,
        reporter: Arc<dyn Reporter + 'static>,
        config: ScheduleConfig,
        concurrency: usize,
    ) -> Result<Self> {
        let extractor = TableExtractor::new(&config.page.table)?;
        Ok(Self {
            scraping,
            store,
            reporter,
            config,
            extractor,
            concurrency: concurrency.max(1),
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub async fn run(&self, range: DateRange) -> RunReport {
        info!(
            "Fetching schedule for {} days ({} to {})",
            range.len(),
            human_key(range.start()),
            human_key(range.end())
        );

        let pb = self.progress_bar(range.len() as u64);

        let outcomes: Vec<DayOutcome> = stream::iter(range)
            .map(|date| self.process_day(date))
            .buffered(self.concurrency)
            .inspect(|outcome| {
                pb.set_message(human_key(outcome.date()));
                pb.inc(1);
            })
            .collect()
            .await;

        pb.finish_and_clear();
        RunReport { outcomes }
    }

    async fn process_day(&self, date: NaiveDate) -> DayOutcome {
        let outcome = match self.harvest_day(date).await {
            Ok((key, records)) => DayOutcome::Written { date, key, records },
            Err((stage, cause)) => DayOutcome::Failed { date, stage, cause },
        };

        self.reporter.report(&outcome);
        outcome
    }

    async fn harvest_day(
        &self,
        date: NaiveDate,
    ) -> std::result::Result<(String, usize), (Stage, HarvestError)> {
        let url = self.config.url_for(date);

        let markup = self
            .scraping
            .fetch(&url, &self.config.page.ready_selector)
            .await
            .map_err(|e| (Stage::Render, HarvestError::from(e)))?;

        let events = self
            .extractor
            .extract(&markup)
            .map_err(|e| (Stage::Extract, e))?;

        let key = StorageKeys::schedule(&compact_key(date));
        self.store
            .save_schedule(&key, &events)
            .map_err(|e| (Stage::Write, e))?;

        Ok((key, events.len()))
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        let template = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            pb.set_style(style);
        }
        pb
    }
}
