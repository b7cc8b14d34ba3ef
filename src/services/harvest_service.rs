use crate::config::Config;
use crate::domain::storage::Storage;
use crate::domain::{human_key, DateRange};
use crate::error::Result;
use crate::infrastructure::PageRenderer;
use crate::services::{
    medals::MedalService,
    report::{Reporter, RunReport},
    schedule::ScheduleService,
    scraping::ScrapingService,
};
use std::sync::Arc;
use tracing::{info, warn};

pub struct HarvestService {
    medals: Option<MedalService>,
    schedule: Option<(ScheduleService, DateRange)>,
}

impl HarvestService {
    pub fn new(
        config: &Config,
        renderer: Arc<dyn PageRenderer + 'static>,
        store: Arc<dyn Storage + 'static>,
        reporter: Arc<dyn Reporter + 'static>,
    ) -> Result<Self> {
        let scraping = Arc::new(ScrapingService::new(renderer, config.timeout()));

        let medals = if config.runs_medals() {
            Some(MedalService::new(
                scraping.clone(),
                store.clone(),
                config.scraper_config.medals.clone(),
            )?)
        } else {
            None
        };

        let schedule = if config.runs_schedule() {
            let service = ScheduleService::new(
                scraping,
                store,
                reporter,
                config.scraper_config.schedule.clone(),
                config.args.concurrency,
            )?;
            Some((service, config.schedule_range()))
        } else {
            None
        };

        Ok(Self { medals, schedule })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.schedule = self
            .schedule
            .map(|(service, range)| (service.with_progress(show_progress), range));
        self
    }

    /// Runs the medal snapshot, then the schedule window.
    ///
    /// A medal failure is returned before any schedule day is attempted. Schedule
    /// failures stay inside the returned report.
    pub async fn process(&self) -> Result<Option<RunReport>> {
        info!("Starting harvest");

        if let Some(medals) = &self.medals {
            let table = medals.run().await?;
            info!("Medal snapshot completed: {} countries", table.len());
        }

        let Some((schedule, range)) = &self.schedule else {
            return Ok(None);
        };

        let report = schedule.run(*range).await;
        info!(
            "Schedule completed: {} of {} days written",
            report.written(),
            report.attempted()
        );
        for failed in report.failed() {
            warn!("No schedule saved for {}", human_key(failed.date()));
        }

        Ok(Some(report))
    }
}
