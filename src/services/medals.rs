use crate::config::PageConfig;
use crate::domain::storage::{Storage, StorageKeys};
use crate::domain::MedalRecord;
use crate::error::Result;
use crate::infrastructure::TableExtractor;
use crate::services::scraping::ScrapingService;
use std::sync::Arc;
use tracing::info;

/// Single snapshot of the medal table. Any failure here is returned to the caller.
pub struct MedalService {
    scraping: Arc<ScrapingService>,
    store: Arc<dyn Storage>,
    page: PageConfig,
    extractor: TableExtractor<MedalRecord>,
}

impl MedalService {
    pub fn new(
        scraping: Arc<ScrapingService>,
        store: Arc<dyn Storage + 'static>,
        page: PageConfig,
    ) -> Result<Self> {
        let extractor = TableExtractor::new(&page.table)?;
        Ok(Self {
            scraping,
            store,
            page,
            extractor,
        })
    }

    pub async fn run(&self) -> Result<Vec<MedalRecord>> {
        info!("Fetching medal table from {}", self.page.url);

        let medals = self
            .scraping
            .scrape_table(&self.page.url, &self.page.ready_selector, &self.extractor)
            .await?;
        self.store.save_medals(&medals)?;

        info!("Saved {} countries to {}", medals.len(), StorageKeys::MEDALS);
        Ok(medals)
    }
}
