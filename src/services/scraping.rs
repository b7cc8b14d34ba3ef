use crate::domain::TableRecord;
use crate::error::Result;
use crate::infrastructure::{FetchRequest, PageRenderer, RenderError, TableExtractor};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Fetches rendered pages with a fixed per-page time budget.
pub struct ScrapingService {
    renderer: Arc<dyn PageRenderer>,
    timeout: Duration,
}

impl ScrapingService {
    pub fn new(renderer: Arc<dyn PageRenderer>, timeout: Duration) -> Self {
        info!("Created new Scraping service (timeout {:?})", timeout);
        Self { renderer, timeout }
    }

    pub async fn fetch(
        &self,
        url: &str,
        ready_selector: &str,
    ) -> std::result::Result<String, RenderError> {
        let request = FetchRequest::new(url, ready_selector, self.timeout);
        let markup = self.renderer.fetch_rendered(&request).await?;
        debug!("Rendered {} ({} bytes)", url, markup.len());
        Ok(markup)
    }

    pub async fn scrape_table<R: TableRecord>(
        &self,
        url: &str,
        ready_selector: &str,
        extractor: &TableExtractor<R>,
    ) -> Result<Vec<R>> {
        let markup = self.fetch(url, ready_selector).await?;
        extractor.extract(&markup)
    }
}
