use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub(crate) mod chrome;

/// One attempt at rendering a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    /// CSS selector that must be present before the document is serialized.
    pub ready_selector: String,
    pub timeout: Duration,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, ready_selector: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            ready_selector: ready_selector.into(),
            timeout,
        }
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("could not start browser session: {0}")]
    Session(String),
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("page not ready after {0:?}")]
    Timeout(Duration),
    #[error("could not serialize document: {0}")]
    Serialization(String),
}

/// Renders a page in a browser and hands back the full document markup.
///
/// Implementations own one session per call and release it before returning,
/// whatever the outcome. There are no retries.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn fetch_rendered(&self, request: &FetchRequest) -> Result<String, RenderError>;
}
