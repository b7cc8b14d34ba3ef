use super::{FetchRequest, PageRenderer, RenderError};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::{sleep, timeout, timeout_at, Instant};
use tracing::{debug, info, warn};

const READY_POLL: Duration = Duration::from_millis(250);
/// How long each of close and exit may take before the process is killed.
const TEARDOWN_GRACE: Duration = Duration::from_secs(5);

/// Headless Chromium, launched fresh for every fetch.
#[derive(Debug, Clone)]
pub struct ChromeRenderer {
    executable: Option<PathBuf>,
    sandbox: bool,
}

impl ChromeRenderer {
    pub fn new(executable: Option<PathBuf>, sandbox: bool) -> Self {
        info!("Created new Chrome renderer (sandbox: {})", sandbox);
        Self {
            executable,
            sandbox,
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig, RenderError> {
        let mut builder = BrowserConfig::builder();
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        if !self.sandbox {
            builder = builder.no_sandbox();
        }
        builder.build().map_err(RenderError::Session)
    }
}

#[async_trait]
impl PageRenderer for ChromeRenderer {
    async fn fetch_rendered(&self, request: &FetchRequest) -> Result<String, RenderError> {
        // The budget starts before launch, so a slow browser start eats into it.
        let deadline = Instant::now() + request.timeout;

        let config = self.browser_config()?;
        let (mut browser, mut handler) = match timeout_at(deadline, Browser::launch(config)).await
        {
            Ok(Ok(session)) => session,
            Ok(Err(e)) => return Err(RenderError::Session(e.to_string())),
            Err(_) => return Err(RenderError::Timeout(request.timeout)),
        };

        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let outcome = match timeout_at(deadline, render_page(&browser, request)).await {
            Ok(result) => result,
            Err(_) => Err(RenderError::Timeout(request.timeout)),
        };

        shut_down(&mut browser, &request.url, TEARDOWN_GRACE).await;
        events.abort();

        outcome
    }
}

async fn render_page(browser: &Browser, request: &FetchRequest) -> Result<String, RenderError> {
    debug!("Navigating to {}", request.url);
    let page = browser
        .new_page(request.url.as_str())
        .await
        .map_err(|e| RenderError::Navigation(e.to_string()))?;

    wait_until_present(&page, &request.ready_selector).await;

    let markup = page
        .content()
        .await
        .map_err(|e| RenderError::Serialization(e.to_string()));

    if let Err(e) = page.close().await {
        debug!("Failed to close page {}: {}", request.url, e);
    }

    markup
}

/// The parts of a browser process that teardown drives.
#[async_trait]
trait BrowserProcess: Send {
    async fn close(&mut self) -> Result<(), String>;
    async fn wait(&mut self) -> std::io::Result<()>;
    async fn kill(&mut self) -> std::io::Result<()>;
}

#[async_trait]
impl BrowserProcess for Browser {
    async fn close(&mut self) -> Result<(), String> {
        Browser::close(self).await.map(|_| ()).map_err(|e| e.to_string())
    }

    async fn wait(&mut self) -> std::io::Result<()> {
        Browser::wait(self).await.map(|_| ())
    }

    async fn kill(&mut self) -> std::io::Result<()> {
        Browser::kill(self).await.unwrap_or(Ok(()))
    }
}

/// Asks the browser to close and waits for it to exit, each step bounded by `grace`.
/// Anything short of a clean exit ends in a kill.
async fn shut_down<B: BrowserProcess>(browser: &mut B, url: &str, grace: Duration) {
    let closed = match timeout(grace, browser.close()).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!("Failed to close browser for {}: {}", url, e);
            false
        }
        Err(_) => {
            warn!("Browser for {} did not close within {:?}", url, grace);
            false
        }
    };

    if closed {
        match timeout(grace, browser.wait()).await {
            Ok(Ok(())) => return,
            Ok(Err(e)) => warn!("Browser process for {} did not exit cleanly: {}", url, e),
            Err(_) => warn!("Browser process for {} still running after {:?}", url, grace),
        }
    }

    if let Err(e) = browser.kill().await {
        warn!("Failed to kill browser process for {}: {}", url, e);
    }
}

/// Polls until `selector` matches. The caller bounds this with the fetch deadline.
async fn wait_until_present(page: &Page, selector: &str) {
    while page.find_element(selector).await.is_err() {
        sleep(READY_POLL).await;
    }
    debug!("Ready selector {} present", selector);
}
