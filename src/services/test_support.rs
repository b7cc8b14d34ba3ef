//! Fakes shared by the service tests.

use crate::domain::storage::Storage;
use crate::domain::{human_key, MedalRecord, ScheduleRecord};
use crate::error::Result;
use crate::infrastructure::{FetchRequest, FileSystemStore, PageRenderer, RenderError};
use crate::services::report::{DayOutcome, Reporter};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Serves canned markup per URL and times out on the URLs it is told to fail.
pub struct ScriptedRenderer {
    fallback: String,
    pages: HashMap<String, String>,
    failing: HashSet<String>,
    delay: Duration,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedRenderer {
    pub fn new(fallback: &str) -> Self {
        Self {
            fallback: fallback.to_string(),
            pages: HashMap::new(),
            failing: HashSet::new(),
            delay: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_page(mut self, url: &str, markup: &str) -> Self {
        self.pages.insert(url.to_string(), markup.to_string());
        self
    }

    pub fn failing_on(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageRenderer for ScriptedRenderer {
    async fn fetch_rendered(
        &self,
        request: &FetchRequest,
    ) -> std::result::Result<String, RenderError> {
        self.calls.lock().unwrap().push(request.url.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(&request.url) {
            return Err(RenderError::Timeout(request.timeout));
        }
        Ok(self
            .pages
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone()))
    }
}

/// File store that refuses to write the listed schedule keys.
pub struct FailingStore {
    inner: FileSystemStore,
    failing_keys: HashSet<String>,
}

impl FailingStore {
    pub fn new(dir: &Path, failing_keys: &[&str]) -> Self {
        Self {
            inner: FileSystemStore::new(dir),
            failing_keys: failing_keys.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl Storage for FailingStore {
    fn save_medals(&self, medals: &[MedalRecord]) -> Result<()> {
        self.inner.save_medals(medals)
    }

    fn load_medals(&self) -> Result<Option<Vec<MedalRecord>>> {
        self.inner.load_medals()
    }

    fn save_schedule(&self, key: &str, events: &[ScheduleRecord]) -> Result<()> {
        if self.failing_keys.contains(key) {
            let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
            return Err(denied.into());
        }
        self.inner.save_schedule(key, events)
    }

    fn load_schedule(&self, key: &str) -> Result<Option<Vec<ScheduleRecord>>> {
        self.inner.load_schedule(key)
    }
}

#[derive(Default)]
pub struct CapturingReporter {
    lines: Mutex<Vec<String>>,
}

impl CapturingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl Reporter for CapturingReporter {
    fn report(&self, outcome: &DayOutcome) {
        let line = match outcome {
            DayOutcome::Written { key, records, .. } => format!("ok {} {}", key, records),
            DayOutcome::Failed { date, stage, cause } => {
                format!("fail {} {}: {}", human_key(*date), stage, cause)
            }
        };
        self.lines.lock().unwrap().push(line);
    }
}

/// Schedule page with one row per `(time, sport)` pair.
pub fn schedule_page(rows: &[(&str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(time, sport)| {
            format!(
                "<tr><td>{}</td><td><img src=\"icon.png\"></td><td>{}</td><td>{} Final</td><td>Paris</td></tr>",
                time, sport, sport
            )
        })
        .collect();
    format!(
        "<html><body><table id=\"data_list\">{}</table></body></html>",
        body
    )
}

/// Medal page with one row per `(rank, country code, gold)` triple.
pub fn medal_page(rows: &[(&str, &str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(rank, code, gold)| {
            format!(
                "<tr><td>{}</td><td class=\"country\"><a href=\"/medal/country.shtml?countryid={}&t=1\">{}</a></td>\
                 <td>{}</td><td>0</td><td>0</td><td>{}</td></tr>",
                rank, code, code, gold, gold
            )
        })
        .collect();
    format!(
        "<html><body><table id=\"medal_list1\">{}</table></body></html>",
        body
    )
}
