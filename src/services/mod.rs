pub(crate) mod harvest_service;
pub(crate) mod medals;
pub(crate) mod report;
pub(crate) mod schedule;
pub(crate) mod scraping;

#[cfg(test)]
mod test_support;

pub use harvest_service::HarvestService;
pub use report::TracingReporter;
