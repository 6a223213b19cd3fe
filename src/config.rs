use std::time::Duration;

pub const DEFAULT_FEED_URL: &str =
    "https://www.cisa.gov/sites/default/files/feeds/known_exploited_vulnerabilities.json";
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const COLLECTION_NAME: &str = "cisa_kev_catalog_raw";

/// Everything a single synchronization run needs to know about its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub feed_url: String,
    pub timeout: Duration,
    pub mongo_uri: String,
    pub db_name: String,
    /// Not exposed on the command line, the catalog always lands in the same collection.
    pub collection: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            feed_url: DEFAULT_FEED_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            mongo_uri: DEFAULT_MONGO_URI.to_string(),
            db_name: String::new(),
            collection: COLLECTION_NAME.to_string(),
        }
    }
}
