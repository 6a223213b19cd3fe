use crate::errors::*;
use chrono::{DateTime, Utc};
use mongodb::bson::{self, Bson, Document};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Key of the array that carries the catalog entries.
pub const VULNERABILITIES_KEY: &str = "vulnerabilities";
/// Key added to every entry when it is ingested.
pub const INGESTION_TIMESTAMP_KEY: &str = "ingestion_timestamp";

/// One catalog entry as published upstream. The schema belongs to CISA, so it's kept opaque.
pub type VulnerabilityRecord = Map<String, Value>;

/// Header fields of the feed, only used for logging.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogInfo {
    pub title: Option<String>,
    pub catalog_version: Option<String>,
    pub date_released: Option<String>,
    pub count: Option<u64>,
}

impl CatalogInfo {
    /// Reads the header fields leniently, a header that doesn't match is treated as absent.
    pub fn from_feed(feed: &Value) -> Self {
        CatalogInfo::deserialize(feed).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.catalog_version.is_none()
            && self.date_released.is_none()
            && self.count.is_none()
    }
}

/// Returns true if the feed explicitly publishes an empty list of vulnerabilities.
pub fn publishes_empty_catalog(feed: &Value) -> bool {
    matches!(feed.get(VULNERABILITIES_KEY), Some(Value::Array(list)) if list.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngestedRecord {
    pub record: VulnerabilityRecord,
    pub ingested_at: DateTime<Utc>,
}

impl IngestedRecord {
    pub fn new(record: VulnerabilityRecord, ingested_at: DateTime<Utc>) -> Self {
        Self {
            record,
            ingested_at,
        }
    }

    pub fn cve_id(&self) -> Option<&str> {
        self.record.get("cveID").and_then(Value::as_str)
    }

    /// The entry as it's stored: upstream fields plus the timestamp as a native datetime.
    pub fn to_document(&self) -> Result<Document> {
        let mut doc = bson::to_document(&self.record).with_context(|| {
            anyhow!(
                "Failed to convert record {:?} to a document",
                self.cve_id().unwrap_or("<unknown>")
            )
        })?;
        let ts = bson::DateTime::from_millis(self.ingested_at.timestamp_millis());
        doc.insert(INGESTION_TIMESTAMP_KEY, Bson::DateTime(ts));
        Ok(doc)
    }
}
