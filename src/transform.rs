use crate::errors::*;
use crate::kev::{CatalogInfo, IngestedRecord, VULNERABILITIES_KEY};
use chrono::{DateTime, Utc};
use serde_json::Value;

pub fn transform(feed: Option<Value>) -> Vec<IngestedRecord> {
    transform_at(feed, Utc::now())
}

/// Pulls the entries out of the feed and stamps every one of them with `ingested_at`.
///
/// A feed without a list of vulnerabilities yields no records. Entries that
/// aren't json objects can't be stored as documents and are skipped.
pub fn transform_at(feed: Option<Value>, ingested_at: DateTime<Utc>) -> Vec<IngestedRecord> {
    let Some(mut feed) = feed.filter(is_truthy) else {
        warn!("No data found to transform");
        return Vec::new();
    };

    let info = CatalogInfo::from_feed(&feed);
    if !info.is_empty() {
        info!(
            "Catalog {:?} (version={:?}, released={:?}, count={:?})",
            info.title.as_deref().unwrap_or("<untitled>"),
            info.catalog_version,
            info.date_released,
            info.count
        );
    }

    let list = match feed.get_mut(VULNERABILITIES_KEY).map(Value::take) {
        Some(Value::Array(list)) => list,
        Some(other) => {
            warn!(
                "Expected {:?} to be a list, found {}",
                VULNERABILITIES_KEY,
                json_type(&other)
            );
            return Vec::new();
        }
        None => {
            warn!("No {:?} key found to transform", VULNERABILITIES_KEY);
            return Vec::new();
        }
    };

    info!("Transforming {} vulnerability records...", list.len());
    let mut records = Vec::with_capacity(list.len());
    for (idx, entry) in list.into_iter().enumerate() {
        match entry {
            Value::Object(record) => records.push(IngestedRecord::new(record, ingested_at)),
            other => warn!(
                "Skipping entry #{} in {:?}, expected an object but found {}",
                idx,
                VULNERABILITIES_KEY,
                json_type(&other)
            ),
        }
    }

    info!("Transformation complete");
    records
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Object(obj) => !obj.is_empty(),
        Value::Array(list) => !list.is_empty(),
        Value::String(s) => !s.is_empty(),
        Value::Number(_) => true,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
