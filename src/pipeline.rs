use crate::config::Config;
use crate::errors::*;
use crate::extract;
use crate::kev;
use crate::load::{self, LoadReport};
use crate::store::Connector;
use crate::transform;
use reqwest::Client;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The feed couldn't be retrieved, the collection is untouched.
    ExtractFailed,
    /// The feed had no usable records, the collection is untouched.
    NothingToLoad,
    /// The feed published an empty catalog and the collection was emptied.
    Cleared { deleted: u64 },
    Replaced { deleted: u64, inserted: usize },
    LoadFailed,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::ExtractFailed | Outcome::LoadFailed)
    }
}

/// Runs extract, transform and load once.
pub async fn run(config: &Config, client: &Client, connector: &dyn Connector) -> Outcome {
    info!("====== Starting CISA KEV ETL Process ======");
    let outcome = sync(config, client, connector).await;
    debug!("Run finished with {:?}", outcome);
    info!("======= ETL Process Finished =======");
    outcome
}

async fn sync(config: &Config, client: &Client, connector: &dyn Connector) -> Outcome {
    let Some(feed) = extract::extract(client, config).await else {
        return Outcome::ExtractFailed;
    };

    let empty_catalog = kev::publishes_empty_catalog(&feed);
    let records = transform::transform(Some(feed));

    let report = if records.is_empty() && empty_catalog {
        warn!("Feed publishes an empty catalog, clearing {}", connector.target());
        load::clear(connector).await
    } else {
        load::load(connector, records).await
    };

    match report {
        LoadReport::Skipped => Outcome::NothingToLoad,
        LoadReport::Replaced {
            deleted,
            inserted: 0,
        } if empty_catalog => Outcome::Cleared { deleted },
        LoadReport::Replaced { deleted, inserted } => Outcome::Replaced { deleted, inserted },
        LoadReport::Failed => Outcome::LoadFailed,
    }
}
