use crate::errors::*;
use crate::kev::IngestedRecord;
use crate::store::{Connector, Store};
use mongodb::bson::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadReport {
    /// There was nothing to load, the store wasn't contacted.
    Skipped,
    Replaced { deleted: u64, inserted: usize },
    Failed,
}

/// Replaces the contents of the target collection with `records`.
pub async fn load(connector: &dyn Connector, records: Vec<IngestedRecord>) -> LoadReport {
    if records.is_empty() {
        warn!("No data to load");
        return LoadReport::Skipped;
    }

    let docs = match records
        .iter()
        .map(IngestedRecord::to_document)
        .collect::<Result<Vec<_>>>()
    {
        Ok(docs) => docs,
        Err(err) => {
            error!("Error preparing records for {}: {:#}", connector.target(), err);
            return LoadReport::Failed;
        }
    };

    replace(connector, docs).await
}

/// Empties the target collection without inserting anything.
pub async fn clear(connector: &dyn Connector) -> LoadReport {
    replace(connector, Vec::new()).await
}

async fn replace(connector: &dyn Connector, docs: Vec<Document>) -> LoadReport {
    info!("Connecting to {}...", connector.target());
    let mut store = match connector.connect().await {
        Ok(store) => store,
        Err(err) => {
            error!("Error connecting to {}: {:#}", connector.target(), err);
            return LoadReport::Failed;
        }
    };

    let result = replace_all(store.as_mut(), &connector.target(), docs).await;
    store.close().await;
    info!("Connection to {} closed", connector.target());

    match result {
        Ok((deleted, inserted)) => LoadReport::Replaced { deleted, inserted },
        Err(err) => {
            error!("Error loading data into {}: {:#}", connector.target(), err);
            LoadReport::Failed
        }
    }
}

async fn replace_all(
    store: &mut dyn Store,
    target: &str,
    docs: Vec<Document>,
) -> Result<(u64, usize)> {
    info!("Deleting old data from {:?} to ensure freshness", target);
    let deleted = store.delete_all().await?;
    debug!("Deleted {} documents", deleted);

    if docs.is_empty() {
        info!("Catalog is empty, nothing to insert into {:?}", target);
        return Ok((deleted, 0));
    }

    info!("Loading {} records into {:?}...", docs.len(), target);
    let expected = docs.len();
    let inserted = store.insert_many(docs).await?;
    if inserted != expected {
        bail!("Expected to insert {} documents, but {} were inserted", expected, inserted);
    }
    info!("Successfully loaded {} records", inserted);

    Ok((deleted, inserted))
}
