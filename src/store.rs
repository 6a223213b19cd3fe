use crate::config::Config;
use crate::errors::*;
use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

/// Opens sessions against the document store.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Human readable location of the target collection, used in log messages.
    fn target(&self) -> String;

    async fn connect(&self) -> Result<Box<dyn Store>>;
}

/// A session bound to the target collection. It must be closed once the caller is done with it.
#[async_trait]
pub trait Store: Send {
    /// Removes every document from the collection, returning how many were deleted.
    async fn delete_all(&mut self) -> Result<u64>;

    /// Inserts the documents in one bulk operation, returning how many were inserted.
    async fn insert_many(&mut self, docs: Vec<Document>) -> Result<usize>;

    async fn close(self: Box<Self>);
}

pub struct MongoConnector {
    uri: String,
    db_name: String,
    collection: String,
}

impl MongoConnector {
    pub fn new(config: &Config) -> Self {
        Self {
            uri: config.mongo_uri.clone(),
            db_name: config.db_name.clone(),
            collection: config.collection.clone(),
        }
    }
}

#[async_trait]
impl Connector for MongoConnector {
    fn target(&self) -> String {
        format!("{}.{}", self.db_name, self.collection)
    }

    async fn connect(&self) -> Result<Box<dyn Store>> {
        if self.db_name.is_empty() {
            bail!("No database name configured");
        }

        let mut options = ClientOptions::parse(&self.uri)
            .await
            .context("Failed to parse mongodb connection string")?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options).context("Failed to setup mongodb client")?;
        let collection = client
            .database(&self.db_name)
            .collection::<Document>(&self.collection);

        Ok(Box::new(MongoStore { client, collection }))
    }
}

pub struct MongoStore {
    client: Client,
    collection: Collection<Document>,
}

#[async_trait]
impl Store for MongoStore {
    async fn delete_all(&mut self) -> Result<u64> {
        let result = self
            .collection
            .delete_many(doc! {}, None)
            .await
            .with_context(|| {
                anyhow!("Failed to delete documents from {:?}", self.collection.name())
            })?;
        Ok(result.deleted_count)
    }

    async fn insert_many(&mut self, docs: Vec<Document>) -> Result<usize> {
        let result = self
            .collection
            .insert_many(docs, None)
            .await
            .with_context(|| {
                anyhow!("Failed to insert documents into {:?}", self.collection.name())
            })?;
        Ok(result.inserted_ids.len())
    }

    async fn close(self: Box<Self>) {
        let store = *self;
        store.client.shutdown().await;
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::sync::{Arc, Mutex, MutexGuard};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Op {
        Connect,
        DeleteAll,
        InsertMany(usize),
        Close,
    }

    #[derive(Debug, Default)]
    pub struct State {
        pub docs: Vec<Document>,
        pub ops: Vec<Op>,
        pub fail_connect: bool,
        pub fail_delete: bool,
        pub fail_insert: bool,
    }

    /// In-memory stand-in for the document store that records every operation.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryConnector {
        state: Arc<Mutex<State>>,
    }

    impl MemoryConnector {
        pub fn with_docs(docs: Vec<Document>) -> Self {
            let connector = Self::default();
            connector.state().docs = docs;
            connector
        }

        pub fn state(&self) -> MutexGuard<'_, State> {
            self.state.lock().unwrap()
        }

        pub fn ops(&self) -> Vec<Op> {
            self.state().ops.clone()
        }

        pub fn docs(&self) -> Vec<Document> {
            self.state().docs.clone()
        }
    }

    #[async_trait]
    impl Connector for MemoryConnector {
        fn target(&self) -> String {
            "memory.cisa_kev_catalog_raw".to_string()
        }

        async fn connect(&self) -> Result<Box<dyn Store>> {
            let mut state = self.state();
            state.ops.push(Op::Connect);
            if state.fail_connect {
                bail!("Connection refused");
            }
            Ok(Box::new(MemoryStore {
                state: self.state.clone(),
            }))
        }
    }

    struct MemoryStore {
        state: Arc<Mutex<State>>,
    }

    #[async_trait]
    impl Store for MemoryStore {
        async fn delete_all(&mut self) -> Result<u64> {
            let mut state = self.state.lock().unwrap();
            state.ops.push(Op::DeleteAll);
            if state.fail_delete {
                bail!("Delete rejected");
            }
            let deleted = state.docs.len() as u64;
            state.docs.clear();
            Ok(deleted)
        }

        async fn insert_many(&mut self, docs: Vec<Document>) -> Result<usize> {
            let mut state = self.state.lock().unwrap();
            state.ops.push(Op::InsertMany(docs.len()));
            if state.fail_insert {
                bail!("Insert rejected");
            }
            let inserted = docs.len();
            state.docs.extend(docs);
            Ok(inserted)
        }

        async fn close(self: Box<Self>) {
            self.state.lock().unwrap().ops.push(Op::Close);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mongo_target() {
        let config = Config {
            db_name: "threat_intel".to_string(),
            ..Default::default()
        };
        let connector = MongoConnector::new(&config);
        assert_eq!(connector.target(), "threat_intel.cisa_kev_catalog_raw");
    }

    #[tokio::test]
    async fn test_mongo_connect_without_database() {
        let connector = MongoConnector::new(&Config::default());
        assert!(connector.connect().await.is_err());
    }

    #[tokio::test]
    async fn test_mongo_connect_invalid_uri() {
        let config = Config {
            mongo_uri: "postgres://localhost".to_string(),
            db_name: "threat_intel".to_string(),
            ..Default::default()
        };
        let connector = MongoConnector::new(&config);
        assert!(connector.connect().await.is_err());
    }
}
