use crate::config::Config;
use crate::errors::*;
use reqwest::Client;
use serde_json::Value;

pub fn http_client(config: &Config) -> Result<Client> {
    Client::builder()
        .timeout(config.timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to setup http client")
}

pub async fn fetch_feed(client: &Client, url: &str) -> Result<Value> {
    debug!("Url={}", url);
    let json = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .context("Feed is not valid json")?;

    Ok(json)
}

/// Downloads the catalog, returning `None` if it couldn't be retrieved.
pub async fn extract(client: &Client, config: &Config) -> Option<Value> {
    info!("Starting data extraction from CISA KEV feed...");
    match fetch_feed(client, &config.feed_url).await {
        Ok(json) => {
            info!("Successfully extracted data from feed");
            Some(json)
        }
        Err(err) => {
            error!("Error during extraction: {:#}", err);
            None
        }
    }
}
