use crate::config::{Config, DEFAULT_FEED_URL, DEFAULT_MONGO_URI, DEFAULT_TIMEOUT_SECS};
use clap::{ArgAction, Parser};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Turn debugging information on
    #[arg(short, long, action(ArgAction::Count))]
    pub verbose: u8,
    /// Less verbose output
    #[arg(short, long, action(ArgAction::Count))]
    pub quiet: u8,
    /// MongoDB connection string
    #[arg(long, env = "MONGO_URI", default_value = DEFAULT_MONGO_URI, hide_env_values = true)]
    pub mongo_uri: String,
    /// Name of the database holding the catalog collection
    #[arg(long, env = "DB_NAME")]
    pub db_name: String,
    /// Location of the known exploited vulnerabilities feed
    #[arg(long, env = "KEV_FEED_URL", default_value = DEFAULT_FEED_URL)]
    pub feed_url: String,
    /// Timeout for the feed download, in seconds
    #[arg(
        long,
        env = "KEV_FEED_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_name = "SECONDS"
    )]
    pub timeout: u64,
    /// Exit with an error if the catalog could not be synchronized
    #[arg(long)]
    pub strict: bool,
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (0, 0) => "info",
            (0, 1) => "debug",
            (0, _) => "trace",
            (1, _) => "warn",
            (_, _) => "error",
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            feed_url: args.feed_url.clone(),
            timeout: Duration::from_secs(args.timeout),
            mongo_uri: args.mongo_uri.clone(),
            db_name: args.db_name.clone(),
            ..Default::default()
        }
    }
}
