use clap::Parser;
use env_logger::Env;
use kev_etl::args::Args;
use kev_etl::config::Config;
use kev_etl::errors::*;
use kev_etl::extract;
use kev_etl::pipeline;
use kev_etl::store::MongoConnector;

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();
    let args = Args::parse();

    env_logger::init_from_env(Env::default().default_filter_or(args.log_level()));

    match dotenv {
        Ok(path) => debug!("Loaded environment from {:?}", path),
        Err(err) if err.not_found() => (),
        Err(err) => warn!("Failed to load .env file: {:#}", err),
    }

    let config = Config::from(&args);
    let client = extract::http_client(&config)?;
    let connector = MongoConnector::new(&config);

    let outcome = pipeline::run(&config, &client, &connector).await;
    if args.strict && !outcome.is_success() {
        bail!("Failed to synchronize catalog: {:?}", outcome);
    }

    Ok(())
}
