use std::sync::Arc;

use anyhow::Result;
use feedlog::cli::{self, Command};
use feedlog::config::Config;
use feedlog::logger;
use feedlog::storage::LocalStorage;
use feedlog::tracker::FeedingTracker;
use feedlog::utils::SystemClock;

#[tokio::main]
async fn main() -> Result<()> {
    let command = match Command::parse(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("\n{}", cli::USAGE);
            std::process::exit(2);
        }
    };

    // Writing a config must work even when the current one is broken
    if let Command::ConfigInit(path) = &command {
        return cli::init_config(path.clone());
    }

    let config = Config::load()?;
    logger::init(&config.logging)?;

    let storage = Arc::new(LocalStorage::new(&config.storage).await?);
    let tracker = FeedingTracker::new(storage, &config, Arc::new(SystemClock))?;

    cli::run(command, &tracker, &config).await
}

