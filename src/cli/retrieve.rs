//! Retrieval mode CLI logic
//!
//! Loads settings, applies command line overrides, sets up logging and runs
//! a single [`KeyRetriever`] pass.

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use super::args::Cli;
use crate::{
    KeyRetriever, RecoveryKey,
    config::{ConfigLoader, settings::LoggingSettings},
    utils::version,
};

/// Run retrieval mode with the given arguments
pub async fn run_retrieve_mode(cli: &Cli) -> Result<RecoveryKey> {
    let mut settings = ConfigLoader::new().load(cli.config.as_deref())?;
    cli.apply_overrides(&mut settings);

    init_logging(&settings.logging);

    settings.validate()?;
    let target = cli.target()?;

    tracing::info!("keysword v{} retrieving key for {}", version::get_version(), target);

    let retriever = KeyRetriever::new(settings)?;
    let key = retriever.retrieve(&target).await?;
    Ok(key)
}

/// Initialize logging to stderr; `RUST_LOG` takes precedence
pub fn init_logging(logging: &LoggingSettings) {
    let default_level = if logging.verbose {
        "debug"
    } else {
        logging.level.as_str()
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
