//! covidtrend - main entry point

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use covidtrend::{App, Cli};
use covidtrend_common::{init_logging, LoggingConfig};
use covidtrend_config::ConfigLoader;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    init_logging(LoggingConfig::from(&config.logging)).context("failed to initialize logging")?;

    let command = cli.effective_command();
    info!(version = env!("CARGO_PKG_VERSION"), "starting covidtrend");
    debug!(?command, data_dir = %config.source.data_dir.display(), "resolved command");

    let app = App::new(config);
    let mut stdout = std::io::stdout().lock();
    app.run(command, &mut stdout).await?;

    Ok(())
}
