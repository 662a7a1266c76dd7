//! Inspect and probe search engine client configurations from a Command Line Interface.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use searchclient::ClientFactory;
use searchclient_keystore::PemStoreProvider;

mod cmd;
mod logging;

use self::cmd::Cli;
use self::cmd::Command;

/// Initialise the searchctl process and invoke a command implementation.
pub async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let logger = logging::configure(&cli.log)?;
    let conf = searchclient::conf::load(&cli.config)?;
    slog::debug!(logger, "Loaded search client configuration"; "path" => &cli.config);
    let factory = ClientFactory::new(conf, Arc::new(PemStoreProvider), logger);

    match &cli.command {
        Command::Check => cmd::check::run(&factory),
        Command::Ping(args) => cmd::ping::run(&factory, args).await,
        Command::Url => cmd::url::run(&factory),
    }
}
