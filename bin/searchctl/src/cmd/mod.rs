//! CLI interface for searchctl.
use clap::Parser;
use clap::Subcommand;

use crate::logging::LogOpt;

pub mod check;
pub mod ping;
pub mod url;

/// CLI definition for the searchctl binary.
#[derive(Debug, Parser)]
#[command(about)]
#[command(propagate_version = true)]
#[command(version)]
pub struct Cli {
    /// Path to the search client configuration file.
    #[arg(long, global = true, default_value_t = String::from("searchclient.yaml"))]
    pub config: String,

    /// Select the `searchctl` command to run.
    #[command(subcommand)]
    pub command: Command,

    /// Configure how `searchctl` logs.
    #[command(flatten)]
    pub log: LogOpt,
}

/// Select the `searchctl` command to run.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the search client and show its transport configuration.
    Check,

    /// Send a GET request to the search engine and show the response status.
    Ping(ping::PingArgs),

    /// Show the search engine URL and index names, without building the client.
    Url,
}
