//! Send a GET request to the search engine.
use anyhow::Result;
use clap::Args;

use searchclient::ClientFactory;

/// Arguments for the `ping` command.
#[derive(Args, Debug)]
pub struct PingArgs {
    /// Path, relative to the server URL, to send the request to.
    #[arg(long, default_value_t = String::from("/"))]
    pub path: String,
}

/// Probe the search engine and report the response status.
///
/// Exits with code 2 when the search engine responds with an error status.
pub async fn run(factory: &ClientFactory, args: &PingArgs) -> Result<i32> {
    let client = factory.client()?;
    let response = client.send(client.get(&args.path)).await?;
    println!("{} {}", response.status, response.text());
    if response.status.is_client_error() || response.status.is_server_error() {
        return Ok(2);
    }
    Ok(0)
}
