//! Show the search engine URL and index names.
use anyhow::Result;

use searchclient::ClientFactory;

/// Print the endpoint details known to the factory without building the client.
pub fn run(factory: &ClientFactory) -> Result<i32> {
    println!("Server URL: {}", factory.server_url());
    println!("Index: {}", factory.index_name());
    println!("Archive index: {}", factory.archive_index_name());
    Ok(0)
}
