//! Build the search client and show its transport configuration.
use std::time::Duration;

use anyhow::Result;

use searchclient::transport::IoThreads;
use searchclient::ClientFactory;

/// Build the client, failing on any configuration error, and describe the result.
pub fn run(factory: &ClientFactory) -> Result<i32> {
    let client = factory.client()?;
    let transport = client.transport();
    println!("Server URL: {}", client.server_url());
    println!("Secure communications: {}", factory.conf().secure_comms);
    match &transport.tls {
        None => println!("TLS: disabled"),
        Some(tls) => {
            println!("TLS: enabled (TLS 1.2)");
            println!("  Client certificate: {}", yes_no(tls.client_certificate()));
            println!(
                "  Hostname verification: {}",
                yes_no(tls.hostname_verification())
            );
        }
    }
    println!("Max connections: {}", transport.max_total_connections);
    println!(
        "Max connections per route: {}",
        transport.max_connections_per_route
    );
    match transport.io_threads {
        IoThreads::Default => println!("I/O threads: transport default"),
        IoThreads::Fixed(threads) => println!("I/O threads: {}", threads),
    }
    println!("Connect timeout: {}", timeout(transport.connect_timeout));
    println!("Socket timeout: {}", timeout(transport.socket_timeout));
    match &transport.credentials {
        None => println!("Credentials: none"),
        Some(credentials) => {
            println!("Credentials: basic authentication as '{}'", credentials.user)
        }
    }
    Ok(0)
}

fn timeout(timeout: Option<Duration>) -> String {
    match timeout {
        None => "none".to_string(),
        Some(timeout) => format!("{}ms", timeout.as_millis()),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
