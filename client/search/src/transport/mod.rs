//! Introspectable configuration of the HTTP transport used by search clients.
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::mode::Scheme;
use crate::tls::TlsContext;

mod credentials;
mod pooling;

pub use self::credentials::apply as apply_credentials;
pub use self::credentials::Credentials;
pub use self::pooling::apply as apply_pooling;

/// String to set as the user agent in HTTP request.
static CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Number of worker threads driving the transport I/O.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoThreads {
    /// Use the transport's built-in default.
    Default,

    /// Use exactly this many worker threads.
    Fixed(NonZeroUsize),
}

/// Complete description of how the HTTP transport is set up.
///
/// The configuration is populated by the pooling, credentials and TLS
/// configurators and then used to build the [`ClientHandle`](crate::ClientHandle).
#[derive(Clone, Debug)]
pub struct TransportConfig {
    /// Timeout to establish new connections, if any.
    pub connect_timeout: Option<Duration>,

    /// Credentials attached to every request, whatever the host or port.
    pub credentials: Option<Credentials>,

    /// Worker threads driving the transport I/O.
    pub io_threads: IoThreads,

    /// Maximum number of connections kept for each route.
    pub max_connections_per_route: usize,

    /// Maximum number of requests in flight across all routes.
    pub max_total_connections: usize,

    /// Protocol scheme of the search engine endpoint.
    pub scheme: Scheme,

    /// Timeout waiting for data on established connections, if any.
    pub socket_timeout: Option<Duration>,

    /// TLS encryption context, for `https` and `mtls` modes only.
    pub tls: Option<TlsContext>,

    /// User agent sent with every request.
    pub user_agent: &'static str,
}

impl TransportConfig {
    /// Transport configuration with no pooling, credentials or TLS options applied.
    pub fn new(scheme: Scheme) -> TransportConfig {
        TransportConfig {
            connect_timeout: None,
            credentials: None,
            io_threads: IoThreads::Default,
            max_connections_per_route: 1,
            max_total_connections: 1,
            scheme,
            socket_timeout: None,
            tls: None,
            user_agent: CLIENT_USER_AGENT,
        }
    }
}
