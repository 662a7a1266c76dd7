//! Lazily initialised HTTP(S) client for remote search engine endpoints.
//!
//! The client talks to the search engine in one of three transport security modes:
//!
//! - `none`: plain HTTP.
//! - `https`: TLS, validating the server certificate against the configured trust store.
//! - `mtls`: TLS as above, with the client also presenting a certificate from the key store.
//!
//! Configuration is captured once in a [`SearchClientConf`] and handed to a
//! [`ClientFactory`], which builds the pooled [`ClientHandle`] the first time it is
//! requested and shares it with all callers after that.
pub mod conf;
pub mod errors;
pub mod mode;
pub mod tls;
pub mod transport;

mod factory;
mod handle;

pub use self::conf::SearchClientConf;
pub use self::factory::ClientFactory;
pub use self::handle::ClientHandle;
pub use self::handle::InvalidResponse;
pub use self::handle::SearchResponse;
pub use self::mode::SecureMode;
