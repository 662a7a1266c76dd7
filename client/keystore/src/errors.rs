//! Errors encountered while loading trust and key stores.

/// Errors loading trust or key material from a store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Unable to decode PEM items from the store at the given path.
    #[error("unable to decode PEM items from store at '{0}'")]
    // (path,)
    Decode(String),

    /// The store at the given path holds no certificates.
    #[error("the store at '{0}' holds no certificates")]
    // (path,)
    NoCertificates(String),

    /// The store at the given path holds no private key.
    #[error("the store at '{0}' holds no private key")]
    // (path,)
    NoPrivateKey(String),

    /// The location of the named store is not configured.
    #[error("the location of the {0} is not configured")]
    // (store,)
    NotConfigured(&'static str),

    /// Unable to read the store at the given path.
    #[error("unable to read store at '{0}'")]
    // (path,)
    Open(String),
}
