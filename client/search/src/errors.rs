//! Errors encountered while constructing search engine clients.

/// Invalid or incomplete configuration for the search client.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// Unable to load the client identity from the key store.
    #[error("unable to load the client identity from the key store")]
    KeyMaterial,

    /// The trust store holds no certificate usable as a trust anchor.
    #[error("the trust store holds no certificate usable as a trust anchor")]
    NoTrustAnchors,

    /// Unable to load trust anchors from the trust store.
    #[error("unable to load trust anchors from the trust store")]
    TrustMaterial,

    /// Unrecognised secure communications mode.
    #[error("unrecognised secure communications mode '{0}', expected one of: none, https, mtls")]
    // (mode,)
    UnknownSecureMode(String),
}

/// Unable to initialise the TLS encryption context.
#[derive(Debug, thiserror::Error)]
pub enum CryptoInitializationError {
    /// The client certificate and key were rejected by the TLS library.
    #[error("unable to configure the client certificate for mutual TLS")]
    ClientCertificate,

    /// The TLS library rejected the requested protocol versions.
    #[error("unable to pin the TLS context to the TLS 1.2 protocol")]
    ProtocolVersions,

    /// Unable to build the server certificate verifier from the trust anchors.
    #[error("unable to build the server certificate verifier")]
    ServerVerifier,
}

/// Errors creating or using the underlying HTTP transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Unable to create the HTTP(S) client.
    #[error("unable to create the HTTP(S) client")]
    Create,

    /// Unable to start the I/O runtime for the HTTP(S) client.
    #[error("unable to start the I/O runtime for the HTTP(S) client")]
    Runtime,

    /// The request to the search engine failed.
    #[error("the request to the search engine failed")]
    RequestFailed,

    /// Unable to read the response body from the search engine.
    #[error("unable to read the response body from the search engine")]
    ResponseRead,

    /// The request task was cancelled before completing.
    #[error("the request task was cancelled before completing")]
    Cancelled,
}
