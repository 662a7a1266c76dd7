//! Trust and key material for search engine HTTP(S) clients.
//!
//! Clients connecting over TLS need trust anchors to validate the server certificate
//! and, for mutual TLS, a client identity to present to the server.
//! The [`KeyMaterialProvider`] interface decouples where this material is stored
//! from the clients that use it.
mod errors;
mod material;
mod pem;

#[cfg(any(test, feature = "test-fixture"))]
mod fixture;

pub use self::errors::StoreError;
pub use self::material::KeyMaterial;
pub use self::material::KeyMaterialProvider;
pub use self::material::StoreParameters;
pub use self::material::TrustMaterial;
pub use self::pem::PemStoreProvider;

#[cfg(any(test, feature = "test-fixture"))]
pub use self::fixture::FixtureProvider;

pub use rustls_pki_types::CertificateDer;
pub use rustls_pki_types::PrivateKeyDer;
