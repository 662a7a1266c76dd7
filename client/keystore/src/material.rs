//! Key material types and the interface to obtain them.
use anyhow::Result;
use rustls_pki_types::CertificateDer;
use rustls_pki_types::PrivateKeyDer;
use serde::Deserialize;
use serde::Serialize;

/// Location and options of a trust or key store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreParameters {
    /// Path to the store, if one is configured.
    #[serde(default)]
    pub location: Option<String>,
}

impl StoreParameters {
    /// Parameters for a store at the given location.
    pub fn at<S>(location: S) -> StoreParameters
    where
        S: Into<String>,
    {
        StoreParameters {
            location: Some(location.into()),
        }
    }

    /// Configured location, ignoring empty strings.
    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|location| !location.is_empty())
    }
}

/// Certificates trusted to sign server certificates.
#[derive(Clone, Debug)]
pub struct TrustMaterial {
    /// DER encoded trust anchors.
    pub certificates: Vec<CertificateDer<'static>>,
}

/// Identity presented by the client during mutual TLS handshakes.
#[derive(Debug)]
pub struct KeyMaterial {
    /// DER encoded client certificate, followed by any intermediate.
    pub cert_chain: Vec<CertificateDer<'static>>,

    /// Private key matching the first certificate in the chain.
    pub key: PrivateKeyDer<'static>,
}

impl Clone for KeyMaterial {
    fn clone(&self) -> Self {
        KeyMaterial {
            cert_chain: self.cert_chain.clone(),
            key: self.key.clone_key(),
        }
    }
}

/// Load trust and key material from configured stores.
///
/// Implementations may perform blocking I/O: material is only requested
/// while clients are being constructed.
pub trait KeyMaterialProvider: Send + Sync {
    /// Load the client identity from the key store.
    fn key_material(&self, store: &StoreParameters) -> Result<KeyMaterial>;

    /// Load the trust anchors from the trust store.
    fn trust_material(&self, store: &StoreParameters) -> Result<TrustMaterial>;
}
