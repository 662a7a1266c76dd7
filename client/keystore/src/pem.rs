//! Stores backed by PEM encoded files.
use std::io::BufReader;

use anyhow::Context;
use anyhow::Result;
use rustls_pki_types::CertificateDer;

use crate::KeyMaterial;
use crate::KeyMaterialProvider;
use crate::StoreError;
use crate::StoreParameters;
use crate::TrustMaterial;

/// Load trust and key material from PEM files.
///
/// - Trust stores are CA bundles: one or more `CERTIFICATE` items.
/// - Key stores hold the client certificate chain followed by its private key
///   (PKCS#8, PKCS#1 or SEC1 encoded), in the same file.
#[derive(Clone, Copy, Debug, Default)]
pub struct PemStoreProvider;

impl KeyMaterialProvider for PemStoreProvider {
    fn key_material(&self, store: &StoreParameters) -> Result<KeyMaterial> {
        let path = store
            .location()
            .ok_or(StoreError::NotConfigured("key store"))?;
        let pem = read(path)?;
        let cert_chain = certificates(path, &pem)?;
        let key = rustls_pemfile::private_key(&mut BufReader::new(pem.as_slice()))
            .with_context(|| StoreError::Decode(path.to_string()))?
            .ok_or_else(|| StoreError::NoPrivateKey(path.to_string()))?;
        Ok(KeyMaterial { cert_chain, key })
    }

    fn trust_material(&self, store: &StoreParameters) -> Result<TrustMaterial> {
        let path = store
            .location()
            .ok_or(StoreError::NotConfigured("trust store"))?;
        let pem = read(path)?;
        let certificates = certificates(path, &pem)?;
        Ok(TrustMaterial { certificates })
    }
}

/// Decode all certificates in a PEM buffer, failing if there are none.
fn certificates(path: &str, pem: &[u8]) -> Result<Vec<CertificateDer<'static>>> {
    let mut reader = BufReader::new(pem);
    let certificates = rustls_pemfile::certs(&mut reader)
        .collect::<std::result::Result<Vec<_>, _>>()
        .with_context(|| StoreError::Decode(path.to_string()))?;
    if certificates.is_empty() {
        anyhow::bail!(StoreError::NoCertificates(path.to_string()));
    }
    Ok(certificates)
}

fn read(path: &str) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| StoreError::Open(path.to_string()))
}
