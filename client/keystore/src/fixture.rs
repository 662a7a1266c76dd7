//! Key material provider to use in unit tests.
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use anyhow::Result;

use crate::KeyMaterial;
use crate::KeyMaterialProvider;
use crate::PemStoreProvider;
use crate::StoreError;
use crate::StoreParameters;
use crate::TrustMaterial;

/// Provider returning preset material and counting requests made to it.
#[derive(Debug, Default)]
pub struct FixtureProvider {
    key: Option<KeyMaterial>,
    key_requests: AtomicUsize,
    trust: Option<TrustMaterial>,
    trust_requests: AtomicUsize,
}

impl FixtureProvider {
    /// Provider with no material: all requests fail.
    pub fn empty() -> FixtureProvider {
        FixtureProvider::default()
    }

    /// Provider with the test CA and client identity from the repository fixtures.
    pub fn pem() -> FixtureProvider {
        let trust = PemStoreProvider
            .trust_material(&Self::fixture_path("ca.pem"))
            .expect("test CA fixture must load");
        let key = PemStoreProvider
            .key_material(&Self::fixture_path("client.pem"))
            .expect("client identity fixture must load");
        FixtureProvider::empty().with_trust(trust).with_key(key)
    }

    /// Store parameters pointing at one of the repository's PEM fixtures.
    pub fn fixture_path(name: &str) -> StoreParameters {
        let path = format!("{}/../../fixtures/tls/{}", env!("CARGO_MANIFEST_DIR"), name);
        StoreParameters::at(path)
    }

    /// Number of times key material was requested.
    pub fn key_requests(&self) -> usize {
        self.key_requests.load(Ordering::SeqCst)
    }

    /// Number of times trust material was requested.
    pub fn trust_requests(&self) -> usize {
        self.trust_requests.load(Ordering::SeqCst)
    }

    /// Return the given key material when requested.
    pub fn with_key(mut self, key: KeyMaterial) -> Self {
        self.key = Some(key);
        self
    }

    /// Return the given trust material when requested.
    pub fn with_trust(mut self, trust: TrustMaterial) -> Self {
        self.trust = Some(trust);
        self
    }
}

impl KeyMaterialProvider for FixtureProvider {
    fn key_material(&self, _: &StoreParameters) -> Result<KeyMaterial> {
        self.key_requests.fetch_add(1, Ordering::SeqCst);
        match &self.key {
            Some(key) => Ok(key.clone()),
            None => anyhow::bail!(StoreError::NotConfigured("key store")),
        }
    }

    fn trust_material(&self, _: &StoreParameters) -> Result<TrustMaterial> {
        self.trust_requests.fetch_add(1, Ordering::SeqCst);
        match &self.trust {
            Some(trust) => Ok(trust.clone()),
            None => anyhow::bail!(StoreError::NotConfigured("trust store")),
        }
    }
}
