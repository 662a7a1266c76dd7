//! TLS encryption contexts for connections to the search engine.
//!
//! Contexts are pinned to TLS 1.2 and validate server certificates against
//! the configured trust store only: platform trust roots are never consulted.
//! For mutual TLS the client identity from the key store is presented to the server.
use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use rustls::client::WebPkiServerVerifier;
use rustls::crypto::CryptoProvider;
use rustls::ClientConfig;
use rustls::RootCertStore;
use slog::Logger;

use searchclient_keystore::KeyMaterialProvider;

use crate::conf::SearchClientConf;
use crate::errors::ConfigurationError;
use crate::errors::CryptoInitializationError;
use crate::mode::ResolvedMode;

mod verifier;


pub use self::verifier::SkipHostnameVerifier;

/// Encryption context to establish TLS connections with.
#[derive(Clone)]
pub struct TlsContext {
    client_certificate: bool,
    config: Arc<ClientConfig>,
    hostname_verification: bool,
}

impl TlsContext {
    /// The client presents a certificate to the server during handshakes.
    pub fn client_certificate(&self) -> bool {
        self.client_certificate
    }

    /// Configuration for the TLS library.
    pub fn config(&self) -> &Arc<ClientConfig> {
        &self.config
    }

    /// The server certificate must be issued for the host being connected to.
    pub fn hostname_verification(&self) -> bool {
        self.hostname_verification
    }
}

impl fmt::Debug for TlsContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsContext")
            .field("client_certificate", &self.client_certificate)
            .field("hostname_verification", &self.hostname_verification)
            .finish()
    }
}

/// Build [`TlsContext`]s for the configured secure communications mode.
pub struct TransportContextBuilder<'a> {
    conf: &'a SearchClientConf,
    logger: &'a Logger,
    provider: &'a dyn KeyMaterialProvider,
}

impl<'a> TransportContextBuilder<'a> {
    pub fn new(
        conf: &'a SearchClientConf,
        provider: &'a dyn KeyMaterialProvider,
        logger: &'a Logger,
    ) -> Self {
        TransportContextBuilder {
            conf,
            logger,
            provider,
        }
    }

    /// Build the encryption context the resolved mode requires, if any.
    ///
    /// Key material is only requested from the provider when the mode needs it.
    pub fn build(&self, mode: &ResolvedMode) -> Result<Option<TlsContext>> {
        if !mode.requires_encryption_context {
            return Ok(None);
        }

        let crypto = Arc::new(rustls::crypto::ring::default_provider());
        let verifier = self.server_verifier(&crypto)?;
        let builder = ClientConfig::builder_with_provider(crypto)
            .with_protocol_versions(&[&rustls::version::TLS12])
            .context(CryptoInitializationError::ProtocolVersions)?;

        let hostname_verification = self.conf.host_name_verification;
        let builder = if hostname_verification {
            builder.with_webpki_verifier(verifier)
        } else {
            slog::warn!(
                self.logger,
                "Hostname verification disabled for search engine connections";
                "host" => &self.conf.host,
                "secure_comms" => %mode.mode,
            );
            let verifier = Arc::new(SkipHostnameVerifier::new(verifier));
            builder.dangerous().with_custom_certificate_verifier(verifier)
        };

        let config = if mode.requires_client_certificate {
            let identity = self
                .provider
                .key_material(&self.conf.keystore)
                .context(ConfigurationError::KeyMaterial)?;
            slog::debug!(
                self.logger, "Adding configured client certificate";
                "chain_length" => identity.cert_chain.len(),
            );
            builder
                .with_client_auth_cert(identity.cert_chain, identity.key)
                .context(CryptoInitializationError::ClientCertificate)?
        } else {
            builder.with_no_client_auth()
        };

        Ok(Some(TlsContext {
            client_certificate: mode.requires_client_certificate,
            config: Arc::new(config),
            hostname_verification,
        }))
    }

    /// Verify server certificates against the configured trust anchors.
    fn server_verifier(&self, crypto: &Arc<CryptoProvider>) -> Result<Arc<WebPkiServerVerifier>> {
        let trust = self
            .provider
            .trust_material(&self.conf.truststore)
            .context(ConfigurationError::TrustMaterial)?;
        let mut roots = RootCertStore::empty();
        let (added, ignored) = roots.add_parsable_certificates(trust.certificates);
        slog::debug!(
            self.logger, "Adding configured trust anchors";
            "added" => added, "ignored" => ignored,
        );
        if added == 0 {
            anyhow::bail!(ConfigurationError::NoTrustAnchors);
        }
        WebPkiServerVerifier::builder_with_provider(Arc::new(roots), Arc::clone(crypto))
            .build()
            .context(CryptoInitializationError::ServerVerifier)
    }
}
