//! Lazily build and share the search engine client.
//!
//! A [`ClientFactory`] holds the immutable client configuration and builds the
//! [`ClientHandle`] the first time it is requested.
//! All later requests, from any thread, observe that same handle.
//!
//! Construction happens under a once-only initialisation guard:
//!
//! - When many threads request the client before it exists, exactly one of them
//!   builds it while the others wait for the outcome.
//! - When the build fails nothing is cached: the error is returned to the caller
//!   and the next request attempts a fresh build from the same configuration.
use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::OnceCell;
use slog::Logger;

use searchclient_keystore::KeyMaterialProvider;

use crate::conf::SearchClientConf;
use crate::handle::ClientHandle;
use crate::mode::ResolvedMode;
use crate::tls::TransportContextBuilder;
use crate::transport;
use crate::transport::TransportConfig;

#[cfg(test)]
mod tests;

/// Singleton instance of the process-wide client factory.
static GLOBAL_FACTORY: OnceCell<ClientFactory> = OnceCell::new();

/// Build, cache and share the client to the search engine.
pub struct ClientFactory {
    client: OnceCell<ClientHandle>,
    conf: SearchClientConf,
    logger: Logger,
    mode: ResolvedMode,
    provider: Arc<dyn KeyMaterialProvider>,
}

impl ClientFactory {
    /// Create a factory for the given configuration.
    ///
    /// No client, connection pool or encryption context is created until
    /// the client is first requested.
    pub fn new(
        conf: SearchClientConf,
        provider: Arc<dyn KeyMaterialProvider>,
        logger: Logger,
    ) -> ClientFactory {
        let mode = conf.secure_comms.resolve();
        ClientFactory {
            client: OnceCell::new(),
            conf,
            logger,
            mode,
            provider,
        }
    }

    /// Name of the index holding archived documents.
    pub fn archive_index_name(&self) -> &str {
        &self.conf.archive_index_name
    }

    /// Get the search engine client, building it on first use.
    pub fn client(&self) -> Result<&ClientHandle> {
        self.client.get_or_try_init(|| self.build())
    }

    /// Configuration the factory builds clients with.
    pub fn conf(&self) -> &SearchClientConf {
        &self.conf
    }

    /// Name of the index holding live documents.
    pub fn index_name(&self) -> &str {
        &self.conf.index_name
    }

    /// Check if the client was already built.
    pub fn is_built(&self) -> bool {
        self.client.get().is_some()
    }

    /// URL of the search engine, without building the client.
    pub fn server_url(&self) -> String {
        self.conf.endpoint_address().url(self.mode.scheme)
    }
}

impl ClientFactory {
    /// Get the globally set [`ClientFactory`] instance.
    ///
    /// # Panics
    ///
    /// Panics if no [`ClientFactory`] was set during process initialisation.
    pub fn global() -> &'static ClientFactory {
        GLOBAL_FACTORY
            .get()
            .expect("global search client factory is not initialised")
    }

    /// Set the [`ClientFactory`] instance for the process to fetch with [`ClientFactory::global`].
    ///
    /// # Panics
    ///
    /// Panics if a [`ClientFactory`] has already been set.
    pub fn set_global(factory: ClientFactory) {
        slog::trace!(
            factory.logger,
            "Initialising global search client factory for the process";
            "url" => factory.server_url(),
        );
        if GLOBAL_FACTORY.set(factory).is_err() {
            panic!("global search client factory already initialised");
        }
    }
}

impl ClientFactory {
    /// Build a new client from the configuration.
    fn build(&self) -> Result<ClientHandle> {
        let server_url = self.server_url();
        slog::debug!(
            self.logger, "Creating search engine client";
            "url" => &server_url,
            "secure_comms" => %self.mode.mode,
        );

        let mut config = TransportConfig::new(self.mode.scheme);
        transport::apply_pooling(&self.conf, &mut config, &self.logger);
        transport::apply_credentials(&self.conf, &mut config);
        config.tls = TransportContextBuilder::new(&self.conf, self.provider.as_ref(), &self.logger)
            .build(&self.mode)?;

        let client = ClientHandle::build(server_url, config)?;
        slog::info!(
            self.logger, "Search engine client initialised";
            "url" => client.server_url(),
            "secure_comms" => %self.mode.mode,
        );
        Ok(client)
    }
}
