//! Pooled HTTP(S) client shared by all users of a [`ClientFactory`](crate::ClientFactory).
use std::fmt;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use reqwest::header::HeaderMap;
use reqwest::Client;
use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::runtime::Handle;
use tokio::runtime::Runtime;
use tokio::sync::Semaphore;

use crate::errors::TransportError;
use crate::transport::IoThreads;
use crate::transport::TransportConfig;

/// Invalid response received from the search engine.
#[derive(Debug, thiserror::Error)]
#[error("invalid response received from the search engine: {response}")]
pub struct InvalidResponse {
    pub response: String,
}

/// Pooled HTTP(S) client for the search engine.
///
/// Requests are executed by a dedicated I/O runtime sized according to the
/// transport configuration. The number of requests in flight, and so of open
/// connections, never exceeds `max_total_connections` or `max_connections_per_route`.
/// The handle is safe to share across threads without synchronisation.
pub struct ClientHandle {
    client: Client,
    io: Handle,
    permits: Arc<Semaphore>,
    runtime: Option<Runtime>,
    server_url: String,
    transport: TransportConfig,
}

impl ClientHandle {
    /// Build the HTTP(S) client described by the transport configuration.
    pub fn build(server_url: String, transport: TransportConfig) -> Result<ClientHandle> {
        let mut client = Client::builder()
            .user_agent(transport.user_agent)
            .pool_max_idle_per_host(transport.max_connections_per_route);
        if let Some(timeout) = transport.connect_timeout {
            client = client.connect_timeout(timeout);
        }
        if let Some(timeout) = transport.socket_timeout {
            client = client.read_timeout(timeout);
        }
        if let Some(tls) = &transport.tls {
            let config = rustls::ClientConfig::clone(tls.config());
            client = client.use_preconfigured_tls(config);
        }
        let client = client.build().context(TransportError::Create)?;

        let mut runtime = tokio::runtime::Builder::new_multi_thread();
        runtime.enable_all().thread_name("searchclient-io");
        if let IoThreads::Fixed(threads) = transport.io_threads {
            runtime.worker_threads(threads.get());
        }
        let runtime = runtime.build().context(TransportError::Runtime)?;

        // All requests share the one route to the search engine, so both limits apply to it.
        let permits = transport
            .max_total_connections
            .min(transport.max_connections_per_route);
        let permits = Arc::new(Semaphore::new(permits));
        Ok(ClientHandle {
            client,
            io: runtime.handle().clone(),
            permits,
            runtime: Some(runtime),
            server_url: server_url.trim_end_matches('/').to_string(),
            transport,
        })
    }

    /// Start a DELETE request to the search engine.
    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Start a GET request to the search engine.
    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    /// Start a HEAD request to the search engine.
    pub fn head(&self, path: &str) -> RequestBuilder {
        self.request(Method::HEAD, path)
    }

    /// Start a POST request to the search engine.
    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    /// Start a PUT request to the search engine.
    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    /// Start a request to the search engine, relative to the server URL.
    ///
    /// Configured credentials are attached to the request.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.server_url, path.trim_start_matches('/'));
        let request = self.client.request(method, url);
        match &self.transport.credentials {
            None => request,
            Some(credentials) => request.basic_auth(&credentials.user, Some(&credentials.password)),
        }
    }

    /// Send a request on the I/O runtime and read the full response.
    ///
    /// The returned future can be awaited from any executor.
    pub async fn send(&self, request: RequestBuilder) -> Result<SearchResponse> {
        let request = request.build().context(TransportError::RequestFailed)?;
        let client = self.client.clone();
        let permits = Arc::clone(&self.permits);
        let task = self.io.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .context(TransportError::Cancelled)?;
            let response = client
                .execute(request)
                .await
                .context(TransportError::RequestFailed)?;
            let status = response.status();
            let headers = response.headers().clone();
            let body = response
                .bytes()
                .await
                .context(TransportError::ResponseRead)?
                .to_vec();
            Ok::<_, anyhow::Error>(SearchResponse {
                body,
                headers,
                status,
            })
        });
        task.await.context(TransportError::Cancelled)?
    }

    /// URL of the search engine, including the base path.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Transport configuration the client was built with.
    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }
}

impl Drop for ClientHandle {
    fn drop(&mut self) {
        // Dropping a runtime blocks, which panics from within async contexts.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientHandle")
            .field("server_url", &self.server_url)
            .field("transport", &self.transport)
            .finish()
    }
}

/// Response received from the search engine.
#[derive(Clone, Debug)]
pub struct SearchResponse {
    /// Raw body of the response.
    pub body: Vec<u8>,

    /// Headers of the response.
    pub headers: HeaderMap,

    /// HTTP status code of the response.
    pub status: StatusCode,
}

impl SearchResponse {
    /// Decode the body of the response as JSON.
    pub fn json<T>(&self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(&self.body).with_context(|| InvalidResponse {
            response: self.text(),
        })
    }

    /// Body of the response as (lossy) UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
