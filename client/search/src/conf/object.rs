//! Data object storing the search client configuration.
use serde::Deserialize;
use serde::Serialize;

use searchclient_keystore::StoreParameters;

use crate::mode::Endpoint;
use crate::mode::SecureMode;

/// Configuration of the search engine client.
///
/// The object is set once, before the client is first requested, and never changes after.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchClientConf {
    /// Name of the index holding archived documents.
    #[serde(default = "SearchClientConf::default_archive_index_name")]
    pub archive_index_name: String,

    /// Path prefix for all requests to the search engine.
    #[serde(default)]
    pub base_path: String,

    /// Timeout, in milliseconds, to establish new connections.
    ///
    /// Zero or negative values leave connections without a timeout.
    #[serde(default = "SearchClientConf::default_connection_timeout")]
    pub connection_timeout: i64,

    /// Hostname of the search engine.
    pub host: String,

    /// Check the server certificate is issued for the configured host.
    ///
    /// Only relevant for `https` and `mtls` modes.
    #[serde(default = "SearchClientConf::default_host_name_verification")]
    pub host_name_verification: bool,

    /// Name of the index holding live documents.
    #[serde(default = "SearchClientConf::default_index_name")]
    pub index_name: String,

    /// Store holding the client identity, used by `mtls` mode only.
    #[serde(default)]
    pub keystore: StoreParameters,

    /// Maximum number of concurrent connections for each route.
    #[serde(default = "SearchClientConf::default_max_host_connections")]
    pub max_host_connections: usize,

    /// Maximum number of concurrent connections across all routes.
    #[serde(default = "SearchClientConf::default_max_total_connections")]
    pub max_total_connections: usize,

    /// Password for HTTP basic authentication.
    #[serde(default)]
    pub password: Option<String>,

    /// Port the search engine listens on.
    pub port: u16,

    /// Transport security for the connection.
    #[serde(default)]
    pub secure_comms: SecureMode,

    /// Timeout, in milliseconds, waiting for data on established connections.
    ///
    /// Zero or negative values leave reads without a timeout.
    #[serde(default = "SearchClientConf::default_socket_timeout")]
    pub socket_timeout: i64,

    /// Number of I/O worker threads, zero or negative for the transport default.
    #[serde(default)]
    pub thread_count: i32,

    /// Store holding the trust anchors, used by `https` and `mtls` modes.
    #[serde(default)]
    pub truststore: StoreParameters,

    /// Username for HTTP basic authentication, empty to disable authentication.
    #[serde(default)]
    pub user: Option<String>,
}

impl SearchClientConf {
    fn default_archive_index_name() -> String {
        String::from("archive")
    }

    fn default_connection_timeout() -> i64 {
        1000
    }

    fn default_host_name_verification() -> bool {
        true
    }

    fn default_index_name() -> String {
        String::from("alfresco")
    }

    fn default_max_host_connections() -> usize {
        3
    }

    fn default_max_total_connections() -> usize {
        30
    }

    fn default_socket_timeout() -> i64 {
        30000
    }
}

impl SearchClientConf {
    /// Address of the search engine.
    pub fn endpoint_address(&self) -> Endpoint {
        Endpoint {
            host: self.host.clone(),
            port: self.port,
            base_path: self.base_path.clone(),
        }
    }

    /// Define a configuration for the search engine at the given address.
    pub fn endpoint<S>(host: S, port: u16) -> SearchClientConfBuilder
    where
        S: Into<String>,
    {
        let conf = SearchClientConf {
            archive_index_name: Self::default_archive_index_name(),
            base_path: String::new(),
            connection_timeout: Self::default_connection_timeout(),
            host: host.into(),
            host_name_verification: Self::default_host_name_verification(),
            index_name: Self::default_index_name(),
            keystore: StoreParameters::default(),
            max_host_connections: Self::default_max_host_connections(),
            max_total_connections: Self::default_max_total_connections(),
            password: None,
            port,
            secure_comms: SecureMode::default(),
            socket_timeout: Self::default_socket_timeout(),
            thread_count: 0,
            truststore: StoreParameters::default(),
            user: None,
        };
        SearchClientConfBuilder { conf }
    }
}

/// Incrementally build [`SearchClientConf`] objects.
pub struct SearchClientConfBuilder {
    conf: SearchClientConf,
}

impl SearchClientConfBuilder {
    /// Set the path prefix for all requests.
    pub fn base_path<S: Into<String>>(mut self, base_path: S) -> Self {
        self.conf.base_path = base_path.into();
        self
    }

    /// All options are set, get a usable configuration object.
    pub fn conf(self) -> SearchClientConf {
        self.conf
    }

    /// Authenticate requests with HTTP basic authentication.
    pub fn credentials<U, P>(mut self, user: U, password: P) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        self.conf.user = Some(user.into());
        self.conf.password = Some(password.into());
        self
    }

    /// Enable or disable checking the server certificate matches the host.
    pub fn host_name_verification(mut self, enabled: bool) -> Self {
        self.conf.host_name_verification = enabled;
        self
    }

    /// Set the live and archive index names.
    pub fn indices<S1, S2>(mut self, index_name: S1, archive_index_name: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        self.conf.index_name = index_name.into();
        self.conf.archive_index_name = archive_index_name.into();
        self
    }

    /// Set the key store holding the client identity.
    pub fn keystore(mut self, keystore: StoreParameters) -> Self {
        self.conf.keystore = keystore;
        self
    }

    /// Set the connection pool limits.
    pub fn pool(mut self, max_total_connections: usize, max_host_connections: usize) -> Self {
        self.conf.max_total_connections = max_total_connections;
        self.conf.max_host_connections = max_host_connections;
        self
    }

    /// Select the transport security mode.
    pub fn secure_comms(mut self, mode: SecureMode) -> Self {
        self.conf.secure_comms = mode;
        self
    }

    /// Set the number of I/O worker threads.
    pub fn thread_count(mut self, thread_count: i32) -> Self {
        self.conf.thread_count = thread_count;
        self
    }

    /// Set the connection and socket timeouts, in milliseconds.
    pub fn timeouts(mut self, connection_timeout: i64, socket_timeout: i64) -> Self {
        self.conf.connection_timeout = connection_timeout;
        self.conf.socket_timeout = socket_timeout;
        self
    }

    /// Set the trust store holding the trust anchors.
    pub fn truststore(mut self, truststore: StoreParameters) -> Self {
        self.conf.truststore = truststore;
        self
    }
}

#[cfg(test)]
mod tests {
    use searchclient_keystore::StoreParameters;

    use super::SearchClientConf;
    use crate::mode::SecureMode;

    #[test]
    fn decode_defaults() {
        let conf: SearchClientConf =
            serde_yaml::from_str("host: search.internal\nport: 9200\n").unwrap();
        assert_eq!(conf, SearchClientConf::endpoint("search.internal", 9200).conf());
        assert_eq!(conf.secure_comms, SecureMode::None);
        assert!(conf.host_name_verification);
        assert_eq!(conf.user, None);
    }

    #[test]
    fn decode_full() {
        let conf: SearchClientConf = serde_yaml::from_str(
            r#"
host: search.internal
port: 9443
base_path: /repository
secure_comms: mtls
truststore:
  location: /etc/search/ca.pem
keystore:
  location: /etc/search/client.pem
user: alice
password: secret
max_total_connections: 50
max_host_connections: 10
connection_timeout: 2000
socket_timeout: 0
thread_count: 4
host_name_verification: false
index_name: live
archive_index_name: live-archive
"#,
        )
        .unwrap();
        let expected = SearchClientConf::endpoint("search.internal", 9443)
            .base_path("/repository")
            .secure_comms(SecureMode::Mtls)
            .truststore(StoreParameters::at("/etc/search/ca.pem"))
            .keystore(StoreParameters::at("/etc/search/client.pem"))
            .credentials("alice", "secret")
            .pool(50, 10)
            .timeouts(2000, 0)
            .thread_count(4)
            .host_name_verification(false)
            .indices("live", "live-archive")
            .conf();
        assert_eq!(conf, expected);
    }

    #[test]
    fn decode_unknown_secure_comms() {
        let error = serde_yaml::from_str::<SearchClientConf>(
            "host: search.internal\nport: 9200\nsecure_comms: tls1\n",
        )
        .unwrap_err();
        let message = error.to_string();
        assert!(message.contains("unrecognised secure communications mode 'tls1'"));
    }
}
