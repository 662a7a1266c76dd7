//! Secure communication modes and the endpoint addressing derived from them.
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::errors::ConfigurationError;

/// Transport security used to talk to the search engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SecureMode {
    /// Plain HTTP.
    #[default]
    None,

    /// TLS with server authentication.
    Https,

    /// TLS with both server and client authentication.
    Mtls,
}

impl SecureMode {
    /// Configuration token selecting this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            SecureMode::None => "none",
            SecureMode::Https => "https",
            SecureMode::Mtls => "mtls",
        }
    }

    /// Decide the protocol scheme and certificate material the mode requires.
    pub fn resolve(&self) -> ResolvedMode {
        match self {
            SecureMode::None => ResolvedMode {
                mode: *self,
                scheme: Scheme::Http,
                requires_encryption_context: false,
                requires_client_certificate: false,
            },
            SecureMode::Https => ResolvedMode {
                mode: *self,
                scheme: Scheme::Https,
                requires_encryption_context: true,
                requires_client_certificate: false,
            },
            SecureMode::Mtls => ResolvedMode {
                mode: *self,
                scheme: Scheme::Https,
                requires_encryption_context: true,
                requires_client_certificate: true,
            },
        }
    }
}

impl fmt::Display for SecureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SecureMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(SecureMode::None),
            "https" => Ok(SecureMode::Https),
            "mtls" => Ok(SecureMode::Mtls),
            other => Err(ConfigurationError::UnknownSecureMode(other.to_string())),
        }
    }
}

impl TryFrom<String> for SecureMode {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SecureMode> for String {
    fn from(value: SecureMode) -> Self {
        value.as_str().to_string()
    }
}

/// Outcome of resolving a [`SecureMode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedMode {
    /// The mode that was resolved.
    pub mode: SecureMode,

    /// Protocol scheme to address the endpoint with.
    pub scheme: Scheme,

    /// A TLS encryption context must be built for the transport.
    pub requires_encryption_context: bool,

    /// The client must present a certificate during the handshake.
    pub requires_client_certificate: bool,
}

/// Protocol scheme of the search engine endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Address of the remote search engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,

    /// Path prefix for all requests, empty for the server root.
    pub base_path: String,
}

impl Endpoint {
    /// Render the endpoint as a URL with the given scheme.
    ///
    /// Non-empty base paths are rendered with exactly one leading slash.
    pub fn url(&self, scheme: Scheme) -> String {
        let path = self.base_path.trim_start_matches('/');
        if path.is_empty() {
            format!("{}://{}:{}", scheme, self.host, self.port)
        } else {
            format!("{}://{}:{}/{}", scheme, self.host, self.port, path)
        }
    }
}
