//! Apply HTTP basic authentication credentials.
use std::fmt;

use super::TransportConfig;
use crate::conf::SearchClientConf;

/// Username and password for HTTP basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub password: String,
    pub user: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("password", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Attach credentials to the transport when a non-empty user is configured.
///
/// Credentials are not scoped to a host or port: every request made by the client carries them.
pub fn apply(conf: &SearchClientConf, transport: &mut TransportConfig) {
    transport.credentials = match conf.user.as_deref() {
        None | Some("") => None,
        Some(user) => Some(Credentials {
            password: conf.password.clone().unwrap_or_default(),
            user: user.to_string(),
        }),
    };
}
