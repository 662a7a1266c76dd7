//! Load configuration from YAML files.
use std::fs::File;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use serde_yaml::Mapping;
use serde_yaml::Value;

use super::SearchClientConf;
use crate::mode::SecureMode;

/// Option selecting the transport security mode.
const SECURE_COMMS: &str = "secure_comms";

/// Errors loading search client configuration files.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unable to decode configuration from file at the given path.
    #[error("unable to decode configuration from file at '{0}'")]
    // (path,)
    Decode(String),

    /// Invalid value for an option in the configuration file at the given path.
    #[error("invalid value for option '{1}' in configuration file at '{0}'")]
    // (path, option)
    InvalidOption(String, &'static str),

    /// Unable to read configuration file at the given path.
    #[error("unable to read configuration file at '{0}'")]
    // (path,)
    Open(String),

    /// Configuration file not found at the given path.
    #[error("configuration file not found at '{0}'")]
    // (path,)
    PathNotFound(String),
}

/// Load search client configuration from the specified path.
///
/// The secure communications mode is resolved separately from the other options,
/// so an unrecognised mode is reported as a [`ConfigurationError`](crate::errors::ConfigurationError)
/// rather than a generic decoding failure.
pub fn load(path: &str) -> Result<SearchClientConf> {
    if !Path::new(path).exists() {
        anyhow::bail!(Error::PathNotFound(path.to_string()));
    }

    let file = File::open(path).with_context(|| Error::Open(path.into()))?;
    let mut options: Mapping =
        serde_yaml::from_reader(file).with_context(|| Error::Decode(path.into()))?;
    let mode = match options.remove(SECURE_COMMS) {
        None | Some(Value::Null) => SecureMode::default(),
        Some(mode) => {
            let mode: String = serde_yaml::from_value(mode)
                .with_context(|| Error::InvalidOption(path.into(), SECURE_COMMS))?;
            mode.parse::<SecureMode>()
                .with_context(|| Error::InvalidOption(path.into(), SECURE_COMMS))?
        }
    };

    let mut conf: SearchClientConf = serde_yaml::from_value(Value::Mapping(options))
        .with_context(|| Error::Decode(path.into()))?;
    conf.secure_comms = mode;
    Ok(conf)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::load;
    use super::Error;
    use crate::errors::ConfigurationError;
    use crate::mode::SecureMode;

    /// Write a configuration file unique to the calling test.
    fn write_conf(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "searchclient-{}-{}.yaml",
            name,
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_secure_comms() {
        let path = write_conf(
            "mtls",
            "host: search.internal\nport: 9443\nsecure_comms: mtls\n",
        );
        let conf = load(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(conf.secure_comms, SecureMode::Mtls);
        assert_eq!(conf.host, "search.internal");
        assert_eq!(conf.port, 9443);
    }

    #[test]
    fn load_without_secure_comms() {
        let path = write_conf("default", "host: search.internal\nport: 9200\n");
        let conf = load(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(conf.secure_comms, SecureMode::None);
    }

    #[test]
    fn missing_file() {
        let error = load("/path/to/no/searchclient.yaml").unwrap_err();
        match error.downcast_ref::<Error>() {
            Some(Error::PathNotFound(path)) => assert_eq!(path, "/path/to/no/searchclient.yaml"),
            _ => panic!("unexpected error: {:?}", error),
        }
    }

    #[test]
    fn secure_comms_not_a_string() {
        let path = write_conf(
            "nested",
            "host: search.internal\nport: 9200\nsecure_comms:\n  mode: https\n",
        );
        let error = load(path.to_str().unwrap()).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::InvalidOption(_, "secure_comms"))
        ));
        assert!(!error.is::<ConfigurationError>());
    }

    #[test]
    fn undecodable_file() {
        let path = format!("{}/../../fixtures/tls/ca.pem", env!("CARGO_MANIFEST_DIR"));
        let error = load(&path).unwrap_err();
        assert!(matches!(error.downcast_ref::<Error>(), Some(Error::Decode(_))));
    }

    #[test]
    fn unknown_secure_comms() {
        let path = write_conf(
            "tls1",
            "host: search.internal\nport: 9200\nsecure_comms: tls1\n",
        );
        let error = load(path.to_str().unwrap()).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        match error.downcast_ref::<ConfigurationError>() {
            Some(ConfigurationError::UnknownSecureMode(mode)) => assert_eq!(mode, "tls1"),
            _ => panic!("unexpected error: {:?}", error),
        }
        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::InvalidOption(_, "secure_comms"))
        ));
    }
}
