use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::Barrier;

use rustls::pki_types::ServerName;
use rustls::CertificateError;
use rustls::ClientConfig;
use rustls::ClientConnection;
use rustls::ServerConfig;
use rustls::ServerConnection;
use slog::o;
use slog::Discard;
use slog::Logger;
use tokio::sync::Semaphore;

use searchclient_keystore::FixtureProvider;
use searchclient_keystore::KeyMaterialProvider;
use searchclient_keystore::PemStoreProvider;

use super::ClientFactory;
use crate::conf::SearchClientConf;
use crate::errors::ConfigurationError;
use crate::mode::Scheme;
use crate::mode::SecureMode;
use crate::transport::Credentials;
use crate::transport::IoThreads;

fn conf(mode: SecureMode) -> SearchClientConf {
    SearchClientConf::endpoint("search.internal", 9200)
        .base_path("/repository")
        .secure_comms(mode)
        .truststore(FixtureProvider::fixture_path("ca.pem"))
        .keystore(FixtureProvider::fixture_path("client.pem"))
        .conf()
}

fn factory(conf: SearchClientConf, provider: &Arc<FixtureProvider>) -> ClientFactory {
    let logger = Logger::root(Discard, o!());
    ClientFactory::new(conf, provider.clone(), logger)
}

#[test]
fn server_url_http() {
    let provider = Arc::new(FixtureProvider::pem());
    let factory = factory(conf(SecureMode::None), &provider);
    assert_eq!(factory.server_url(), "http://search.internal:9200/repository");
}

#[test]
fn server_url_does_not_build_client() {
    let provider = Arc::new(FixtureProvider::pem());
    let factory = factory(conf(SecureMode::Mtls), &provider);
    assert_eq!(factory.server_url(), "https://search.internal:9200/repository");
    assert!(!factory.is_built());
    assert_eq!(provider.trust_requests(), 0);
    assert_eq!(provider.key_requests(), 0);
}

#[test]
fn index_names() {
    let provider = Arc::new(FixtureProvider::empty());
    let conf = SearchClientConf::endpoint("search.internal", 9200)
        .indices("live", "live-archive")
        .conf();
    let factory = factory(conf, &provider);
    assert_eq!(factory.index_name(), "live");
    assert_eq!(factory.archive_index_name(), "live-archive");
}

#[test]
fn client_none() {
    let provider = Arc::new(FixtureProvider::pem());
    let factory = factory(conf(SecureMode::None), &provider);
    let client = factory.client().unwrap();
    assert!(factory.is_built());
    assert_eq!(client.server_url(), "http://search.internal:9200/repository");
    assert_eq!(client.transport().scheme, Scheme::Http);
    assert!(client.transport().tls.is_none());
    assert_eq!(provider.trust_requests(), 0);
    assert_eq!(provider.key_requests(), 0);
}

#[test]
fn client_https() {
    let provider = Arc::new(FixtureProvider::pem());
    let factory = factory(conf(SecureMode::Https), &provider);
    let client = factory.client().unwrap();
    let tls = client.transport().tls.as_ref().expect("https requires TLS");
    assert_eq!(client.transport().scheme, Scheme::Https);
    assert!(!tls.client_certificate());
    assert!(tls.hostname_verification());
    assert_eq!(provider.trust_requests(), 1);
    assert_eq!(provider.key_requests(), 0);
}

#[test]
fn client_mtls() {
    let provider = Arc::new(FixtureProvider::pem());
    let factory = factory(conf(SecureMode::Mtls), &provider);
    let client = factory.client().unwrap();
    let tls = client.transport().tls.as_ref().expect("mtls requires TLS");
    assert_eq!(client.transport().scheme, Scheme::Https);
    assert!(tls.client_certificate());
    assert_eq!(provider.trust_requests(), 1);
    assert_eq!(provider.key_requests(), 1);
}

#[test]
fn client_mtls_without_hostname_verification() {
    let provider = Arc::new(FixtureProvider::pem());
    let mut conf = conf(SecureMode::Mtls);
    conf.host_name_verification = false;
    let factory = factory(conf, &provider);
    let client = factory.client().unwrap();
    let tls = client.transport().tls.as_ref().expect("mtls requires TLS");
    assert!(!tls.hostname_verification());
}

/// Complete a TLS handshake in memory between the client configuration and a server
/// presenting the identity stored in the named fixture.
fn handshake(
    config: Arc<ClientConfig>,
    identity: &str,
    name: &'static str,
) -> anyhow::Result<()> {
    let identity = PemStoreProvider.key_material(&FixtureProvider::fixture_path(identity))?;
    let crypto = Arc::new(rustls::crypto::ring::default_provider());
    let server = ServerConfig::builder_with_provider(crypto)
        .with_safe_default_protocol_versions()?
        .with_no_client_auth()
        .with_single_cert(identity.cert_chain, identity.key)?;
    let mut server = ServerConnection::new(Arc::new(server))?;
    let mut client = ClientConnection::new(config, ServerName::try_from(name)?)?;

    for _ in 0..16 {
        let mut records = Vec::new();
        while client.wants_write() {
            client.write_tls(&mut records)?;
        }
        let mut records = records.as_slice();
        while !records.is_empty() {
            server.read_tls(&mut records)?;
            server.process_new_packets()?;
        }

        let mut records = Vec::new();
        while server.wants_write() {
            server.write_tls(&mut records)?;
        }
        let mut records = records.as_slice();
        while !records.is_empty() {
            client.read_tls(&mut records)?;
            client.process_new_packets()?;
        }

        if !client.is_handshaking() && !server.is_handshaking() {
            return Ok(());
        }
    }
    anyhow::bail!("TLS handshake did not complete")
}

fn tls_config(host_name_verification: bool) -> Arc<ClientConfig> {
    let provider = Arc::new(FixtureProvider::pem());
    let mut conf = conf(SecureMode::Https);
    conf.host_name_verification = host_name_verification;
    let factory = factory(conf, &provider);
    let client = factory.client().unwrap();
    let tls = client.transport().tls.as_ref().expect("https requires TLS");
    Arc::clone(tls.config())
}

#[test]
fn handshake_matching_hostname() {
    handshake(tls_config(true), "server.pem", "search.internal").unwrap();
}

#[test]
fn handshake_rejects_other_hostname() {
    let error = handshake(tls_config(true), "server.pem", "other.internal").unwrap_err();
    assert!(matches!(
        error.downcast_ref::<rustls::Error>(),
        Some(rustls::Error::InvalidCertificate(
            CertificateError::NotValidForName | CertificateError::NotValidForNameContext { .. }
        ))
    ));
}

#[test]
fn handshake_other_hostname_without_verification() {
    handshake(tls_config(false), "server.pem", "other.internal").unwrap();
}

#[test]
fn handshake_untrusted_server_without_verification() {
    let error = handshake(tls_config(false), "rogue.pem", "search.internal").unwrap_err();
    assert!(matches!(
        error.downcast_ref::<rustls::Error>(),
        Some(rustls::Error::InvalidCertificate(CertificateError::UnknownIssuer))
    ));
}

#[test]
fn client_with_oversized_pool() {
    let provider = Arc::new(FixtureProvider::empty());
    let conf = SearchClientConf::endpoint("search.internal", 9200)
        .pool(usize::MAX, 3)
        .conf();
    let factory = factory(conf, &provider);
    let transport = factory.client().unwrap().transport();
    assert_eq!(transport.max_total_connections, Semaphore::MAX_PERMITS);
    assert_eq!(transport.max_connections_per_route, 3);
}

#[test]
fn client_is_built_once() {
    let provider = Arc::new(FixtureProvider::pem());
    let factory = factory(conf(SecureMode::Https), &provider);
    let first = factory.client().unwrap();
    let second = factory.client().unwrap();
    assert!(std::ptr::eq(first, second));
    assert_eq!(provider.trust_requests(), 1);
}

#[test]
fn client_is_built_once_concurrently() {
    const THREADS: usize = 16;
    let provider = Arc::new(FixtureProvider::pem());
    let factory = factory(conf(SecureMode::Mtls), &provider);
    let barrier = Barrier::new(THREADS);
    let clients: Vec<usize> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    let client = factory.client().unwrap();
                    client as *const _ as usize
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|worker| worker.join().unwrap())
            .collect()
    });
    assert!(clients.iter().all(|client| *client == clients[0]));
    assert_eq!(provider.trust_requests(), 1);
    assert_eq!(provider.key_requests(), 1);
}

#[test]
fn failed_build_is_not_cached() {
    let provider = Arc::new(FixtureProvider::empty());
    let factory = factory(conf(SecureMode::Https), &provider);
    let error = factory.client().unwrap_err();
    assert!(matches!(
        error.downcast_ref::<ConfigurationError>(),
        Some(ConfigurationError::TrustMaterial)
    ));
    assert!(!factory.is_built());

    let error = factory.client().unwrap_err();
    assert!(error.is::<ConfigurationError>());
    assert_eq!(provider.trust_requests(), 2);
}

#[test]
fn client_pooling_and_credentials() {
    let provider = Arc::new(FixtureProvider::empty());
    let conf = SearchClientConf::endpoint("search.internal", 9200)
        .pool(20, 5)
        .thread_count(2)
        .credentials("alice", "secret")
        .conf();
    let factory = factory(conf, &provider);
    let transport = factory.client().unwrap().transport();
    assert_eq!(transport.max_total_connections, 20);
    assert_eq!(transport.max_connections_per_route, 5);
    assert_eq!(
        transport.io_threads,
        IoThreads::Fixed(NonZeroUsize::new(2).unwrap())
    );
    let expected = Credentials {
        password: "secret".into(),
        user: "alice".into(),
    };
    assert_eq!(transport.credentials, Some(expected));
}

#[test]
fn client_default_io_threads() {
    let provider = Arc::new(FixtureProvider::empty());
    let conf = SearchClientConf::endpoint("search.internal", 9200)
        .thread_count(-1)
        .conf();
    let factory = factory(conf, &provider);
    let transport = factory.client().unwrap().transport();
    assert_eq!(transport.io_threads, IoThreads::Default);
    assert_eq!(transport.credentials, None);
}

#[test]
fn global_factory() {
    let provider = Arc::new(FixtureProvider::empty());
    ClientFactory::set_global(factory(conf(SecureMode::None), &provider));
    assert_eq!(
        ClientFactory::global().server_url(),
        "http://search.internal:9200/repository"
    );

    let again = factory(conf(SecureMode::Https), &provider);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        ClientFactory::set_global(again);
    }));
    assert!(result.is_err());
    assert_eq!(ClientFactory::global().conf().secure_comms, SecureMode::None);
}
