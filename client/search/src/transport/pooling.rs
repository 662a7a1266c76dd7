//! Apply connection pooling, timeouts and I/O thread options.
use std::num::NonZeroUsize;
use std::time::Duration;

use slog::Logger;
use tokio::sync::Semaphore;

use super::IoThreads;
use super::TransportConfig;
use crate::conf::SearchClientConf;

/// Apply pool sizes, timeouts and I/O thread count from the configuration.
///
/// Thread counts that are not strictly positive fall back to the transport default.
/// Connection limits are clamped between one and the largest number of permits
/// the request limiter can track.
pub fn apply(conf: &SearchClientConf, transport: &mut TransportConfig, logger: &Logger) {
    transport.max_total_connections = connection_limit(conf.max_total_connections);
    transport.max_connections_per_route = connection_limit(conf.max_host_connections);
    transport.connect_timeout = timeout(conf.connection_timeout);
    transport.socket_timeout = timeout(conf.socket_timeout);

    let threads = usize::try_from(conf.thread_count)
        .ok()
        .and_then(NonZeroUsize::new);
    transport.io_threads = match threads {
        Some(threads) => IoThreads::Fixed(threads),
        None => {
            slog::debug!(
                logger,
                "Using default I/O thread count for the search HTTP client";
                "thread_count" => conf.thread_count,
            );
            IoThreads::Default
        }
    };
}

/// Pools need at least one connection to send any request.
fn connection_limit(limit: usize) -> usize {
    limit.clamp(1, Semaphore::MAX_PERMITS)
}

/// Convert a timeout in milliseconds, treating non-positive values as unset.
fn timeout(millis: i64) -> Option<Duration> {
    u64::try_from(millis)
        .ok()
        .filter(|millis| *millis > 0)
        .map(Duration::from_millis)
}
