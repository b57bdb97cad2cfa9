//! Execution-service keep-alive task.
//!
//! Free-tier hosts put an idle Scrapyd to sleep. Pinging `daemonstatus.json`
//! at a jittered interval keeps it warm so the first dispatch after a quiet
//! spell does not time out.
//!
//! ```text
//! loop
//!   ├─► sleep(random in [min, max])  ─┐
//!   └─► shutdown.cancelled() ─► exit  │
//!                                     └─► daemon_status() ─► log, never fatal
//! ```

use rand::Rng;
use scrapyd_client::ScrapydClient;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeepAliveConfig {
    pub min_interval: Duration,
    pub max_interval: Duration,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_secs(600),
            max_interval: Duration::from_secs(840),
        }
    }
}

impl KeepAliveConfig {
    /// Uniformly random delay in `[min_interval, max_interval]`.
    pub fn next_delay(&self) -> Duration {
        let min = self.min_interval.as_millis() as u64;
        let max = self.max_interval.as_millis() as u64;
        if min >= max {
            return self.min_interval;
        }
        Duration::from_millis(rand::rng().random_range(min..=max))
    }
}

/// Spawn the keep-alive loop; it exits when `shutdown` is cancelled.
pub fn spawn_keepalive(
    client: ScrapydClient,
    config: KeepAliveConfig,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(
            target_url = client.base_url(),
            min_secs = config.min_interval.as_secs(),
            max_secs = config.max_interval.as_secs(),
            "Scrapyd keep-alive started"
        );

        loop {
            let delay = config.next_delay();
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }

            match client.daemon_status().await {
                Ok(status) => tracing::debug!(
                    status = %status.status,
                    running = status.running,
                    pending = status.pending,
                    "Scrapyd keep-alive ping"
                ),
                Err(e) => tracing::warn!(error = %e, "Scrapyd keep-alive ping failed"),
            }
        }

        tracing::info!("Scrapyd keep-alive stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn every(ms: u64) -> KeepAliveConfig {
        KeepAliveConfig {
            min_interval: Duration::from_millis(ms),
            max_interval: Duration::from_millis(ms),
        }
    }

    #[test]
    fn test_delay_stays_in_range() {
        let config = KeepAliveConfig::default();
        for _ in 0..200 {
            let delay = config.next_delay();
            assert!(delay >= Duration::from_secs(600));
            assert!(delay <= Duration::from_secs(840));
        }
        assert_eq!(every(25).next_delay(), Duration::from_millis(25));
    }

    #[tokio::test]
    async fn test_failed_pings_do_not_stop_the_loop() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/daemonstatus.json")
            .with_status(503)
            .expect_at_least(2)
            .create_async()
            .await;

        let shutdown = CancellationToken::new();
        let handle = spawn_keepalive(ScrapydClient::new(server.url()), every(20), shutdown.clone());

        tokio::time::sleep(Duration::from_millis(300)).await;
        shutdown.cancel();
        handle.await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_cancel_before_first_tick_never_pings() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/daemonstatus.json")
            .expect(0)
            .create_async()
            .await;

        let shutdown = CancellationToken::new();
        let handle = spawn_keepalive(
            ScrapydClient::new(server.url()),
            KeepAliveConfig::default(),
            shutdown.clone(),
        );
        shutdown.cancel();
        handle.await.unwrap();

        mock.assert_async().await;
    }
}
