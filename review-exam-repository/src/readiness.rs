//! Startup readiness wait for the search service.
//!
//! In a container setup the search service often starts after the ETL job.
//! Before doing any work the job waits for the host name to resolve, then for
//! the service to answer a liveness ping. Each phase gets its own fixed
//! attempt budget with a constant interval between attempts.
//!
//! The wait is an explicit state machine:
//!
//! ```text
//! Unresolved --resolve ok--> Resolved --ping ok--> Ready
//!     |                         |
//!     +--budget exhausted--> Fatal <--budget exhausted--+
//! ```

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::SearchConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;

/// Attempt budget and spacing for each readiness phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per phase before giving up.
    pub max_attempts: u32,
    /// Pause between two attempts of the same phase.
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            interval: Duration::from_secs(1),
        }
    }
}

/// Resolves a host name to at least one socket address.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve(&self, host: &str, port: u16) -> io::Result<()>;
}

/// System DNS resolution through tokio.
#[derive(Debug, Default, Clone, Copy)]
pub struct DnsResolver;

#[async_trait]
impl HostResolver for DnsResolver {
    async fn resolve(&self, host: &str, port: u16) -> io::Result<()> {
        let mut addrs = tokio::net::lookup_host((host, port)).await?;
        addrs.next().map(|_| ()).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no address for {}", host))
        })
    }
}

#[derive(Debug)]
enum ReadinessState {
    Unresolved { attempt: u32 },
    Resolved { attempt: u32 },
    Ready,
    Fatal(SearchError),
}

struct Readiness<'a> {
    config: &'a SearchConfig,
    resolver: &'a dyn HostResolver,
    client: &'a dyn SearchEngineClient,
    policy: &'a RetryPolicy,
}

impl Readiness<'_> {
    async fn step(&self, state: ReadinessState) -> ReadinessState {
        match state {
            ReadinessState::Unresolved { attempt } => {
                match self.resolver.resolve(&self.config.host, self.config.port).await {
                    Ok(()) => {
                        info!(host = %self.config.host, "Resolved search service host");
                        ReadinessState::Resolved { attempt: 0 }
                    }
                    Err(e) => {
                        let failure =
                            format!("Could not resolve hostname {}: {}", self.config.host, e);
                        self.retry_or_fail(attempt, failure)
                            .await
                            .map_or_else(ReadinessState::Fatal, |next| {
                                ReadinessState::Unresolved { attempt: next }
                            })
                    }
                }
            }
            ReadinessState::Resolved { attempt } => {
                let failure = match self.client.ping().await {
                    Ok(true) => {
                        info!(url = %self.config.url(), "Successfully connected to search service");
                        return ReadinessState::Ready;
                    }
                    Ok(false) => "Liveness probe answered with an error status".to_string(),
                    Err(e) => format!("Connection attempt failed: {}", e),
                };

                self.retry_or_fail(attempt, failure)
                    .await
                    .map_or_else(ReadinessState::Fatal, |next| {
                        ReadinessState::Resolved { attempt: next }
                    })
            }
            terminal => terminal,
        }
    }

    /// Sleep and hand back the next attempt number, or the fatal error once the
    /// phase budget is spent. No sleep follows the last attempt.
    async fn retry_or_fail(&self, attempt: u32, failure: String) -> Result<u32, SearchError> {
        let next = attempt + 1;
        if next >= self.policy.max_attempts {
            return Err(SearchError::connection(format!(
                "{} (gave up after {} attempts)",
                failure, self.policy.max_attempts
            )));
        }

        warn!(
            attempt = next,
            max_attempts = self.policy.max_attempts,
            "{}, retrying in {:?}",
            failure,
            self.policy.interval
        );
        tokio::time::sleep(self.policy.interval).await;
        Ok(next)
    }
}

/// Block until the search service resolves and answers a ping.
///
/// # Returns
///
/// * `Ok(())` - The service is ready
/// * `Err(SearchError::ConnectionError)` - A phase exhausted its attempt budget
pub async fn wait_until_ready(
    config: &SearchConfig,
    resolver: &dyn HostResolver,
    client: &dyn SearchEngineClient,
    policy: &RetryPolicy,
) -> Result<(), SearchError> {
    let readiness = Readiness {
        config,
        resolver,
        client,
        policy,
    };

    let mut state = ReadinessState::Unresolved { attempt: 0 };
    loop {
        state = match readiness.step(state).await {
            ReadinessState::Ready => return Ok(()),
            ReadinessState::Fatal(err) => return Err(err),
            next => next,
        };
    }
}
