// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Bounded-attempt, fixed-interval retry around a [`Transport`].

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::config::{CollectionConfig, DEFAULT_RETRY_INTERVAL_MS, DEFAULT_RETRY_TIMES};
use crate::error::{ExecuteError, LastFailure, TransportError};
use crate::request::PreparedRequest;
use crate::transport::{HttpResponse, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub attempts: u32,
    /// Fixed delay between two consecutive attempts.
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_RETRY_TIMES,
            interval: Duration::from_millis(DEFAULT_RETRY_INTERVAL_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, interval: Duration) -> Self {
        Self { attempts, interval }
    }

    /// Policy described by `config`, or `None` if its retry fields are
    /// malformed.
    pub fn from_config(config: &CollectionConfig) -> Option<Self> {
        Some(Self::new(config.attempts()?, config.interval()?))
    }
}

#[derive(Debug, Clone)]
pub struct RetryExecutor {
    transport: Arc<dyn Transport>,
}

impl RetryExecutor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Sends `request` until a 2xx response arrives or the policy runs out.
    ///
    /// Transport failures and non-2xx responses both count as failed
    /// attempts. The delay runs only between attempts, never after the
    /// last one. When every attempt fails, the most recent transport error
    /// is reported if there was one, otherwise the last response status.
    pub async fn execute(
        &self,
        request: &PreparedRequest,
        policy: RetryPolicy,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, ExecuteError> {
        if policy.attempts == 0 {
            error!(
                "Refusing to send {} {}: retryTimes is 0",
                request.method.as_str(),
                request.url
            );
            return Err(ExecuteError::NoAttempts);
        }

        let mut last_transport_error: Option<TransportError> = None;
        let mut last_response: Option<HttpResponse> = None;

        for attempt in 1..=policy.attempts {
            let time = Instant::now();
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ExecuteError::Cancelled),
                outcome = self.transport.send(request) => outcome,
            };
            let elapsed = time.elapsed();

            match outcome {
                Ok(response) if response.is_success() => {
                    debug!(
                        "{} {} succeeded with status {} in {} ms (attempt {attempt}/{})",
                        request.method.as_str(),
                        request.url,
                        response.status,
                        elapsed.as_millis(),
                        policy.attempts
                    );
                    return Ok(response);
                }
                Ok(response) => {
                    warn!(
                        "{} {} returned status {} {} (attempt {attempt}/{})",
                        request.method.as_str(),
                        request.url,
                        response.status,
                        response.status_text,
                        policy.attempts
                    );
                    last_response = Some(response);
                }
                Err(e) => {
                    warn!(
                        "{} {} failed after {} ms: {e} (attempt {attempt}/{})",
                        request.method.as_str(),
                        request.url,
                        elapsed.as_millis(),
                        policy.attempts
                    );
                    last_transport_error = Some(e);
                }
            }

            if attempt < policy.attempts {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(ExecuteError::Cancelled),
                    _ = tokio::time::sleep(policy.interval) => {}
                }
            }
        }

        let last = match (last_transport_error, last_response) {
            (Some(e), _) => LastFailure::Transport(e),
            (None, Some(response)) => LastFailure::Status {
                status: response.status,
                status_text: response.status_text,
            },
            (None, None) => return Err(ExecuteError::NoAttempts),
        };
        error!(
            "{} {} failed after {} attempt(s): {last}",
            request.method.as_str(),
            request.url,
            policy.attempts
        );
        Err(ExecuteError::Exhausted {
            attempts: policy.attempts,
            last,
        })
    }
}
