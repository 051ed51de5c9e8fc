//! # Lifecycle-State Waiter
//!
//! Blocks until a secret's lifecycle state settles.
//!
//! Secret activation is asynchronous for some secret kinds (private
//! certificate issuance in particular): the create call returns while the
//! secret is still in `pre_activation`. The waiter closes that gap by
//! polling `get_secret` on a fixed interval until the target state is
//! observed, a failure state is observed, or the deadline expires.
//!
//! The pending/target pair is a parameter because different secret kinds
//! settle differently — a public certificate ordered with manual DNS stays
//! in `pre_activation` until its challenge is validated out of band, so its
//! creation wait targets `pre_activation` itself.
//!
//! The waiter only ever reads. It takes no compensating action on failure;
//! cleanup of a half-created secret is the caller's decision.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::client::responses::{Secret, SecretState};
use crate::constants::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_WAIT_TIMEOUT_SECS};
use crate::error::StoreError;
use crate::observability::metrics;
use crate::store::SecretStore;

/// Errors produced by a lifecycle-state wait
#[derive(Debug, Error)]
pub enum WaitError {
    /// The secret vanished mid-wait; the creation is presumed lost and
    /// retrying cannot help
    #[error("secret {id} no longer exists")]
    Gone { id: String },

    /// The secret reached a terminal failure state
    #[error("secret {id} reached failure state '{state}'")]
    FailureState { id: String, state: SecretState },

    /// The deadline elapsed before the target state was observed
    #[error(
        "wait deadline of {timeout:?} exceeded before secret {id} reached '{target}' \
         (last observed state: '{last}')"
    )]
    Timeout {
        id: String,
        target: SecretState,
        timeout: Duration,
        last: SecretState,
    },

    /// The store reported an error other than not-found; propagated verbatim
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Polls a secret until it reaches a target lifecycle state
///
/// # Example
///
/// ```rust,ignore
/// let secret = StateWaiter::until_active()
///     .poll_interval(Duration::from_secs(5))
///     .wait(&client, &created.id)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct StateWaiter {
    /// State the secret is expected to sit in while settling
    pending: SecretState,
    /// State that ends the wait successfully
    target: SecretState,
    poll_interval: Duration,
    timeout: Duration,
}

impl StateWaiter {
    /// Create a waiter for the given pending/target pair with default timing
    #[must_use]
    pub fn new(pending: SecretState, target: SecretState) -> Self {
        Self {
            pending,
            target,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            timeout: Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS),
        }
    }

    /// Wait for a freshly created secret to activate
    #[must_use]
    pub fn until_active() -> Self {
        Self::new(SecretState::PreActivation, SecretState::Active)
    }

    /// Wait for a manually ordered public certificate to settle
    ///
    /// With manual DNS the order does not auto-advance: creation is complete
    /// once the secret is observable in `pre_activation`, and activation
    /// happens later via a validate-DNS-challenge action.
    #[must_use]
    pub fn until_ordered() -> Self {
        Self::new(SecretState::PreActivation, SecretState::PreActivation)
    }

    /// Override the interval between polls
    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the overall deadline
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Poll until the secret settles
    ///
    /// # Errors
    ///
    /// - [`WaitError::Gone`] if any poll reports not-found
    /// - [`WaitError::FailureState`] if `destroyed` is observed
    /// - [`WaitError::Timeout`] once the deadline is exhausted; the wait
    ///   never overshoots the deadline by more than one poll interval
    /// - [`WaitError::Store`] for any other store error, unretried
    pub async fn wait<S>(&self, store: &S, secret_id: &str) -> Result<Secret, WaitError>
    where
        S: SecretStore + ?Sized,
    {
        let start = tokio::time::Instant::now();

        loop {
            let secret = match store.get_secret(secret_id).await {
                Ok(secret) => secret,
                Err(StoreError::NotFound { .. }) => {
                    warn!(
                        secret.id = secret_id,
                        "secret disappeared while waiting for state '{}'", self.target
                    );
                    return Err(WaitError::Gone {
                        id: secret_id.to_string(),
                    });
                }
                Err(err) => return Err(WaitError::Store(err)),
            };
            metrics::increment_waiter_polls();

            let state = secret.state_description;
            if state == SecretState::Destroyed {
                metrics::increment_waiter_failures("failure_state");
                return Err(WaitError::FailureState {
                    id: secret_id.to_string(),
                    state,
                });
            }
            if state == self.target {
                debug!(
                    secret.id = secret_id,
                    state = %state,
                    waited_ms = start.elapsed().as_millis() as u64,
                    "secret reached target state"
                );
                return Ok(secret);
            }

            if state == self.pending {
                debug!(secret.id = secret_id, state = %state, "secret still settling");
            } else {
                // Unlisted intermediate states are treated as still-pending
                warn!(
                    secret.id = secret_id,
                    state = %state,
                    "unexpected state while waiting for '{}', continuing to poll", self.target
                );
            }

            if start.elapsed() + self.poll_interval >= self.timeout {
                metrics::increment_waiter_failures("timeout");
                return Err(WaitError::Timeout {
                    id: secret_id.to_string(),
                    target: self.target,
                    timeout: self.timeout,
                    last: state,
                });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_until_active_pair() {
        let waiter = StateWaiter::until_active();
        assert_eq!(waiter.pending, SecretState::PreActivation);
        assert_eq!(waiter.target, SecretState::Active);
        assert_eq!(
            waiter.poll_interval,
            Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS)
        );
        assert_eq!(waiter.timeout, Duration::from_secs(DEFAULT_WAIT_TIMEOUT_SECS));
    }

    #[test]
    fn test_until_ordered_targets_pre_activation() {
        let waiter = StateWaiter::until_ordered();
        assert_eq!(waiter.target, SecretState::PreActivation);
    }

    #[test]
    fn test_timing_overrides() {
        let waiter = StateWaiter::until_active()
            .poll_interval(Duration::from_secs(1))
            .timeout(Duration::from_secs(30));
        assert_eq!(waiter.poll_interval, Duration::from_secs(1));
        assert_eq!(waiter.timeout, Duration::from_secs(30));
    }
}
