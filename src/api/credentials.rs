//! Shared access token with proactive renewal
//!
//! A [`CredentialManager`] authenticates once per token lifetime. All callers
//! during a run share the cached token; a background task swaps in a fresh one
//! [`RENEW_INTERVAL`] before the current one expires.
//!
//! The renewal task is released through a [`RenewalGuard`], so an import run
//! stops renewing on every exit path.

use crate::api::auth::TokenProvider;
use crate::error::{ImportError, ImportResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex, Weak};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Safety margin subtracted from the token lifetime when scheduling renewal
pub const RENEW_INTERVAL: Duration = Duration::from_secs(60);

/// Longest renewal delay that will be scheduled (2^31 - 1 ms)
pub const MAX_TIMER_DELAY: Duration = Duration::from_millis(i32::MAX as u64);

const MIN_RENEWAL_DELAY: Duration = Duration::from_secs(1);

/// Delay until a token with the given lifetime should be renewed
pub fn renewal_delay(expires_in: u64) -> Duration {
    Duration::from_secs(expires_in)
        .saturating_sub(RENEW_INTERVAL)
        .clamp(MIN_RENEWAL_DELAY, MAX_TIMER_DELAY)
}

enum TokenState {
    Empty,
    Ready(String),
    Failed(String),
}

/// Token state tagged with the generation it was obtained in
struct Slot {
    generation: u64,
    token: TokenState,
}

struct Inner {
    provider: Arc<dyn TokenProvider>,
    state: Mutex<Slot>,
    /// Bumped by `stop_renewal`; slots from older generations are discarded
    generation: AtomicU64,
    renewal: StdMutex<Option<JoinHandle<()>>>,
}

impl Inner {
    async fn store(&self, token: TokenState) {
        *self.state.lock().await = Slot {
            generation: self.generation.load(Ordering::SeqCst),
            token,
        };
    }

    fn abort_renewal(&self) -> bool {
        let handle = match self.renewal.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match handle {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.abort_renewal();
    }
}

/// Owner of the access token used by every Management API call
#[derive(Clone)]
pub struct CredentialManager {
    inner: Arc<Inner>,
}

impl CredentialManager {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            inner: Arc::new(Inner {
                provider,
                state: Mutex::new(Slot {
                    generation: 0,
                    token: TokenState::Empty,
                }),
                generation: AtomicU64::new(0),
                renewal: StdMutex::new(None),
            }),
        }
    }

    /// Get the current token, authenticating on first use
    ///
    /// Concurrent callers wait on the same request. A failed authentication
    /// is remembered and returned to every later caller without retrying.
    pub async fn acquire(&self) -> ImportResult<String> {
        let mut slot = self.inner.state.lock().await;
        let generation = self.inner.generation.load(Ordering::SeqCst);
        if slot.generation != generation {
            *slot = Slot {
                generation,
                token: TokenState::Empty,
            };
        }

        match &slot.token {
            TokenState::Ready(token) => return Ok(token.clone()),
            TokenState::Failed(reason) => {
                return Err(ImportError::AuthenticationFailed(reason.clone()))
            }
            TokenState::Empty => {}
        }

        debug!("Requesting access token");
        match self.inner.provider.request_token().await {
            Ok(token) => {
                slot.token = TokenState::Ready(token.access_token.clone());
                drop(slot);
                self.schedule_renewal(token.expires_in);
                Ok(token.access_token)
            }
            Err(e) => {
                slot.token = TokenState::Failed(failure_reason(&e));
                Err(e)
            }
        }
    }

    /// Check if a renewal is currently scheduled
    pub fn is_renewal_scheduled(&self) -> bool {
        match self.inner.renewal.lock() {
            Ok(slot) => slot.as_ref().is_some_and(|h| !h.is_finished()),
            Err(_) => false,
        }
    }

    /// Cancel the pending renewal and forget the cached token
    ///
    /// The token is not revoked remotely; the next [`acquire`](Self::acquire)
    /// authenticates again, even if a caller held the token lock meanwhile.
    pub fn stop_renewal(&self) {
        if self.inner.abort_renewal() {
            debug!("Cancelled token renewal");
        }
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Stop renewal when the returned guard goes out of scope
    pub fn renewal_guard(&self) -> RenewalGuard<'_> {
        RenewalGuard { manager: self }
    }

    fn schedule_renewal(&self, expires_in: u64) {
        let delay = renewal_delay(expires_in);
        debug!(delay_secs = delay.as_secs(), "Scheduling token renewal");

        let handle = tokio::spawn(renew_loop(Arc::downgrade(&self.inner), delay));
        let previous = match self.inner.renewal.lock() {
            Ok(mut slot) => slot.replace(handle),
            Err(poisoned) => poisoned.into_inner().replace(handle),
        };
        if let Some(previous) = previous {
            previous.abort();
        }
    }
}

/// Stops token renewal on drop
pub struct RenewalGuard<'a> {
    manager: &'a CredentialManager,
}

impl Drop for RenewalGuard<'_> {
    fn drop(&mut self) {
        self.manager.stop_renewal();
    }
}

async fn renew_loop(weak: Weak<Inner>, mut delay: Duration) {
    loop {
        tokio::time::sleep(delay).await;

        let Some(inner) = weak.upgrade() else {
            return;
        };

        // The old token stays readable while the new one is requested.
        match inner.provider.request_token().await {
            Ok(token) => {
                delay = renewal_delay(token.expires_in);
                inner.store(TokenState::Ready(token.access_token)).await;
                debug!(next_renewal_secs = delay.as_secs(), "Renewed access token");
            }
            Err(e) => {
                warn!(error = %e, "Token renewal failed");
                inner.store(TokenState::Failed(failure_reason(&e))).await;
                return;
            }
        }
    }
}

fn failure_reason(error: &ImportError) -> String {
    match error {
        ImportError::AuthenticationFailed(reason) => reason.clone(),
        other => other.to_string(),
    }
}
