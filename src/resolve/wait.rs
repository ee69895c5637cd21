//! Bounded poll loops.
//!
//! There is no background polling: the caller's task runs each check and
//! sleeps between checks until the deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, sleep};
use tracing::trace;

use crate::driver::ElementHandle;
use crate::error::{Error, Result};

// ============================================================================
// Functions
// ============================================================================

/// Polls `check` until it yields `true` or `timeout` elapses.
///
/// `check` runs at least once, even with a zero timeout. Errors from
/// `check` count as `false`.
///
/// Returns `true` if the condition was met.
pub async fn wait_until<F, Fut>(timeout: Duration, poll_interval: Duration, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let deadline = Instant::now() + timeout;

    loop {
        if matches!(check().await, Ok(true)) {
            return true;
        }

        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        sleep(poll_interval.min(deadline - now)).await;
    }
}

/// Waits for `element` to be both displayed and enabled.
///
/// # Errors
///
/// Returns [`Error::NotInteractable`] naming `strategy` on timeout.
pub async fn wait_until_interactable<E: ElementHandle>(
    element: &E,
    strategy: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<()> {
    let ready = wait_until(timeout, poll_interval, move || async move {
        let displayed = element.is_displayed().await?;
        let enabled = element.is_enabled().await?;
        trace!(element_id = %element.id(), displayed, enabled, "Interactability poll");
        Ok(displayed && enabled)
    })
    .await;

    if ready {
        Ok(())
    } else {
        Err(Error::not_interactable(strategy, timeout.as_millis() as u64))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_zero_timeout_checks_once() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let met = wait_until(Duration::ZERO, Duration::from_millis(5), move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        })
        .await;

        assert!(!met);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_condition_met_after_polls() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let met = wait_until(Duration::from_secs(1), Duration::from_millis(1), move || async move {
            Ok(counter.fetch_add(1, Ordering::SeqCst) >= 2)
        })
        .await;

        assert!(met);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_errors_count_as_false() {
        let met = wait_until(Duration::from_millis(10), Duration::from_millis(2), || async {
            Err(Error::script_error("detached"))
        })
        .await;

        assert!(!met);
    }
}
