//! The single-attempt locator capability.

use async_trait::async_trait;

use crate::driver::Session;
use crate::error::Result;
use crate::selector::By;

// ============================================================================
// LocatorStrategy
// ============================================================================

/// One deterministic way to find a candidate element.
///
/// Implementations are stateless and reusable. A failed attempt has no side
/// effects: `Ok(None)` and `Err(_)` both mean "not found here".
#[async_trait]
pub trait LocatorStrategy<S: Session>: Send + Sync {
    /// Human-readable description used in diagnostics.
    fn describe(&self) -> String;

    /// Makes one immediate attempt, without retrying.
    async fn attempt(&self, session: &S) -> Result<Option<S::Element>>;
}

#[async_trait]
impl<S: Session> LocatorStrategy<S> for By {
    fn describe(&self) -> String {
        self.to_string()
    }

    async fn attempt(&self, session: &S) -> Result<Option<S::Element>> {
        session.find(self).await
    }
}

#[async_trait]
impl<S, T> LocatorStrategy<S> for Box<T>
where
    S: Session,
    T: LocatorStrategy<S> + ?Sized,
{
    fn describe(&self) -> String {
        (**self).describe()
    }

    async fn attempt(&self, session: &S) -> Result<Option<S::Element>> {
        (**self).attempt(session).await
    }
}
