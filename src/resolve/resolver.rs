//! The fallback resolver.

use std::time::Duration;

use tracing::{debug, warn};

use crate::driver::{ElementHandle, ResolverOptions, Session};
use crate::error::{Error, Result};

use super::strategy::LocatorStrategy;
use super::wait::wait_until_interactable;

// ============================================================================
// Attempt Records
// ============================================================================

/// How one strategy fared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Candidate found and interactable.
    Found,
    /// Nothing matched, or the lookup itself failed.
    NotFound,
    /// Candidate found but never became visible and enabled.
    NotInteractable,
}

/// Diagnostic record of one strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionAttempt {
    /// Position of the strategy in the list.
    pub index: usize,
    /// The strategy's description.
    pub strategy: String,
    /// What happened.
    pub outcome: AttemptOutcome,
    /// Underlying error text, if any.
    pub detail: Option<String>,
}

/// A resolved element and the attempts that led to it.
#[derive(Debug, Clone)]
pub struct Resolved<E> {
    /// The interactable element.
    pub element: E,
    /// Index of the winning strategy.
    pub index: usize,
    /// Every attempt made, the winner last.
    pub attempts: Vec<ResolutionAttempt>,
}

// ============================================================================
// FallbackResolver
// ============================================================================

/// Tries locator strategies in order until one yields an interactable element.
///
/// Each strategy gets exactly one lookup. A found candidate is then polled
/// until it is displayed and enabled, up to the wait timeout. The first
/// strategy to pass wins and later strategies are never tried.
///
/// # Example
///
/// ```ignore
/// let resolver = FallbackResolver::from_options(&options);
/// let state = resolver
///     .resolve(&session, &[By::id("state"), By::name("State")])
///     .await?;
/// state.select_by_text("Goa").await?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackResolver {
    timeout: Duration,
    poll_interval: Duration,
}

impl Default for FallbackResolver {
    fn default() -> Self {
        Self::from_options(&ResolverOptions::default())
    }
}

impl FallbackResolver {
    /// Creates a resolver with the given per-strategy wait.
    #[inline]
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Creates a resolver from options.
    #[inline]
    #[must_use]
    pub fn from_options(options: &ResolverOptions) -> Self {
        Self::new(options.wait_timeout, options.poll_interval)
    }

    /// Per-strategy interactability wait.
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Poll interval.
    #[inline]
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Resolves the first interactable element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotResolvable`] when every strategy fails.
    pub async fn resolve<S, L>(&self, session: &S, strategies: &[L]) -> Result<S::Element>
    where
        S: Session,
        L: LocatorStrategy<S>,
    {
        self.resolve_with_report(session, strategies)
            .await
            .map(|resolved| resolved.element)
    }

    /// Resolves the first interactable element, keeping the attempt log.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotResolvable`] when every strategy fails. Its
    /// cause is the first [`Error::NotInteractable`] if any candidate was
    /// found, otherwise the first lookup failure.
    pub async fn resolve_with_report<S, L>(
        &self,
        session: &S,
        strategies: &[L],
    ) -> Result<Resolved<S::Element>>
    where
        S: Session,
        L: LocatorStrategy<S>,
    {
        let mut attempts = Vec::with_capacity(strategies.len());
        let mut first_failure: Option<Error> = None;
        let mut first_not_interactable: Option<Error> = None;

        for (index, strategy) in strategies.iter().enumerate() {
            let name = strategy.describe();

            let candidate = match strategy.attempt(session).await {
                Ok(Some(element)) => element,
                Ok(None) => {
                    debug!(index, strategy = %name, "Strategy matched nothing");
                    attempts.push(ResolutionAttempt {
                        index,
                        strategy: name.clone(),
                        outcome: AttemptOutcome::NotFound,
                        detail: None,
                    });
                    first_failure.get_or_insert_with(|| Error::element_not_found(name));
                    continue;
                }
                Err(e) => {
                    debug!(index, strategy = %name, error = %e, "Strategy lookup failed");
                    attempts.push(ResolutionAttempt {
                        index,
                        strategy: name,
                        outcome: AttemptOutcome::NotFound,
                        detail: Some(e.to_string()),
                    });
                    first_failure.get_or_insert(e);
                    continue;
                }
            };

            match wait_until_interactable(&candidate, &name, self.timeout, self.poll_interval).await
            {
                Ok(()) => {
                    debug!(index, strategy = %name, element_id = %candidate.id(), "Resolved element");
                    attempts.push(ResolutionAttempt {
                        index,
                        strategy: name,
                        outcome: AttemptOutcome::Found,
                        detail: None,
                    });
                    return Ok(Resolved {
                        element: candidate,
                        index,
                        attempts,
                    });
                }
                Err(e) => {
                    debug!(index, strategy = %name, "Candidate never became interactable");
                    attempts.push(ResolutionAttempt {
                        index,
                        strategy: name,
                        outcome: AttemptOutcome::NotInteractable,
                        detail: Some(e.to_string()),
                    });
                    first_not_interactable.get_or_insert(e);
                }
            }
        }

        let target = strategies
            .iter()
            .map(|strategy| strategy.describe())
            .collect::<Vec<_>>()
            .join(" | ");
        warn!(attempted = strategies.len(), %target, "All locator strategies exhausted");

        Err(Error::element_not_resolvable(
            target,
            strategies.len(),
            first_not_interactable.or(first_failure),
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use crate::driver::{ElementHandle, ScriptArg, ScriptValue};
    use crate::identifiers::ElementId;
    use crate::selector::By;

    #[derive(Debug, Clone)]
    struct StubElement {
        id: ElementId,
        interactable: bool,
    }

    #[async_trait]
    impl ElementHandle for StubElement {
        fn id(&self) -> &ElementId {
            &self.id
        }
        async fn is_displayed(&self) -> Result<bool> {
            Ok(self.interactable)
        }
        async fn is_enabled(&self) -> Result<bool> {
            Ok(true)
        }
        async fn is_selected(&self) -> Result<bool> {
            Ok(false)
        }
        async fn value(&self) -> Result<Option<String>> {
            Ok(None)
        }
        async fn clear(&self) -> Result<()> {
            Ok(())
        }
        async fn send_keys(&self, _text: &str) -> Result<()> {
            Ok(())
        }
        async fn click(&self) -> Result<()> {
            Ok(())
        }
        async fn select_by_text(&self, _text: &str) -> Result<()> {
            Ok(())
        }
        async fn selected_text(&self) -> Result<Option<String>> {
            Ok(None)
        }
    }

    /// Answers `By::Id` lookups from a fixed table and fails `By::XPath`.
    #[derive(Default)]
    struct StubSession {
        elements: Vec<(String, bool)>,
        lookups: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Session for StubSession {
        type Element = StubElement;

        async fn find(&self, by: &By) -> Result<Option<StubElement>> {
            self.lookups.lock().push(by.to_string());
            if let By::XPath(_) = by {
                return Err(Error::script_error("xpath unsupported"));
            }
            Ok(self
                .elements
                .iter()
                .find(|(id, _)| id == by.value())
                .map(|(id, interactable)| StubElement {
                    id: ElementId::new(id.clone()),
                    interactable: *interactable,
                }))
        }
        async fn find_all(&self, _by: &By) -> Result<Vec<StubElement>> {
            Ok(Vec::new())
        }
        async fn execute(
            &self,
            _script: &str,
            _args: Vec<ScriptArg<StubElement>>,
        ) -> Result<ScriptValue<StubElement>> {
            Ok(ScriptValue::Null)
        }
        async fn frame_count(&self) -> Result<usize> {
            Ok(0)
        }
        async fn frame(&self, index: usize) -> Result<Self> {
            Err(Error::frame_switch_failed(format!("no frame {index}")))
        }
        async fn main_frame(&self) -> Result<Self> {
            Err(Error::frame_switch_failed("stub"))
        }
        async fn screenshot(&self) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    fn session(elements: &[(&str, bool)]) -> StubSession {
        StubSession {
            elements: elements
                .iter()
                .map(|(id, ok)| ((*id).to_string(), *ok))
                .collect(),
            lookups: Arc::default(),
        }
    }

    fn resolver() -> FallbackResolver {
        FallbackResolver::new(Duration::from_millis(20), Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_first_strategy_short_circuits() {
        let session = session(&[("a", true), ("b", true)]);
        let resolved = resolver()
            .resolve_with_report(&session, &[By::id("a"), By::id("b")])
            .await
            .unwrap();

        assert_eq!(resolved.index, 0);
        assert_eq!(resolved.element.id().as_str(), "a");
        assert_eq!(session.lookups.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_falls_through_to_later_strategy() {
        let session = session(&[("c", true)]);
        let resolved = resolver()
            .resolve_with_report(&session, &[By::id("a"), By::xpath("//x"), By::id("c")])
            .await
            .unwrap();

        assert_eq!(resolved.index, 2);
        let outcomes: Vec<_> = resolved.attempts.iter().map(|a| a.outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                AttemptOutcome::NotFound,
                AttemptOutcome::NotFound,
                AttemptOutcome::Found
            ]
        );
        assert!(resolved.attempts[1].detail.is_some());
    }

    #[tokio::test]
    async fn test_not_interactable_is_preferred_cause() {
        let session = session(&[("hidden", false)]);
        let err = resolver()
            .resolve(&session, &[By::id("missing"), By::id("hidden")])
            .await
            .unwrap_err();

        match err {
            Error::ElementNotResolvable {
                attempted, cause, ..
            } => {
                assert_eq!(attempted, 2);
                assert!(matches!(
                    cause.as_deref(),
                    Some(Error::NotInteractable { .. })
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_first_failure_is_cause_without_candidates() {
        let session = session(&[]);
        let err = resolver()
            .resolve(&session, &[By::xpath("//x"), By::id("missing")])
            .await
            .unwrap_err();

        match err {
            Error::ElementNotResolvable { cause, .. } => {
                assert!(matches!(cause.as_deref(), Some(Error::ScriptError { .. })));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_empty_strategy_list() {
        let session = session(&[("a", true)]);
        let strategies: [By; 0] = [];
        let err = resolver().resolve(&session, &strategies).await.unwrap_err();

        assert!(matches!(
            err,
            Error::ElementNotResolvable {
                attempted: 0,
                cause: None,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_boxed_strategies() {
        struct Counting(Arc<AtomicUsize>);

        #[async_trait]
        impl LocatorStrategy<StubSession> for Counting {
            fn describe(&self) -> String {
                "counting".to_string()
            }
            async fn attempt(&self, _session: &StubSession) -> Result<Option<StubElement>> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(None)
            }
        }

        let hits = Arc::new(AtomicUsize::new(0));
        let session = session(&[("a", true)]);
        let strategies: Vec<Box<dyn LocatorStrategy<StubSession>>> =
            vec![Box::new(Counting(Arc::clone(&hits))), Box::new(By::id("a"))];

        let element = resolver().resolve(&session, &strategies).await.unwrap();
        assert_eq!(element.id().as_str(), "a");
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
