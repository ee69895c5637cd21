//! Depth-bounded shadow-root search.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, trace};

use crate::driver::{ElementHandle, ResolverOptions, ScriptArg, ScriptValue, Session};
use crate::error::{Error, Result};
use crate::selector::By;

use super::scripts;

// ============================================================================
// Search Types
// ============================================================================

/// Where a shadow search starts.
#[derive(Debug, Clone)]
pub enum PierceRoot<E> {
    /// Every shadow host of the light DOM.
    Document,
    /// The first light-DOM element matching a CSS selector.
    Host(String),
    /// A host element already in hand.
    Element(E),
}

/// How a match was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootAccess {
    /// Through open shadow roots only.
    Open,
    /// Through the document-wide id scan used for closed roots.
    ///
    /// Best effort: closed roots are not queryable, so the scan only finds
    /// elements the document itself exposes.
    ClosedHeuristic,
}

/// A successful search.
#[derive(Debug, Clone)]
pub struct ShadowMatch<E> {
    /// The matched element.
    pub element: E,
    /// Shadow boundaries crossed to reach it.
    pub depth: usize,
    /// Open traversal or closed-root heuristic.
    pub access: RootAccess,
}

/// Diagnostics from a search that found nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchMiss {
    /// Target selector.
    pub target: String,
    /// Hosts examined.
    pub visited: usize,
    /// Hosts whose root could not be opened.
    pub closed_hosts: usize,
    /// Script errors met along the way.
    pub errors: Vec<String>,
}

/// Result of [`ShadowPiercer::find_in_shadow`].
#[derive(Debug, Clone)]
pub enum ShadowSearch<E> {
    /// First match in depth-first document order.
    Found(ShadowMatch<E>),
    /// Nothing matched within the depth bound.
    NotFound(SearchMiss),
}

impl<E> ShadowSearch<E> {
    /// Returns `true` on a match.
    #[inline]
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns the match, if any.
    #[must_use]
    pub fn into_match(self) -> Option<ShadowMatch<E>> {
        match self {
            Self::Found(m) => Some(m),
            Self::NotFound(_) => None,
        }
    }

    /// Converts into a `Result`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShadowPierceFailed`] when nothing matched.
    pub fn into_result(self) -> Result<ShadowMatch<E>> {
        match self {
            Self::Found(m) => Ok(m),
            Self::NotFound(miss) => {
                let mut reason = format!(
                    "no match within {} hosts ({} closed)",
                    miss.visited, miss.closed_hosts
                );
                if let Some(first) = miss.errors.first() {
                    reason.push_str("; first error: ");
                    reason.push_str(first);
                }
                Err(Error::shadow_pierce_failed(miss.target, reason))
            }
        }
    }
}

/// Snapshot of page structure for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageStructure {
    /// Elements in the light DOM.
    pub total_elements: u64,
    /// Elements carrying one of the configured host tags.
    pub shadow_hosts: u64,
    /// `<input>` elements in the light DOM.
    pub inputs: u64,
    /// Tag names of light-DOM elements with an open shadow root.
    pub open_host_tags: Vec<String>,
}

// ============================================================================
// ShadowMode
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ShadowMode {
    Open,
    Closed,
    None,
}

impl ShadowMode {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("open") => Self::Open,
            Some("closed") => Self::Closed,
            _ => Self::None,
        }
    }
}

// ============================================================================
// ShadowPiercer
// ============================================================================

/// Locates and mutates elements behind shadow boundaries.
///
/// Traversal runs on the Rust side over primitive page scripts
/// ([`scripts`]), one boundary per call. The stack is explicit and every
/// host is expanded at most once.
///
/// # Example
///
/// ```ignore
/// let piercer = ShadowPiercer::from_options(&options);
/// let found = piercer
///     .find_in_shadow(&session, PierceRoot::Document, "#fname", 5)
///     .await
///     .into_result()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowPiercer {
    pub(super) max_depth: usize,
    pub(super) host_tag: String,
    pub(super) nested_host_tag: String,
}

impl Default for ShadowPiercer {
    fn default() -> Self {
        Self::from_options(&ResolverOptions::default())
    }
}

impl ShadowPiercer {
    /// Creates a piercer from options.
    #[must_use]
    pub fn from_options(options: &ResolverOptions) -> Self {
        Self {
            max_depth: options.max_shadow_depth,
            host_tag: options.host_tag.clone(),
            nested_host_tag: options.nested_host_tag.clone(),
        }
    }

    /// Sets the depth bound used by mutations.
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Depth bound used by mutations.
    #[inline]
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Custom element tag hosting the form.
    #[inline]
    #[must_use]
    pub fn host_tag(&self) -> &str {
        &self.host_tag
    }

    /// Outer custom element tag of the nested form.
    #[inline]
    #[must_use]
    pub fn nested_host_tag(&self) -> &str {
        &self.nested_host_tag
    }
}

// ============================================================================
// Search
// ============================================================================

impl ShadowPiercer {
    /// Finds `target` behind at most `max_depth` shadow boundaries.
    ///
    /// Hosts are visited depth-first in document order. At each open host
    /// the root is queried directly; on a miss its nested hosts are pushed
    /// one level deeper. A host at depth `max_depth` is queried but not
    /// expanded.
    ///
    /// The first closed host met triggers one document-wide id scan when
    /// `target` is an `#id` selector. Such matches are tagged
    /// [`RootAccess::ClosedHeuristic`].
    pub async fn find_in_shadow<S: Session>(
        &self,
        session: &S,
        root: PierceRoot<S::Element>,
        target: &str,
        max_depth: usize,
    ) -> ShadowSearch<S::Element> {
        let mut miss = SearchMiss {
            target: target.to_string(),
            ..SearchMiss::default()
        };

        let seeds = match root {
            PierceRoot::Document => match light_dom_hosts(session).await {
                Ok(hosts) => hosts,
                Err(e) => {
                    miss.errors.push(e.to_string());
                    Vec::new()
                }
            },
            PierceRoot::Host(selector) => match session.find(&By::css(selector.as_str())).await {
                Ok(Some(host)) => vec![host],
                Ok(None) => {
                    miss.errors.push(format!("host not found: {selector}"));
                    Vec::new()
                }
                Err(e) => {
                    miss.errors.push(e.to_string());
                    Vec::new()
                }
            },
            PierceRoot::Element(host) => vec![host],
        };

        let mut stack: Vec<(S::Element, usize)> =
            seeds.into_iter().rev().map(|host| (host, 1)).collect();
        let mut visited = FxHashSet::default();
        let mut heuristic_tried = false;

        while let Some((host, depth)) = stack.pop() {
            if depth > max_depth || !visited.insert(host.id().clone()) {
                continue;
            }

            let mode = match shadow_mode(session, &host).await {
                Ok(mode) => mode,
                Err(e) => {
                    miss.errors.push(e.to_string());
                    continue;
                }
            };
            trace!(host = %host.id(), depth, ?mode, "Visiting shadow host");

            match mode {
                ShadowMode::Open => {
                    match query_shadow(session, &host, target).await {
                        Ok(Some(element)) => {
                            debug!(selector = target, depth, "Found element in open shadow root");
                            return ShadowSearch::Found(ShadowMatch {
                                element,
                                depth,
                                access: RootAccess::Open,
                            });
                        }
                        Ok(None) => {}
                        Err(e) => miss.errors.push(e.to_string()),
                    }

                    if depth < max_depth {
                        match nested_hosts(session, &host).await {
                            Ok(children) => {
                                for child in children.into_iter().rev() {
                                    if !visited.contains(child.id()) {
                                        stack.push((child, depth + 1));
                                    }
                                }
                            }
                            Err(e) => miss.errors.push(e.to_string()),
                        }
                    }
                }
                ShadowMode::Closed => {
                    miss.closed_hosts += 1;
                    if heuristic_tried {
                        continue;
                    }
                    let Some(id) = id_selector(target) else {
                        continue;
                    };
                    heuristic_tried = true;

                    debug!(selector = target, host = %host.id(), "Closed shadow root; scanning document by id");
                    match scan_by_id(session, id).await {
                        Ok(Some(element)) => {
                            return ShadowSearch::Found(ShadowMatch {
                                element,
                                depth,
                                access: RootAccess::ClosedHeuristic,
                            });
                        }
                        Ok(None) => {}
                        Err(e) => miss.errors.push(e.to_string()),
                    }
                }
                ShadowMode::None => {}
            }
        }

        miss.visited = visited.len();
        debug!(
            selector = target,
            visited = miss.visited,
            closed = miss.closed_hosts,
            "Shadow search found nothing"
        );
        ShadowSearch::NotFound(miss)
    }

    /// Collects a diagnostic snapshot of the page.
    ///
    /// # Errors
    ///
    /// Returns an error if the script fails or returns no object.
    pub async fn page_structure<S: Session>(&self, session: &S) -> Result<PageStructure> {
        let tags = json!([self.host_tag, self.nested_host_tag]);
        let value = session
            .execute(scripts::PAGE_STRUCTURE, vec![ScriptArg::Value(tags)])
            .await?;

        match value {
            ScriptValue::Value(v) if v.is_object() => Ok(serde_json::from_value(v)?),
            _ => Err(Error::script_error("page structure script returned no object")),
        }
    }
}

// ============================================================================
// Script Helpers
// ============================================================================

pub(super) async fn shadow_mode<S: Session>(session: &S, host: &S::Element) -> Result<ShadowMode> {
    let value = session
        .execute(scripts::SHADOW_MODE, vec![ScriptArg::element(host.clone())])
        .await?;
    Ok(ShadowMode::parse(value.as_str()))
}

pub(super) async fn query_shadow<S: Session>(
    session: &S,
    host: &S::Element,
    selector: &str,
) -> Result<Option<S::Element>> {
    let value = session
        .execute(
            scripts::QUERY_SHADOW,
            vec![ScriptArg::element(host.clone()), selector.into()],
        )
        .await?;
    Ok(value.into_element())
}

pub(super) async fn nested_hosts<S: Session>(
    session: &S,
    host: &S::Element,
) -> Result<Vec<S::Element>> {
    let value = session
        .execute(scripts::NESTED_HOSTS, vec![ScriptArg::element(host.clone())])
        .await?;
    Ok(value.into_elements())
}

pub(super) async fn light_dom_hosts<S: Session>(session: &S) -> Result<Vec<S::Element>> {
    Ok(session
        .execute(scripts::LIGHT_DOM_HOSTS, Vec::new())
        .await?
        .into_elements())
}

pub(super) async fn open_shadow_hosts<S: Session>(session: &S) -> Result<Vec<S::Element>> {
    Ok(session
        .execute(scripts::OPEN_SHADOW_HOSTS, Vec::new())
        .await?
        .into_elements())
}

async fn scan_by_id<S: Session>(session: &S, id: &str) -> Result<Option<S::Element>> {
    Ok(session
        .execute(scripts::SCAN_BY_ID, vec![id.into()])
        .await?
        .into_element())
}

/// Returns the id of a plain `#id` selector.
fn id_selector(selector: &str) -> Option<&str> {
    let id = selector.trim().strip_prefix('#')?;
    let plain = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    plain.then_some(id)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_selector() {
        assert_eq!(id_selector("#fname"), Some("fname"));
        assert_eq!(id_selector(" #first_name-2 "), Some("first_name-2"));
        assert_eq!(id_selector("#a, #b"), None);
        assert_eq!(id_selector("input#fname"), None);
        assert_eq!(id_selector("#"), None);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(ShadowMode::parse(Some("open")), ShadowMode::Open);
        assert_eq!(ShadowMode::parse(Some("closed")), ShadowMode::Closed);
        assert_eq!(ShadowMode::parse(None), ShadowMode::None);
    }

    #[test]
    fn test_into_result_maps_miss() {
        let search: ShadowSearch<u32> = ShadowSearch::NotFound(SearchMiss {
            target: "#fname".into(),
            visited: 3,
            closed_hosts: 1,
            errors: vec!["detached".into()],
        });
        let err = search.into_result().unwrap_err();
        match err {
            Error::ShadowPierceFailed { selector, reason } => {
                assert_eq!(selector, "#fname");
                assert!(reason.contains("3 hosts"));
                assert!(reason.contains("detached"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_page_structure_deserializes_camel_case() {
        let value = json!({
            "totalElements": 40,
            "shadowHosts": 2,
            "inputs": 7,
            "openHostTags": ["shadow-form"]
        });
        let structure: PageStructure = serde_json::from_value(value).unwrap();
        assert_eq!(structure.total_elements, 40);
        assert_eq!(structure.open_host_tags, vec!["shadow-form".to_string()]);
    }

    #[test]
    fn test_piercer_from_options() {
        let options = ResolverOptions::new().with_max_shadow_depth(3).with_host_tag("x-form");
        let piercer = ShadowPiercer::from_options(&options);
        assert_eq!(piercer.max_depth(), 3);
        assert_eq!(piercer.host_tag(), "x-form");
        assert_eq!(piercer.with_max_depth(7).max_depth(), 7);
    }
}
