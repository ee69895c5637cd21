//! Shadow-DOM mutations with isolated fallback strategies.

use tracing::{debug, warn};

use crate::driver::{ScriptArg, Session};
use crate::error::{Error, Result};
use crate::selector::By;

use super::outcome::{PierceOutcome, PierceStrategy, StrategyOutcome};
use super::path::ShadowPath;
use super::piercer::{
    PierceRoot, ShadowPiercer, ShadowSearch, nested_hosts, open_shadow_hosts, query_shadow,
};
use super::scripts;

// ============================================================================
// Mutation
// ============================================================================

/// A change applied to one located element.
#[derive(Debug, Clone, Copy)]
enum Mutation<'a> {
    SetValue { value: &'a str, inputs_only: bool },
    Check,
    SelectOption(&'a str),
}

impl Mutation<'_> {
    fn operation(&self) -> &'static str {
        match self {
            Self::SetValue { .. } => "set_value",
            Self::Check => "set_checked",
            Self::SelectOption(_) => "select_option",
        }
    }

    /// Applies the change. `Ok(false)` means the element refused it.
    async fn apply<S: Session>(&self, session: &S, element: S::Element) -> Result<bool> {
        let result = match *self {
            Self::SetValue { value, inputs_only } => {
                session
                    .execute(
                        scripts::SET_VALUE,
                        vec![ScriptArg::element(element), value.into(), inputs_only.into()],
                    )
                    .await?
            }
            Self::Check => {
                session
                    .execute(scripts::SET_CHECKED, vec![ScriptArg::element(element)])
                    .await?
            }
            Self::SelectOption(text) => {
                session
                    .execute(
                        scripts::SELECT_OPTION,
                        vec![ScriptArg::element(element), text.into()],
                    )
                    .await?
            }
        };
        Ok(result.as_bool())
    }
}

// ============================================================================
// Field Mutations
// ============================================================================

impl ShadowPiercer {
    /// Writes `value` into the element matching `selector`.
    ///
    /// Strategies, first success wins: [`PierceStrategy::HostTag`],
    /// [`PierceStrategy::ShadowScan`], [`PierceStrategy::LightDom`].
    pub async fn set_value_in_shadow<S: Session>(
        &self,
        session: &S,
        selector: &str,
        value: &str,
    ) -> PierceOutcome {
        let mutation = Mutation::SetValue {
            value,
            inputs_only: false,
        };
        self.mutate(session, selector, mutation).await
    }

    /// Checks the radio or checkbox matching `selector`.
    pub async fn set_checked_in_shadow<S: Session>(
        &self,
        session: &S,
        selector: &str,
    ) -> PierceOutcome {
        self.mutate(session, selector, Mutation::Check).await
    }

    /// Selects the option of the `<select>` matching `selector` whose text,
    /// or failing that whose value, equals `option`.
    ///
    /// A select with no matching option counts as not found.
    pub async fn select_option_in_shadow<S: Session>(
        &self,
        session: &S,
        selector: &str,
        option: &str,
    ) -> PierceOutcome {
        self.mutate(session, selector, Mutation::SelectOption(option))
            .await
    }

    async fn mutate<S: Session>(
        &self,
        session: &S,
        selector: &str,
        mutation: Mutation<'_>,
    ) -> PierceOutcome {
        let mut outcome = PierceOutcome::new(mutation.operation(), selector);

        for strategy in PierceStrategy::MUTATION_ORDER {
            if outcome.is_success() {
                outcome.record(strategy, StrategyOutcome::Skipped);
                continue;
            }

            let result = match strategy {
                PierceStrategy::HostTag => {
                    self.apply_under_host_tag(session, selector, mutation).await
                }
                PierceStrategy::ShadowScan => {
                    apply_in_open_hosts(session, selector, mutation).await
                }
                PierceStrategy::LightDom => apply_in_light_dom(session, selector, mutation).await,
                other => Err(Error::invalid_argument(format!(
                    "{other} does not apply to field mutations"
                ))),
            };

            outcome.record(strategy, classify(&outcome, strategy, result));
        }

        outcome
    }

    async fn apply_under_host_tag<S: Session>(
        &self,
        session: &S,
        selector: &str,
        mutation: Mutation<'_>,
    ) -> Result<bool> {
        let hosts = session.find_all(&By::tag(self.host_tag.as_str())).await?;
        for host in &hosts {
            if let Some(element) = query_shadow(session, host, selector).await?
                && mutation.apply(session, element).await?
            {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

async fn apply_in_open_hosts<S: Session>(
    session: &S,
    selector: &str,
    mutation: Mutation<'_>,
) -> Result<bool> {
    for host in &open_shadow_hosts(session).await? {
        if let Some(element) = query_shadow(session, host, selector).await?
            && mutation.apply(session, element).await?
        {
            return Ok(true);
        }
    }
    Ok(false)
}

async fn apply_in_light_dom<S: Session>(
    session: &S,
    selector: &str,
    mutation: Mutation<'_>,
) -> Result<bool> {
    for element in session.find_all(&By::css(selector)).await? {
        if mutation.apply(session, element).await? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn classify(outcome: &PierceOutcome, strategy: PierceStrategy, result: Result<bool>) -> StrategyOutcome {
    match result {
        Ok(true) => {
            debug!(operation = %outcome.operation, selector = %outcome.target, %strategy, "Shadow mutation applied");
            StrategyOutcome::Applied
        }
        Ok(false) => StrategyOutcome::NotFound,
        Err(e) => {
            warn!(operation = %outcome.operation, selector = %outcome.target, %strategy, error = %e, "Shadow strategy failed");
            StrategyOutcome::Failed(e.to_string())
        }
    }
}

// ============================================================================
// Path Mutations
// ============================================================================

impl ShadowPiercer {
    /// Writes `value` into the `<input>` at the end of `path`.
    ///
    /// Strategies, first success wins: [`PierceStrategy::ExplicitPath`],
    /// [`PierceStrategy::NestedScan`], [`PierceStrategy::DeepSearch`].
    /// Elements other than `<input>` are never written.
    pub async fn set_value_at_path<S: Session>(
        &self,
        session: &S,
        path: &ShadowPath,
        value: &str,
    ) -> PierceOutcome {
        let mutation = Mutation::SetValue {
            value,
            inputs_only: true,
        };
        let mut outcome = PierceOutcome::new(mutation.operation(), path.to_string());

        for strategy in PierceStrategy::PATH_ORDER {
            if outcome.is_success() {
                outcome.record(strategy, StrategyOutcome::Skipped);
                continue;
            }

            let result = match strategy {
                PierceStrategy::ExplicitPath => apply_along_path(session, path, mutation).await,
                PierceStrategy::NestedScan => {
                    apply_in_nested_hosts(session, path.target(), mutation).await
                }
                PierceStrategy::DeepSearch => {
                    self.apply_by_deep_search(session, path.target(), mutation)
                        .await
                }
                other => Err(Error::invalid_argument(format!(
                    "{other} does not apply to path writes"
                ))),
            };

            outcome.record(strategy, classify(&outcome, strategy, result));
        }

        outcome
    }

    async fn apply_by_deep_search<S: Session>(
        &self,
        session: &S,
        target: &str,
        mutation: Mutation<'_>,
    ) -> Result<bool> {
        match self
            .find_in_shadow(session, PierceRoot::Document, target, self.max_depth)
            .await
        {
            ShadowSearch::Found(found) => mutation.apply(session, found.element).await,
            ShadowSearch::NotFound(_) => Ok(false),
        }
    }
}

async fn apply_along_path<S: Session>(
    session: &S,
    path: &ShadowPath,
    mutation: Mutation<'_>,
) -> Result<bool> {
    let Some((first, rest)) = path.hosts().split_first() else {
        return Ok(false);
    };
    let Some(mut current) = session.find(&By::css(first.as_str())).await? else {
        return Ok(false);
    };

    for host in rest {
        match query_shadow(session, &current, host).await? {
            Some(next) => current = next,
            None => return Ok(false),
        }
    }

    match query_shadow(session, &current, path.target()).await? {
        Some(element) => mutation.apply(session, element).await,
        None => Ok(false),
    }
}

async fn apply_in_nested_hosts<S: Session>(
    session: &S,
    target: &str,
    mutation: Mutation<'_>,
) -> Result<bool> {
    for outer in &open_shadow_hosts(session).await? {
        for inner in &nested_hosts(session, outer).await? {
            if let Some(element) = query_shadow(session, inner, target).await?
                && mutation.apply(session, element).await?
            {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

// ============================================================================
// Tests
// ============================================================================
