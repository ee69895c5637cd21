//! Domain-level form operations.

use tracing::{debug, warn};

use crate::driver::{ElementHandle, ResolverOptions, Session};
use crate::error::Result;
use crate::resolve::FallbackResolver;
use crate::shadow::{PageStructure, PierceOutcome, ShadowPath, ShadowPiercer};

use super::field::FieldTarget;

// ============================================================================
// FormFieldController
// ============================================================================

/// Reads and writes the practice form's fields.
///
/// Regular-DOM operations resolve the field through [`FallbackResolver`]
/// with the locator lists from [`FieldTarget`]. Shadow operations go
/// through [`ShadowPiercer`]. Every operation first makes the form
/// reachable with [`locate_form`](Self::locate_form).
///
/// Writes surface resolution errors. Reads return `""` or `false` when the
/// field cannot be found. Shadow operations report a [`PierceOutcome`].
///
/// # Example
///
/// ```ignore
/// let mut form = FormFieldController::new(session, ResolverOptions::default())?;
///
/// form.enter_first_name("Jane").await?;
/// form.select_gender("Female").await?;
/// form.select_state("India").await?;
///
/// assert_eq!(form.get_first_name_value().await?, "Jane");
/// assert!(form.is_gender_selected("Female").await?);
/// ```
#[derive(Debug)]
pub struct FormFieldController<S: Session> {
    root: S,
    context: Option<S>,
    options: ResolverOptions,
    resolver: FallbackResolver,
    piercer: ShadowPiercer,
}

// ============================================================================
// Constructors
// ============================================================================

impl<S: Session> FormFieldController<S> {
    /// Creates a controller over `session`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if `options` fail validation.
    pub fn new(session: S, options: ResolverOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::assemble(session, options))
    }

    /// Creates a controller with default options.
    #[must_use]
    pub fn with_defaults(session: S) -> Self {
        Self::assemble(session, ResolverOptions::default())
    }

    /// Builds the controller from already validated options.
    fn assemble(session: S, options: ResolverOptions) -> Self {
        Self {
            resolver: FallbackResolver::from_options(&options),
            piercer: ShadowPiercer::from_options(&options),
            root: session,
            context: None,
            options,
        }
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl<S: Session> FormFieldController<S> {
    /// The active browsing context.
    #[inline]
    #[must_use]
    pub fn session(&self) -> &S {
        self.context.as_ref().unwrap_or(&self.root)
    }

    /// The session the controller was created with.
    #[inline]
    #[must_use]
    pub fn root(&self) -> &S {
        &self.root
    }

    /// Configuration.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// The resolver used for regular-DOM fields.
    #[inline]
    #[must_use]
    pub fn resolver(&self) -> &FallbackResolver {
        &self.resolver
    }

    /// The piercer used for shadow-DOM fields.
    #[inline]
    #[must_use]
    pub fn piercer(&self) -> &ShadowPiercer {
        &self.piercer
    }

    pub(super) fn set_context(&mut self, context: S) {
        self.context = Some(context);
    }

    /// Consumes the controller, returning the original session.
    pub fn into_session(self) -> S {
        self.root
    }
}

// ============================================================================
// Regular DOM
// ============================================================================

impl<S: Session> FormFieldController<S> {
    /// Clears the first-name field and types `name`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ElementNotResolvable`] if no strategy yields
    /// an interactable field, or [`crate::Error::FrameSwitchFailed`].
    pub async fn enter_first_name(&mut self, name: &str) -> Result<()> {
        self.locate_form().await?;
        let field = self
            .resolver
            .resolve(self.session(), &FieldTarget::FirstName.write_strategies())
            .await?;

        field.clear().await?;
        field.send_keys(name).await?;
        debug!(element_id = %field.id(), "Entered first name");
        Ok(())
    }

    /// Current value of the first-name field, or `""` if it cannot be read.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FrameSwitchFailed`] only.
    pub async fn get_first_name_value(&mut self) -> Result<String> {
        self.locate_form().await?;
        let target = FieldTarget::FirstName;

        let value = match self
            .resolver
            .resolve(self.session(), &target.read_strategies())
            .await
        {
            Ok(field) => field.value().await,
            Err(e) => Err(e),
        };
        Ok(neutral(&target, value.map(Option::unwrap_or_default)))
    }

    /// Selects the gender radio labelled `gender`.
    ///
    /// Clicks only when the radio is not already selected.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ElementNotResolvable`] if no strategy yields
    /// an interactable radio, or [`crate::Error::FrameSwitchFailed`].
    pub async fn select_gender(&mut self, gender: &str) -> Result<()> {
        self.locate_form().await?;
        let radio = self
            .resolver
            .resolve(self.session(), &FieldTarget::gender(gender).write_strategies())
            .await?;

        if radio.is_selected().await? {
            debug!(gender, "Gender already selected");
        } else {
            radio.click().await?;
            debug!(gender, "Selected gender");
        }
        Ok(())
    }

    /// Whether the radio labelled `gender` is selected; `false` if it
    /// cannot be found.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FrameSwitchFailed`] only.
    pub async fn is_gender_selected(&mut self, gender: &str) -> Result<bool> {
        self.locate_form().await?;
        let target = FieldTarget::gender(gender);

        let selected = match self
            .resolver
            .resolve(self.session(), &target.read_strategies())
            .await
        {
            Ok(radio) => radio.is_selected().await,
            Err(e) => Err(e),
        };
        Ok(neutral(&target, selected))
    }

    /// Selects the state option whose visible text is `state`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ElementNotResolvable`] if the dropdown cannot
    /// be resolved, [`crate::Error::InvalidArgument`] if no option matches,
    /// or [`crate::Error::FrameSwitchFailed`].
    pub async fn select_state(&mut self, state: &str) -> Result<()> {
        self.locate_form().await?;
        let dropdown = self
            .resolver
            .resolve(self.session(), &FieldTarget::State.write_strategies())
            .await?;

        dropdown.select_by_text(state).await?;
        debug!(state, "Selected state");
        Ok(())
    }

    /// Visible text of the selected state, or `""` if it cannot be read.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FrameSwitchFailed`] only.
    pub async fn get_selected_state(&mut self) -> Result<String> {
        self.locate_form().await?;
        let target = FieldTarget::State;

        let text = match self
            .resolver
            .resolve(self.session(), &target.read_strategies())
            .await
        {
            Ok(dropdown) => dropdown.selected_text().await,
            Err(e) => Err(e),
        };
        Ok(neutral(&target, text.map(Option::unwrap_or_default)))
    }
}

// ============================================================================
// Shadow DOM
// ============================================================================

impl<S: Session> FormFieldController<S> {
    /// Writes `name` into the shadow form's first-name input.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FrameSwitchFailed`] only; strategy failures
    /// are reported in the outcome.
    pub async fn enter_first_name_in_shadow(&mut self, name: &str) -> Result<PierceOutcome> {
        self.locate_form().await?;
        let selector = FieldTarget::FirstName.shadow_selector();
        Ok(self
            .piercer
            .set_value_in_shadow(self.session(), &selector, name)
            .await)
    }

    /// Checks the shadow form's radio labelled `gender`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FrameSwitchFailed`] only.
    pub async fn select_gender_in_shadow(&mut self, gender: &str) -> Result<PierceOutcome> {
        self.locate_form().await?;
        let selector = FieldTarget::gender(gender).shadow_selector();
        Ok(self
            .piercer
            .set_checked_in_shadow(self.session(), &selector)
            .await)
    }

    /// Selects `state` in the shadow form's dropdown.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FrameSwitchFailed`] only.
    pub async fn select_state_in_shadow(&mut self, state: &str) -> Result<PierceOutcome> {
        self.locate_form().await?;
        let selector = FieldTarget::State.shadow_selector();
        Ok(self
            .piercer
            .select_option_in_shadow(self.session(), &selector, state)
            .await)
    }

    /// Writes `value` into the input at the end of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::FrameSwitchFailed`] only.
    pub async fn set_value_at_path(&mut self, path: &ShadowPath, value: &str) -> Result<PierceOutcome> {
        self.locate_form().await?;
        Ok(self
            .piercer
            .set_value_at_path(self.session(), path, value)
            .await)
    }

    /// Writes `value` into the input matching `selector` inside the nested
    /// shadow form (`nested_host_tag` then `host_tag`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidArgument`] for a blank selector, or
    /// [`crate::Error::FrameSwitchFailed`].
    pub async fn set_nested_shadow_value(
        &mut self,
        selector: &str,
        value: &str,
    ) -> Result<PierceOutcome> {
        let path = ShadowPath::new(
            [
                self.options.nested_host_tag.as_str(),
                self.options.host_tag.as_str(),
            ],
            selector,
        )?;
        self.set_value_at_path(&path, value).await
    }

    /// Diagnostic snapshot of the active context.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot script fails.
    pub async fn page_structure(&self) -> Result<PageStructure> {
        self.piercer.page_structure(self.session()).await
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Collapses a read failure into the type's neutral value.
fn neutral<T: Default>(target: &FieldTarget, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!(field = %target, error = %e, "Read failed, returning neutral value");
        T::default()
    })
}

// ============================================================================
// Tests
// ============================================================================
