//! Semantic form fields and their locator lists.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::selector::{By, css_string, xpath_literal};

// ============================================================================
// FieldTarget
// ============================================================================

/// A logical form field, mapped to concrete locators at call time.
///
/// # Example
///
/// ```ignore
/// let gender = FieldTarget::gender("Female");
/// assert_eq!(gender.write_strategies()[0], By::id("female"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "field", content = "label")]
pub enum FieldTarget {
    /// The first-name text input.
    FirstName,
    /// The gender radio with the given label, e.g. `Male`.
    Gender(String),
    /// The state `<select>`.
    State,
}

impl FieldTarget {
    /// Creates a gender target.
    #[inline]
    pub fn gender(label: impl Into<String>) -> Self {
        Self::Gender(label.into())
    }

    /// Locators for writing, most specific first.
    #[must_use]
    pub fn write_strategies(&self) -> Vec<By> {
        match self {
            Self::FirstName => vec![
                By::id("fname"),
                By::name("First Name"),
                By::css("input[placeholder='Name']"),
                By::xpath("//label[contains(text(), 'First Name')]/following::input[1]"),
                By::css("input[placeholder*='Name']"),
            ],
            Self::Gender(label) => vec![
                By::id(label.to_lowercase()),
                By::css(radio_by_value(label)),
                By::xpath(format!(
                    "//span[text()={}]/preceding-sibling::input[@type='radio']",
                    xpath_literal(label)
                )),
                By::xpath(format!(
                    "//label[contains(text(), 'Gender')]/following::input[@type='radio'][{}]",
                    gender_position(label)
                )),
            ],
            Self::State => vec![
                By::id("state"),
                By::name("State"),
                By::xpath("//label[contains(text(), 'State')]/following::select[1]"),
                By::css("select.form-control"),
            ],
        }
    }

    /// Locators for reading, most specific first.
    #[must_use]
    pub fn read_strategies(&self) -> Vec<By> {
        match self {
            Self::FirstName => vec![
                By::id("fname"),
                By::name("First Name"),
                By::css("input[placeholder='Name']"),
                By::css("input[placeholder*='Name']"),
            ],
            Self::Gender(label) => vec![By::css(radio_by_value(label)), By::id(label.to_lowercase())],
            Self::State => vec![By::id("state"), By::name("State")],
        }
    }

    /// Selector used inside a shadow root.
    ///
    /// Labels are quoted in both halves so the selector list stays valid for
    /// any label text.
    #[must_use]
    pub fn shadow_selector(&self) -> String {
        match self {
            Self::FirstName => "#fname".to_string(),
            Self::Gender(label) => format!(
                "input[type=\"radio\"][id={}], input[type=\"radio\"][value={}]",
                css_string(&label.to_lowercase()),
                css_string(label)
            ),
            Self::State => "#state".to_string(),
        }
    }
}

impl fmt::Display for FieldTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstName => f.write_str("first name"),
            Self::Gender(label) => write!(f, "gender radio '{label}'"),
            Self::State => f.write_str("state"),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn radio_by_value(label: &str) -> String {
    format!("input[type='radio'][value={}]", css_string(label))
}

/// 1-based position of the radio after the "Gender" label.
fn gender_position(label: &str) -> usize {
    match label {
        "Male" => 1,
        "Female" => 2,
        _ => 3,
    }
}

// ============================================================================
// Tests
// ============================================================================
