//! Element locator strategies.
//!
//! Provides Selenium-like `By` selectors for finding elements, plus the
//! quoting helpers used to embed runtime values (a gender label, a state
//! name) into CSS and XPath expressions safely.
//!
//! # Example
//!
//! ```ignore
//! use resilient_locator::By;
//!
//! let by_id = By::id("fname");
//! let by_name = By::name("First Name");
//! let by_css = By::css("input[placeholder='Name']");
//! let by_xpath = By::xpath("//label[contains(text(), 'State')]/following::select[1]");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// By Enum
// ============================================================================

/// Element locator strategy (like Selenium's `By`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "strategy", content = "value")]
pub enum By {
    /// CSS selector (most common).
    ///
    /// # Example
    /// ```ignore
    /// By::Css("select.form-control")
    /// By::Css("input[type='radio'][value='Male']")
    /// ```
    #[serde(rename = "css")]
    Css(String),

    /// XPath expression, evaluated against the document.
    ///
    /// # Example
    /// ```ignore
    /// By::XPath("//label[contains(text(), 'First Name')]/following::input[1]")
    /// ```
    #[serde(rename = "xpath")]
    XPath(String),

    /// Element ID.
    #[serde(rename = "id")]
    Id(String),

    /// Name attribute.
    #[serde(rename = "name")]
    Name(String),

    /// Tag name.
    #[serde(rename = "tag")]
    Tag(String),

    /// Class name (single class).
    #[serde(rename = "class")]
    Class(String),
}

impl By {
    /// Creates a CSS selector.
    #[inline]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Creates an XPath selector.
    #[inline]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Creates an ID selector.
    #[inline]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Creates a name attribute selector.
    #[inline]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Creates a tag name selector.
    #[inline]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }

    /// Creates a class name selector.
    #[inline]
    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    /// Returns the strategy name.
    #[must_use]
    pub fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::Id(_) => "id",
            Self::Name(_) => "name",
            Self::Tag(_) => "tag",
            Self::Class(_) => "class",
        }
    }

    /// Returns the selector value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Css(v)
            | Self::XPath(v)
            | Self::Id(v)
            | Self::Name(v)
            | Self::Tag(v)
            | Self::Class(v) => v,
        }
    }

    /// Script body returning the first match, with the value in `arguments[0]`.
    ///
    /// Drivers that only offer script execution use this to implement
    /// single-element queries.
    #[must_use]
    pub fn find_script(&self) -> &'static str {
        match self {
            Self::Css(_) => "return document.querySelector(arguments[0]);",
            Self::XPath(_) => {
                "return document.evaluate(arguments[0], document, null, \
                 XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue;"
            }
            Self::Id(_) => "return document.getElementById(arguments[0]);",
            Self::Name(_) => "return document.getElementsByName(arguments[0])[0] || null;",
            Self::Tag(_) => "return document.getElementsByTagName(arguments[0])[0] || null;",
            Self::Class(_) => "return document.getElementsByClassName(arguments[0])[0] || null;",
        }
    }

    /// Script body returning every match as an array, in document order.
    #[must_use]
    pub fn find_all_script(&self) -> &'static str {
        match self {
            Self::Css(_) => "return Array.from(document.querySelectorAll(arguments[0]));",
            Self::XPath(_) => {
                "var snap = document.evaluate(arguments[0], document, null, \
                 XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); \
                 var out = []; \
                 for (var i = 0; i < snap.snapshotLength; i++) { out.push(snap.snapshotItem(i)); } \
                 return out;"
            }
            Self::Id(_) => {
                "var el = document.getElementById(arguments[0]); return el ? [el] : [];"
            }
            Self::Name(_) => "return Array.from(document.getElementsByName(arguments[0]));",
            Self::Tag(_) => "return Array.from(document.getElementsByTagName(arguments[0]));",
            Self::Class(_) => "return Array.from(document.getElementsByClassName(arguments[0]));",
        }
    }
}

impl fmt::Display for By {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.strategy(), self.value())
    }
}

// ============================================================================
// From implementations for ergonomics
// ============================================================================

impl From<&str> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: &str) -> Self {
        Self::Css(s.to_string())
    }
}

impl From<String> for By {
    /// Converts a string to CSS selector (default).
    fn from(s: String) -> Self {
        Self::Css(s)
    }
}

// ============================================================================
// Literal Quoting
// ============================================================================

/// Quotes a value as a double-quoted CSS string.
///
/// Backslashes and double quotes are escaped, so the result can be placed
/// inside an attribute selector such as `[value=...]`.
#[must_use]
pub fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Quotes a value as an XPath 1.0 string literal.
///
/// XPath has no escape character, so values holding both quote kinds are
/// assembled with `concat()`.
#[must_use]
pub fn xpath_literal(value: &str) -> String {
    if !value.contains('\'') {
        return format!("'{value}'");
    }
    if !value.contains('"') {
        return format!("\"{value}\"");
    }

    let parts: Vec<String> = value
        .split('\'')
        .map(|part| format!("'{part}'"))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_by_id() {
        let by = By::Id("fname".to_string());
        assert_eq!(by.strategy(), "id");
        assert_eq!(by.value(), "fname");
        assert_eq!(by.to_string(), "id:fname");
    }

    #[test]
    fn test_by_xpath() {
        let by = By::xpath("//select");
        assert_eq!(by.strategy(), "xpath");
        assert!(by.find_script().contains("FIRST_ORDERED_NODE_TYPE"));
        assert!(by.find_all_script().contains("ORDERED_NODE_SNAPSHOT_TYPE"));
    }

    #[test]
    fn test_from_str() {
        let by: By = "#state".into();
        assert!(matches!(by, By::Css(_)));
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(By::name("State")).unwrap();
        assert_eq!(json, serde_json::json!({"strategy": "name", "value": "State"}));
    }

    #[test]
    fn test_css_string_escapes_quotes() {
        assert_eq!(css_string("Male"), "\"Male\"");
        assert_eq!(css_string("a\"b"), "\"a\\\"b\"");
        assert_eq!(css_string("a\\b"), "\"a\\\\b\"");
    }

    #[test]
    fn test_xpath_literal_variants() {
        assert_eq!(xpath_literal("India"), "'India'");
        assert_eq!(xpath_literal("O'Neil"), "\"O'Neil\"");
        assert_eq!(
            xpath_literal("a'b\"c"),
            "concat('a', \"'\", 'b\"c')"
        );
    }

    proptest! {
        #[test]
        fn prop_css_string_is_wrapped(value in ".*") {
            let quoted = css_string(&value);
            prop_assert!(quoted.starts_with('"'));
            prop_assert!(quoted.ends_with('"'));
            // Every inner double quote is escaped.
            let inner = &quoted[1..quoted.len() - 1];
            let mut prev_backslashes = 0usize;
            for c in inner.chars() {
                if c == '"' {
                    prop_assert!(prev_backslashes % 2 == 1);
                }
                prev_backslashes = if c == '\\' { prev_backslashes + 1 } else { 0 };
            }
        }

        #[test]
        fn prop_xpath_literal_without_mixed_quotes_is_plain(value in "[^'\"]*") {
            prop_assert_eq!(xpath_literal(&value), format!("'{}'", value));
        }
    }
}
