//! Script argument and result types.
//!
//! Scripts follow the Selenium convention: a function body that reads its
//! inputs from `arguments[i]` and hands back a value with `return`.

use serde_json::Value;

// ============================================================================
// ScriptArg
// ============================================================================

/// A positional script argument.
#[derive(Debug, Clone)]
pub enum ScriptArg<E> {
    /// A live element, passed by reference.
    Element(E),
    /// A JSON primitive or structure, passed by value.
    Value(Value),
}

impl<E> ScriptArg<E> {
    /// Creates an element argument.
    #[inline]
    pub fn element(element: E) -> Self {
        Self::Element(element)
    }

    /// Returns the JSON value if this is a value argument.
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Element(_) => None,
        }
    }

    /// Returns the element if this is an element argument.
    #[inline]
    #[must_use]
    pub fn as_element(&self) -> Option<&E> {
        match self {
            Self::Element(e) => Some(e),
            Self::Value(_) => None,
        }
    }
}

impl<E> From<&str> for ScriptArg<E> {
    fn from(s: &str) -> Self {
        Self::Value(Value::String(s.to_string()))
    }
}

impl<E> From<String> for ScriptArg<E> {
    fn from(s: String) -> Self {
        Self::Value(Value::String(s))
    }
}

impl<E> From<bool> for ScriptArg<E> {
    fn from(b: bool) -> Self {
        Self::Value(Value::Bool(b))
    }
}

impl<E> From<usize> for ScriptArg<E> {
    fn from(n: usize) -> Self {
        Self::Value(Value::from(n))
    }
}

// ============================================================================
// ScriptValue
// ============================================================================

/// A typed script result.
#[derive(Debug, Clone, Default)]
pub enum ScriptValue<E> {
    /// `null` or `undefined`.
    #[default]
    Null,
    /// A JSON-representable value.
    Value(Value),
    /// A single DOM node.
    Element(E),
    /// An array of DOM nodes, in the order the script produced them.
    Elements(Vec<E>),
}

impl<E> ScriptValue<E> {
    /// Returns `true` for `null` / `undefined`.
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null | Self::Value(Value::Null))
    }

    /// Converts into a single element.
    ///
    /// An element array yields its first entry.
    #[must_use]
    pub fn into_element(self) -> Option<E> {
        match self {
            Self::Element(e) => Some(e),
            Self::Elements(v) => v.into_iter().next(),
            _ => None,
        }
    }

    /// Converts into an element list. Non-element results yield an empty list.
    #[must_use]
    pub fn into_elements(self) -> Vec<E> {
        match self {
            Self::Element(e) => vec![e],
            Self::Elements(v) => v,
            _ => Vec::new(),
        }
    }

    /// Returns the boolean value, treating anything else as `false`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> bool {
        matches!(self, Self::Value(Value::Bool(true)))
    }

    /// Returns the string value if this is a string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Returns the unsigned integer value if this is a number.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Value(v) => v.as_u64(),
            _ => None,
        }
    }

    /// Returns the JSON value if this is a value result.
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_element_takes_first() {
        let value: ScriptValue<u32> = ScriptValue::Elements(vec![3, 4]);
        assert_eq!(value.into_element(), Some(3));
    }

    #[test]
    fn test_into_elements_from_value_is_empty() {
        let value: ScriptValue<u32> = ScriptValue::Value(Value::Bool(true));
        assert!(value.into_elements().is_empty());
    }

    #[test]
    fn test_null_detection() {
        assert!(ScriptValue::<u32>::Null.is_null());
        assert!(ScriptValue::<u32>::Value(Value::Null).is_null());
        assert!(!ScriptValue::<u32>::Value(Value::from(1)).is_null());
    }

    #[test]
    fn test_arg_conversions() {
        let arg: ScriptArg<u32> = "Jane".into();
        assert_eq!(arg.as_value(), Some(&Value::String("Jane".into())));
        let arg: ScriptArg<u32> = ScriptArg::element(9);
        assert_eq!(arg.as_element(), Some(&9));
    }
}
