//! Widget kinds and their mapping capabilities.
//!
//! Every widget kind a descriptor can declare is listed here, but only some of
//! them have a mapping rule. [`WidgetType::capability`] is the table the schema
//! builder consults; a kind without a capability fails synthesis.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::coerce;
use super::field::DefaultValue;
use super::record::FieldValue;
use crate::error::Error;

/// Kind of widget a form field is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetType {
    /// Single or multi-line text box
    #[default]
    Text,
    /// Check box (on/off)
    Checkbox,
    /// Radio button group
    Radio,
    /// Combo box or list box
    Dropdown,
    /// Signature field
    Signature,
}

impl WidgetType {
    /// All widget kinds, in declaration order.
    pub const ALL: [WidgetType; 5] = [
        WidgetType::Text,
        WidgetType::Checkbox,
        WidgetType::Radio,
        WidgetType::Dropdown,
        WidgetType::Signature,
    ];

    /// Lowercase name as used in form definitions.
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetType::Text => "text",
            WidgetType::Checkbox => "checkbox",
            WidgetType::Radio => "radio",
            WidgetType::Dropdown => "dropdown",
            WidgetType::Signature => "signature",
        }
    }

    /// Mapping rule for this kind, or `None` when the kind is not implemented.
    pub fn capability(&self) -> Option<WidgetCapability> {
        match self {
            WidgetType::Text => Some(WidgetCapability {
                kind: ValueKind::Text,
                coercion: Coercion::AnyToStr,
            }),
            WidgetType::Checkbox => Some(WidgetCapability {
                kind: ValueKind::Bool,
                coercion: Coercion::ToBool,
            }),
            WidgetType::Radio | WidgetType::Dropdown | WidgetType::Signature => None,
        }
    }

    /// Check that a default value matches the value kind this widget expects.
    ///
    /// Kinds without a capability accept any default; they are rejected later
    /// when the schema is synthesized.
    pub fn accepts_default(&self, default: &DefaultValue) -> bool {
        match self.capability() {
            Some(cap) => cap.kind.matches(default),
            None => true,
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WidgetType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::InvalidConfiguration(format!("unknown widget type '{}'", s)))
    }
}

/// Value type a bound field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// String value
    Text,
    /// Boolean value
    Bool,
}

impl ValueKind {
    /// Whether a default value has this kind.
    pub fn matches(&self, default: &DefaultValue) -> bool {
        matches!(
            (self, default),
            (ValueKind::Text, DefaultValue::Text(_)) | (ValueKind::Bool, DefaultValue::Bool(_))
        )
    }

    /// Value used when input is missing and no default is configured.
    pub fn empty_value(&self) -> FieldValue {
        match self {
            ValueKind::Text => FieldValue::Text(String::new()),
            ValueKind::Bool => FieldValue::Bool(false),
        }
    }

    /// Human readable name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Text => "string",
            ValueKind::Bool => "boolean",
        }
    }
}

/// Pre-validation coercion registered for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Numbers and null become strings
    AnyToStr,
    /// Lax boolean parsing
    ToBool,
}

impl Coercion {
    /// Coerce raw input into a field value, or explain why it cannot be.
    pub fn apply(&self, raw: Option<&serde_json::Value>) -> Result<FieldValue, String> {
        match self {
            Coercion::AnyToStr => coerce::any_to_str(raw)
                .map(FieldValue::Text)
                .ok_or_else(|| format!("input should be a valid string, got {}", describe(raw))),
            Coercion::ToBool => raw
                .and_then(coerce::to_bool)
                .map(FieldValue::Bool)
                .ok_or_else(|| format!("input should be a valid boolean, got {}", describe(raw))),
        }
    }
}

fn describe(raw: Option<&serde_json::Value>) -> &'static str {
    use serde_json::Value;
    match raw {
        None | Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "a boolean",
        Some(Value::Number(_)) => "a number",
        Some(Value::String(_)) => "a string",
        Some(Value::Array(_)) => "an array",
        Some(Value::Object(_)) => "an object",
    }
}

/// Entry of the widget capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetCapability {
    /// Value kind the bound field holds
    pub kind: ValueKind,
    /// Coercion run before type checking
    pub coercion: Coercion,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_capability_table() {
        assert_eq!(WidgetType::Text.capability().map(|c| c.kind), Some(ValueKind::Text));
        assert_eq!(WidgetType::Checkbox.capability().map(|c| c.kind), Some(ValueKind::Bool));
        assert!(WidgetType::Radio.capability().is_none());
        assert!(WidgetType::Dropdown.capability().is_none());
        assert!(WidgetType::Signature.capability().is_none());
    }

    #[test]
    fn test_from_str_roundtrip() {
        for kind in WidgetType::ALL {
            assert_eq!(kind.as_str().parse::<WidgetType>().unwrap(), kind);
        }
        assert!("combobox".parse::<WidgetType>().is_err());
    }

    #[test]
    fn test_serde_names() {
        let kind: WidgetType = serde_json::from_value(json!("checkbox")).unwrap();
        assert_eq!(kind, WidgetType::Checkbox);
        assert_eq!(serde_json::to_value(WidgetType::Dropdown).unwrap(), json!("dropdown"));
    }

    #[test]
    fn test_accepts_default() {
        let text = DefaultValue::Text("x".into());
        let flag = DefaultValue::Bool(true);
        assert!(WidgetType::Text.accepts_default(&text));
        assert!(!WidgetType::Text.accepts_default(&flag));
        assert!(WidgetType::Checkbox.accepts_default(&flag));
        assert!(!WidgetType::Checkbox.accepts_default(&text));
        // Unimplemented kinds are rejected at synthesis, not here
        assert!(WidgetType::Radio.accepts_default(&text));
    }

    #[test]
    fn test_coercion_errors_name_the_input_kind() {
        let err = Coercion::AnyToStr.apply(Some(&json!([1, 2]))).unwrap_err();
        assert!(err.contains("valid string"));
        assert!(err.contains("array"));

        let err = Coercion::ToBool.apply(None).unwrap_err();
        assert!(err.contains("valid boolean"));
        assert!(err.contains("null"));
    }
}
