//! Bound form records.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::model::FieldSpec;

/// Value of a bound field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Checkbox state
    Bool(bool),
    /// Text content
    Text(String),
}

impl FieldValue {
    /// Get as text, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Bool(_) => None,
        }
    }

    /// Get as boolean, if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }

    /// Short kind name, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "boolean",
            FieldValue::Text(_) => "text",
        }
    }
}

impl From<&FieldValue> for Value {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Text(s) => Value::String(s.clone()),
        }
    }
}

/// A validated instance of a form model.
///
/// Fields are stored under their logical names, in model order. Serialization
/// (`Serialize`, [`to_json_by_alias`](Self::to_json_by_alias),
/// [`to_widget_values`](Self::to_widget_values)) keys them by widget name.
#[derive(Debug, Clone, PartialEq)]
pub struct FormRecord {
    model: String,
    values: IndexMap<String, BoundField>,
}

#[derive(Debug, Clone, PartialEq)]
struct BoundField {
    widget_name: String,
    value: FieldValue,
}

impl FormRecord {
    pub(crate) fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            values: IndexMap::new(),
        }
    }

    pub(crate) fn insert(&mut self, spec: &FieldSpec, value: FieldValue) {
        self.values.insert(
            spec.name.clone(),
            BoundField {
                widget_name: spec.widget_name.clone(),
                value,
            },
        );
    }

    /// Name of the model this record was bound against.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Value of a field by logical name.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field).map(|bound| &bound.value)
    }

    /// Text value of a field by logical name.
    pub fn get_text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    /// Boolean value of a field by logical name.
    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(FieldValue::as_bool)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(logical name, value)` pairs in model order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values
            .iter()
            .map(|(name, bound)| (name.as_str(), &bound.value))
    }

    /// Values keyed by widget name, ready for the PDF writer.
    pub fn to_widget_values(&self) -> IndexMap<String, FieldValue> {
        self.values
            .values()
            .map(|bound| (bound.widget_name.clone(), bound.value.clone()))
            .collect()
    }

    /// JSON object keyed by widget name.
    pub fn to_json_by_alias(&self) -> Value {
        Value::Object(
            self.values
                .values()
                .map(|bound| (bound.widget_name.clone(), Value::from(&bound.value)))
                .collect::<Map<String, Value>>(),
        )
    }

    /// JSON object keyed by logical field name.
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(name, bound)| (name.clone(), Value::from(&bound.value)))
                .collect::<Map<String, Value>>(),
        )
    }
}

impl Serialize for FormRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for bound in self.values.values() {
            map.serialize_entry(&bound.widget_name, &bound.value)?;
        }
        map.end()
    }
}
