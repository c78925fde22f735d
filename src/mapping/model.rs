//! Synthesized form models and input binding.
//!
//! A [`FormModel`] is the record type derived from a form's descriptors. It
//! binds raw input keyed by either logical names or widget names, runs each
//! field's coercion before type checking, and reports every failing field at
//! once.

use serde::Serialize;
use serde_json::Value;

use super::field::FieldMapper;
use super::record::{FieldValue, FormRecord};
use super::validation::ValidationErrors;
use super::widget::{Coercion, ValueKind};
use crate::error::{Error, Result};

/// One field of a synthesized model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Logical field name
    pub name: String,
    /// Widget name; accepted as an input alias and used as the output key
    pub widget_name: String,
    /// Value kind the field holds
    pub kind: ValueKind,
    /// Coercion applied before type checking
    pub coercion: Coercion,
    /// Maximum number of characters (text only)
    pub max_length: Option<usize>,
    /// Value used when input supplies none
    pub default: Option<FieldValue>,
}

impl FieldSpec {
    /// Input keys accepted for this field, in lookup order.
    pub fn input_keys(&self) -> [&str; 2] {
        [self.name.as_str(), self.widget_name.as_str()]
    }

    fn bind(
        &self,
        input: &serde_json::Map<String, Value>,
        errors: &mut ValidationErrors,
    ) -> Option<FieldValue> {
        let found = self
            .input_keys()
            .into_iter()
            .find_map(|key| input.get(key).map(|value| (key, value)));

        let Some((key, raw)) = found else {
            return Some(
                self.default
                    .clone()
                    .unwrap_or_else(|| self.kind.empty_value()),
            );
        };

        let value = match self.coercion.apply(Some(raw)) {
            Ok(value) => value,
            Err(reason) => {
                errors.push(&self.name, Some(key), reason);
                return None;
            },
        };

        if let (FieldValue::Text(text), Some(max_length)) = (&value, self.max_length) {
            let length = text.chars().count();
            if length > max_length {
                errors.push(
                    &self.name,
                    Some(key),
                    format!(
                        "string should have at most {} characters, got {}",
                        max_length, length
                    ),
                );
                return None;
            }
        }

        Some(value)
    }
}

/// Record type synthesized from a form's field descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormModel {
    name: String,
    fields: Vec<FieldSpec>,
}

impl FormModel {
    /// Synthesize a model from descriptors.
    ///
    /// Fails with `UnsupportedWidgetType` naming the first descriptor whose
    /// widget kind has no mapping rule.
    pub fn build(name: &str, fields: &[FieldMapper]) -> Result<Self> {
        let fields = fields
            .iter()
            .map(FieldMapper::field_rule)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: name.to_string(),
            fields,
        })
    }

    /// Model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field specifications, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Logical field names, in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Look up a field by logical name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the model has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Bind a raw JSON value against this model.
    ///
    /// The input must be an object. Keys that match no field are ignored.
    pub fn validate(&self, input: &Value) -> Result<FormRecord> {
        let Value::Object(map) = input else {
            let mut errors = ValidationErrors::new(&self.name);
            errors.push(
                "__root__",
                None,
                "input should be a mapping of field names to values",
            );
            return Err(Error::Validation(errors));
        };

        for key in map.keys() {
            if !self.fields.iter().any(|f| f.input_keys().contains(&key.as_str())) {
                log::trace!("{}: ignoring unknown input key '{}'", self.name, key);
            }
        }

        let mut errors = ValidationErrors::new(&self.name);
        let mut record = FormRecord::new(&self.name);
        for spec in &self.fields {
            if let Some(value) = spec.bind(map, &mut errors) {
                record.insert(spec, value);
            }
        }

        errors.into_result()?;
        Ok(record)
    }

    /// Bind any serializable record whose serialized form is a mapping.
    pub fn validate_from<T: Serialize + ?Sized>(&self, input: &T) -> Result<FormRecord> {
        let value = serde_json::to_value(input)?;
        self.validate(&value)
    }
}
