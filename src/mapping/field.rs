//! Field descriptors.
//!
//! A [`FieldMapper`] maps one logical field of a data record to one widget of
//! a PDF form. Descriptors are checked when they are built: a default value
//! that cannot be written to the widget is rejected immediately, long before
//! any input is bound.
//!
//! # Example
//!
//! ```
//! use pdf_formfill::mapping::{FieldMapper, WidgetType};
//!
//! let name = FieldMapper::builder("name", "f1_1[0]").build()?;
//! let exceptions = FieldMapper::builder("exceptions", "c1_1[0]")
//!     .widget_type(WidgetType::Checkbox)
//!     .default_value(false)
//!     .build()?;
//!
//! assert_eq!(name.widget_type(), WidgetType::Text);
//! assert_eq!(exceptions.widget_name(), "c1_1[0]");
//! # Ok::<(), pdf_formfill::Error>(())
//! ```

use serde::{Deserialize, Serialize};

use super::model::FieldSpec;
use super::record::FieldValue;
use super::widget::WidgetType;
use crate::error::{Error, Result};

/// Default value of a field, used when input does not supply one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// Boolean default (checkboxes)
    Bool(bool),
    /// Text default (text fields)
    Text(String),
}

impl DefaultValue {
    fn kind_name(&self) -> &'static str {
        match self {
            DefaultValue::Bool(_) => "boolean",
            DefaultValue::Text(_) => "string",
        }
    }
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        DefaultValue::Bool(value)
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        DefaultValue::Text(value.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(value: String) -> Self {
        DefaultValue::Text(value)
    }
}

impl From<DefaultValue> for FieldValue {
    fn from(value: DefaultValue) -> Self {
        match value {
            DefaultValue::Bool(b) => FieldValue::Bool(b),
            DefaultValue::Text(s) => FieldValue::Text(s),
        }
    }
}

/// Declarative mapping from a logical field name to a PDF widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FieldMapperDef")]
pub struct FieldMapper {
    field_name: String,
    widget_type: WidgetType,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_length: Option<usize>,
    widget_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_value: Option<DefaultValue>,
}

/// Unchecked wire shape of a descriptor.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldMapperDef {
    field_name: String,
    #[serde(default)]
    widget_type: WidgetType,
    #[serde(default)]
    max_length: Option<usize>,
    widget_name: String,
    #[serde(default)]
    default_value: Option<DefaultValue>,
}

impl TryFrom<FieldMapperDef> for FieldMapper {
    type Error = Error;

    fn try_from(def: FieldMapperDef) -> Result<Self> {
        let mut builder = FieldMapper::builder(def.field_name, def.widget_name)
            .widget_type(def.widget_type);
        builder.max_length = def.max_length;
        builder.default_value = def.default_value;
        builder.build()
    }
}

impl FieldMapper {
    /// Start building a descriptor. The widget type defaults to text.
    pub fn builder(
        field_name: impl Into<String>,
        widget_name: impl Into<String>,
    ) -> FieldMapperBuilder {
        FieldMapperBuilder {
            field_name: field_name.into(),
            widget_name: widget_name.into(),
            widget_type: WidgetType::Text,
            max_length: None,
            default_value: None,
        }
    }

    /// Shorthand for a descriptor with no length limit and no default.
    pub fn new(
        field_name: impl Into<String>,
        widget_type: WidgetType,
        widget_name: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(field_name, widget_name)
            .widget_type(widget_type)
            .build()
    }

    /// Logical name used by calling code.
    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Widget kind.
    pub fn widget_type(&self) -> WidgetType {
        self.widget_type
    }

    /// Maximum number of characters (text fields only).
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Widget identifier inside the PDF.
    pub fn widget_name(&self) -> &str {
        &self.widget_name
    }

    /// Configured default value.
    pub fn default_value(&self) -> Option<&DefaultValue> {
        self.default_value.as_ref()
    }

    /// Describe this field's contribution to a form model.
    ///
    /// Fails with `UnsupportedWidgetType` for widget kinds that have no
    /// mapping rule yet.
    pub fn field_rule(&self) -> Result<FieldSpec> {
        let capability =
            self.widget_type
                .capability()
                .ok_or_else(|| Error::UnsupportedWidgetType {
                    field: self.field_name.clone(),
                    widget_type: self.widget_type.to_string(),
                })?;

        Ok(FieldSpec {
            name: self.field_name.clone(),
            widget_name: self.widget_name.clone(),
            kind: capability.kind,
            coercion: capability.coercion,
            max_length: self.max_length,
            default: self.default_value.clone().map(FieldValue::from),
        })
    }
}

/// Builder for [`FieldMapper`]; all consistency checks run in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct FieldMapperBuilder {
    field_name: String,
    widget_name: String,
    widget_type: WidgetType,
    max_length: Option<usize>,
    default_value: Option<DefaultValue>,
}

impl FieldMapperBuilder {
    /// Set the widget kind.
    pub fn widget_type(mut self, widget_type: WidgetType) -> Self {
        self.widget_type = widget_type;
        self
    }

    /// Set maximum character length (text fields only).
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set the default value.
    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Validate and build the descriptor.
    pub fn build(self) -> Result<FieldMapper> {
        if self.field_name.is_empty() {
            return Err(Error::InvalidConfiguration(
                "field_name must not be empty".to_string(),
            ));
        }
        if self.widget_name.is_empty() {
            return Err(Error::InvalidConfiguration(format!(
                "widget_name of field '{}' must not be empty",
                self.field_name
            )));
        }

        if let Some(max_length) = self.max_length {
            if max_length == 0 {
                return Err(Error::InvalidConfiguration(format!(
                    "max_length of field '{}' must be positive",
                    self.field_name
                )));
            }
            if self.widget_type != WidgetType::Text {
                return Err(Error::InvalidConfiguration(format!(
                    "max_length only applies to text fields, '{}' is a {} field",
                    self.field_name, self.widget_type
                )));
            }
        }

        if let Some(default) = &self.default_value {
            if !self.widget_type.accepts_default(default) {
                return Err(Error::InvalidDefaultValue {
                    field: self.field_name,
                    reason: format!(
                        "{} default must be a {}, got a {}",
                        self.widget_type,
                        expected_default(self.widget_type),
                        default.kind_name()
                    ),
                });
            }
            if let (DefaultValue::Text(text), Some(max_length)) = (default, self.max_length) {
                if text.chars().count() > max_length {
                    return Err(Error::InvalidDefaultValue {
                        field: self.field_name,
                        reason: format!("default is longer than max_length {}", max_length),
                    });
                }
            }
        }

        Ok(FieldMapper {
            field_name: self.field_name,
            widget_type: self.widget_type,
            max_length: self.max_length,
            widget_name: self.widget_name,
            default_value: self.default_value,
        })
    }
}

fn expected_default(widget_type: WidgetType) -> &'static str {
    widget_type
        .capability()
        .map(|cap| cap.kind.name())
        .unwrap_or("value")
}
