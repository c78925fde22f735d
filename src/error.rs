//! Error types for form mapping and filling.
//!
//! This module defines all error types that can occur while declaring a form,
//! binding input data to it, and writing the filled PDF.

use crate::mapping::validation::ValidationErrors;

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during form mapping and filling.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::enum_variant_names)] // "Invalid" prefix is intentional for clarity
pub enum Error {
    /// A field's default value does not fit its widget type
    #[error("Invalid default value for field '{field}': {reason}")]
    InvalidDefaultValue {
        /// Logical field name
        field: String,
        /// Why the default was rejected
        reason: String,
    },

    /// A descriptor or form was declared with inconsistent configuration
    #[error("Invalid form configuration: {0}")]
    InvalidConfiguration(String),

    /// Schema synthesis hit a widget kind with no mapping rule
    #[error("Widget type '{widget_type}' of field '{field}' is not implemented")]
    UnsupportedWidgetType {
        /// Logical field name
        field: String,
        /// Offending widget type
        widget_type: String,
    },

    /// Input data failed validation against a form model
    #[error("{0}")]
    Validation(ValidationErrors),

    /// A widget name is not present in the template
    #[error("Widget not found in template: {0}")]
    WidgetNotFound(String),

    /// A value does not fit the widget it is written to
    #[error("Widget '{widget}' is a {expected} field, cannot write a {found} value")]
    WidgetTypeMismatch {
        /// Widget name
        widget: String,
        /// Kind of the widget in the template
        expected: String,
        /// Kind of the supplied value
        found: String,
    },

    /// PDF backend failure (parse or serialize)
    #[error("PDF error: {0}")]
    Pdf(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for errors raised while declaring descriptors or forms.
    pub fn is_construction_error(&self) -> bool {
        matches!(self, Error::InvalidDefaultValue { .. } | Error::InvalidConfiguration(_))
    }

    /// The validation report, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Error::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::Pdf(err.to_string())
    }
}

impl From<ValidationErrors> for Error {
    fn from(errors: ValidationErrors) -> Self {
        Error::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_default_value_error() {
        let err = Error::InvalidDefaultValue {
            field: "exceptions".to_string(),
            reason: "checkbox default must be a boolean".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("exceptions"));
        assert!(msg.contains("boolean"));
        assert!(err.is_construction_error());
    }

    #[test]
    fn test_unsupported_widget_type_error() {
        let err = Error::UnsupportedWidgetType {
            field: "state".to_string(),
            widget_type: "dropdown".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("state"));
        assert!(msg.contains("dropdown"));
        assert!(!err.is_construction_error());
    }

    #[test]
    fn test_widget_type_mismatch_error() {
        let err = Error::WidgetTypeMismatch {
            widget: "c1_1[0]".to_string(),
            expected: "checkbox".to_string(),
            found: "text".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("c1_1[0]"));
        assert!(msg.contains("checkbox"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.pdf");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(format!("{}", err).contains("missing.pdf"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
