//! Validation reports.

use std::fmt;

/// One failing field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Logical field name
    pub field: String,
    /// Input key the offending value was read from, if any
    pub input_key: Option<String>,
    /// What went wrong
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.input_key {
            Some(key) if key != &self.field => {
                write!(f, "{} (input key '{}'): {}", self.field, key, self.reason)
            },
            _ => write!(f, "{}: {}", self.field, self.reason),
        }
    }
}

/// Every field that failed while binding input to a form model.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    model: String,
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Empty report for the named model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            errors: Vec::new(),
        }
    }

    /// Record a failure.
    pub fn push(
        &mut self,
        field: impl Into<String>,
        input_key: Option<&str>,
        reason: impl Into<String>,
    ) {
        self.errors.push(FieldError {
            field: field.into(),
            input_key: input_key.map(str::to_string),
            reason: reason.into(),
        });
    }

    /// Name of the model that was validated.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// All failures, in field order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Number of failures.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when nothing failed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the given logical field failed.
    pub fn contains_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(())` if empty, otherwise the report itself.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.errors.len() == 1 { "" } else { "s" };
        write!(
            f,
            "{} validation error{} for {}",
            self.errors.len(),
            plural,
            self.model
        )?;
        for error in &self.errors {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_every_field() {
        let mut errors = ValidationErrors::new("Form8962");
        errors.push("ssn", Some("f1_2[0]"), "string should have at most 11 characters");
        errors.push("exceptions", Some("exceptions"), "input should be a valid boolean");

        let msg = errors.to_string();
        assert!(msg.starts_with("2 validation errors for Form8962"));
        assert!(msg.contains("ssn (input key 'f1_2[0]'): string should have at most 11"));
        assert!(msg.contains("exceptions: input should be a valid boolean"));
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationErrors::new("F").into_result().is_ok());

        let mut errors = ValidationErrors::new("F");
        errors.push("a", None, "bad");
        let report = errors.into_result().unwrap_err();
        assert_eq!(report.len(), 1);
        assert!(report.contains_field("a"));
        assert!(!report.contains_field("b"));
    }
}
