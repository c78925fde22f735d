//! Configuration for filling PDF forms.

/// Options controlling how the PDF backend writes field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillConfig {
    /// Set `/NeedAppearances true` on the AcroForm so viewers regenerate
    /// widget appearances from the new values.
    pub need_appearances: bool,

    /// Fail with `WidgetNotFound` when a value targets a widget that the
    /// template does not contain. When false the value is skipped with a warning.
    pub strict: bool,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FillConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            need_appearances: true,
            strict: false,
        }
    }

    /// Enable or disable setting `/NeedAppearances`.
    pub fn with_need_appearances(mut self, enable: bool) -> Self {
        self.need_appearances = enable;
        self
    }

    /// Enable strict widget lookup.
    pub fn with_strict(mut self, enable: bool) -> Self {
        self.strict = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FillConfig::default();
        assert!(config.need_appearances);
        assert!(!config.strict);
    }

    #[test]
    fn test_builder() {
        let config = FillConfig::new()
            .with_need_appearances(false)
            .with_strict(true);
        assert!(!config.need_appearances);
        assert!(config.strict);
    }
}
