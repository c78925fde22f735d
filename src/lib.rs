// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::enum_variant_names)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # pdf_formfill
//!
//! Map the named fields of a fillable PDF form to a validated record, bind
//! user data against it, and write a filled copy of the form.
//!
//! ## Core Features
//!
//! - **Declarative descriptors**: [`FieldMapper`] maps a logical field name to a
//!   widget identifier, widget kind, length limit and default
//! - **Synthesized models**: [`PdfForm`] builds a [`FormModel`] from its
//!   descriptors on first use and caches it
//! - **Lenient binding**: input may use logical names or widget names; numbers
//!   and `null` are coerced into text before validation; every failing field is
//!   reported at once
//! - **Filling**: values keyed by widget name are written into the template's
//!   AcroForm through a pluggable [`FormWriter`]; output is written atomically
//! - **Inspection**: widget schema and name-preview of blank templates
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_formfill::{FieldMapper, PdfForm, WidgetType};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let form = PdfForm::new(
//!     "Form8962",
//!     vec![
//!         FieldMapper::new("name", WidgetType::Text, "f1_1[0]")?,
//!         FieldMapper::new("ssn", WidgetType::Text, "f1_2[0]")?,
//!         FieldMapper::new("modified_agi", WidgetType::Text, "f1_4[0]")?,
//!         FieldMapper::new("exceptions", WidgetType::Checkbox, "c1_1[0]")?,
//!     ],
//!     "f8962.pdf",
//! )?;
//!
//! let record = form.model_validate(&json!({
//!     "name": "John Doe",
//!     "ssn": "123-45-6789",
//!     "modified_agi": 10000.78,
//!     "exceptions": true,
//! }))?;
//! assert_eq!(record.get_text("modified_agi"), Some("10000.78"));
//!
//! form.generate_pdf(&record, "f8962_filled.pdf")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Field descriptors, models and binding
pub mod mapping;

// PDF backends
pub mod backend;

// Output writing
pub mod output;

// Template inspection
pub mod preview;

// Re-exports
pub use backend::{FormInspector, FormWriter, LopdfBackend};
pub use config::FillConfig;
pub use error::{Error, Result};
pub use mapping::{
    DefaultValue, FieldMapper, FieldValue, FormModel, FormRecord, PdfForm, ValidationErrors,
    WidgetType,
};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        // VERSION is populated from CARGO_PKG_VERSION at compile time
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pdf_formfill");
    }
}
