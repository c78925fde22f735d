//! PDF backends.
//!
//! The mapping layer never touches PDF bytes. It hands values keyed by widget
//! name to a [`FormWriter`] and receives the filled document back. Tooling that
//! inspects blank templates goes through [`FormInspector`].

pub mod acroform;
pub mod field_flags;
pub mod lopdf_backend;

use std::path::Path;

use indexmap::IndexMap;

use crate::error::Result;
use crate::mapping::FieldValue;

pub use acroform::{AcroField, AcroFieldKind, Widget};
pub use lopdf_backend::LopdfBackend;

/// Writes values into a template's widgets.
pub trait FormWriter {
    /// Fill `template` with `values` (keyed by widget name) and return the
    /// complete output document.
    fn fill(&self, template: &Path, values: &IndexMap<String, FieldValue>) -> Result<Vec<u8>>;
}

/// Describes blank templates for tooling.
pub trait FormInspector {
    /// Widget metadata of the template as a JSON-Schema-shaped object.
    fn schema(&self, template: &Path) -> Result<serde_json::Value>;

    /// Copy of the template with every text widget showing its own name and
    /// every checkbox checked.
    fn preview(&self, template: &Path) -> Result<Vec<u8>>;
}
