//! Template inspection helpers.
//!
//! Thin wrappers over the default [`FormInspector`] for tooling: dump a blank
//! template's widget schema, or write a preview PDF showing each widget's name
//! in place.

use std::path::Path;

use serde_json::Value;

use crate::backend::{FormInspector, LopdfBackend};
use crate::error::Result;
use crate::output;

/// Write a preview of the template at `input_file` to `output_file`.
pub fn generate_preview(input_file: impl AsRef<Path>, output_file: impl AsRef<Path>) -> Result<()> {
    generate_preview_with(&LopdfBackend::default(), input_file, output_file)
}

/// Write a preview through the given inspector.
pub fn generate_preview_with(
    inspector: &dyn FormInspector,
    input_file: impl AsRef<Path>,
    output_file: impl AsRef<Path>,
) -> Result<()> {
    let (input_file, output_file) = (input_file.as_ref(), output_file.as_ref());
    let bytes = inspector.preview(input_file)?;
    output::write_atomic(output_file, &bytes)?;
    log::info!(
        "Wrote preview of {} to {}",
        input_file.display(),
        output_file.display()
    );
    Ok(())
}

/// Widget schema of the template at `input_file`.
pub fn generate_schema(input_file: impl AsRef<Path>) -> Result<Value> {
    LopdfBackend::default().schema(input_file.as_ref())
}
