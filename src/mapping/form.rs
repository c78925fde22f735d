//! PDF form definitions.
//!
//! A [`PdfForm`] ties a list of [`FieldMapper`]s to a blank template PDF. The
//! record model is synthesized on first use and cached for the lifetime of the
//! form, so repeated validations share one model.
//!
//! # Example
//!
//! ```no_run
//! use pdf_formfill::mapping::{FieldMapper, PdfForm, WidgetType};
//! use serde_json::json;
//!
//! let form = PdfForm::new(
//!     "Form8962",
//!     vec![
//!         FieldMapper::new("name", WidgetType::Text, "f1_1[0]")?,
//!         FieldMapper::new("ssn", WidgetType::Text, "f1_2[0]")?,
//!         FieldMapper::new("exceptions", WidgetType::Checkbox, "c1_1[0]")?,
//!     ],
//!     "tests/samples/f8962.pdf",
//! )?;
//!
//! let record = form.model_validate(&json!({
//!     "name": "John Doe",
//!     "ssn": "123-45-6789",
//!     "exceptions": true,
//! }))?;
//!
//! form.generate_pdf(&record, "filled_form.pdf")?;
//! # Ok::<(), pdf_formfill::Error>(())
//! ```

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError};

use serde::{Deserialize, Serialize};

use super::field::FieldMapper;
use super::model::FormModel;
use super::record::FormRecord;
use crate::backend::{FormWriter, LopdfBackend};
use crate::error::{Error, Result};
use crate::output;

/// A fillable PDF form: named descriptors plus the blank template.
#[derive(Serialize, Deserialize)]
#[serde(try_from = "PdfFormDef")]
pub struct PdfForm {
    name: String,
    fields: Vec<FieldMapper>,
    blank_pdf_path: PathBuf,
    #[serde(skip)]
    model: OnceLock<FormModel>,
    #[serde(skip)]
    init_guard: Mutex<()>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PdfFormDef {
    name: String,
    fields: Vec<FieldMapper>,
    blank_pdf_path: PathBuf,
}

impl TryFrom<PdfFormDef> for PdfForm {
    type Error = Error;

    fn try_from(def: PdfFormDef) -> Result<Self> {
        PdfForm::new(def.name, def.fields, def.blank_pdf_path)
    }
}

impl fmt::Debug for PdfForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfForm")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("blank_pdf_path", &self.blank_pdf_path)
            .field("model_built", &self.model.get().is_some())
            .finish()
    }
}

impl PdfForm {
    /// Declare a form.
    ///
    /// Field names and widget names must each be unique, and a field name may
    /// not double as another field's widget name, otherwise input keys would
    /// be ambiguous.
    pub fn new(
        name: impl Into<String>,
        fields: Vec<FieldMapper>,
        blank_pdf_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidConfiguration(
                "form name must not be empty".to_string(),
            ));
        }
        check_unique_keys(&name, &fields)?;

        Ok(Self {
            name,
            fields,
            blank_pdf_path: blank_pdf_path.into(),
            model: OnceLock::new(),
            init_guard: Mutex::new(()),
        })
    }

    /// Load a form definition from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a form definition from a JSON file.
    ///
    /// A relative `blank_pdf_path` is resolved against the definition file's
    /// directory.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut form = Self::from_json_str(&text)?;
        if form.blank_pdf_path.is_relative() {
            if let Some(dir) = path.parent() {
                form.blank_pdf_path = dir.join(&form.blank_pdf_path);
            }
        }
        Ok(form)
    }

    /// Form (and model) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field descriptors, in declaration order.
    pub fn fields(&self) -> &[FieldMapper] {
        &self.fields
    }

    /// Template path.
    pub fn blank_pdf_path(&self) -> &Path {
        &self.blank_pdf_path
    }

    /// The synthesized model, built on first call and cached.
    ///
    /// Synthesis runs under a guard so concurrent first calls build the model
    /// once. A failed synthesis caches nothing.
    pub fn form_model(&self) -> Result<&FormModel> {
        if let Some(model) = self.model.get() {
            return Ok(model);
        }

        let _guard = self
            .init_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(model) = self.model.get() {
            return Ok(model);
        }

        let model = FormModel::build(&self.name, &self.fields)?;
        log::debug!(
            "Synthesized model '{}' with {} fields",
            model.name(),
            model.len()
        );
        Ok(self.model.get_or_init(|| model))
    }

    /// Whether the model has been synthesized yet.
    pub fn is_model_built(&self) -> bool {
        self.model.get().is_some()
    }

    /// Bind input (a mapping, or any record that serializes to one).
    pub fn model_validate<T: Serialize + ?Sized>(&self, input: &T) -> Result<FormRecord> {
        self.form_model()?.validate_from(input)
    }

    /// Fill the template with a bound record and return the PDF bytes.
    pub fn fill_bytes(&self, record: &FormRecord) -> Result<Vec<u8>> {
        self.fill_bytes_with(&LopdfBackend::default(), record)
    }

    /// Fill the template through the given writer.
    pub fn fill_bytes_with(&self, writer: &dyn FormWriter, record: &FormRecord) -> Result<Vec<u8>> {
        if record.model_name() != self.name {
            return Err(Error::InvalidConfiguration(format!(
                "record was bound against '{}', not '{}'",
                record.model_name(),
                self.name
            )));
        }

        let values = record.to_widget_values();
        let bytes = writer.fill(&self.blank_pdf_path, &values)?;
        if bytes.is_empty() {
            return Err(Error::Pdf("writer produced no output".to_string()));
        }
        Ok(bytes)
    }

    /// Write a filled PDF to `output_path`.
    ///
    /// The output appears only once it is complete; on any failure no file is
    /// left at `output_path`.
    pub fn generate_pdf(&self, record: &FormRecord, output_path: impl AsRef<Path>) -> Result<()> {
        self.generate_pdf_with(&LopdfBackend::default(), record, output_path)
    }

    /// Write a filled PDF to `output_path` through the given writer.
    pub fn generate_pdf_with(
        &self,
        writer: &dyn FormWriter,
        record: &FormRecord,
        output_path: impl AsRef<Path>,
    ) -> Result<()> {
        let output_path = output_path.as_ref();
        let bytes = self.fill_bytes_with(writer, record)?;
        output::write_atomic(output_path, &bytes)?;
        log::info!(
            "Wrote filled '{}' ({} bytes) to {}",
            self.name,
            bytes.len(),
            output_path.display()
        );
        Ok(())
    }
}

fn check_unique_keys(form: &str, fields: &[FieldMapper]) -> Result<()> {
    let mut field_names = HashSet::new();
    let mut widget_names = HashSet::new();

    for field in fields {
        if !field_names.insert(field.field_name()) {
            return Err(Error::InvalidConfiguration(format!(
                "form '{}' declares field '{}' more than once",
                form,
                field.field_name()
            )));
        }
        if !widget_names.insert(field.widget_name()) {
            return Err(Error::InvalidConfiguration(format!(
                "form '{}' maps widget '{}' more than once",
                form,
                field.widget_name()
            )));
        }
    }

    for field in fields {
        let clash = fields.iter().find(|other| {
            other.field_name() != field.field_name() && other.widget_name() == field.field_name()
        });
        if let Some(other) = clash {
            return Err(Error::InvalidConfiguration(format!(
                "field name '{}' is also the widget name of field '{}'",
                field.field_name(),
                other.field_name()
            )));
        }
    }

    Ok(())
}
