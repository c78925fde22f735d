//! lopdf-based form backend.
//!
//! Implements [`FormWriter`] and [`FormInspector`] on top of
//! [lopdf](https://crates.io/crates/lopdf): the template is parsed into an
//! object graph, the AcroForm fields are located by name, their values are
//! rewritten in place and the document is saved back to bytes.

use std::path::Path;

use indexmap::IndexMap;
use lopdf::{Dictionary, Document, Object, ObjectId};
use serde_json::{json, Map, Value};

use super::acroform::{self, AcroField, AcroFieldKind};
use super::field_flags::{ChoiceFieldFlags, TextFieldFlags};
use super::{FormInspector, FormWriter};
use crate::config::FillConfig;
use crate::error::{Error, Result};
use crate::mapping::FieldValue;

/// Form backend backed by lopdf.
#[derive(Debug, Clone, Default)]
pub struct LopdfBackend {
    config: FillConfig,
}

impl LopdfBackend {
    /// Backend with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend with the given configuration.
    pub fn with_config(config: FillConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &FillConfig {
        &self.config
    }

    /// Fill an in-memory template.
    pub fn fill_bytes(&self, template: &[u8], values: &IndexMap<String, FieldValue>) -> Result<Vec<u8>> {
        let mut doc = Document::load_mem(template)?;
        self.fill_document(&mut doc, values)?;
        save(&mut doc)
    }

    /// Write `values` into the fields of a loaded document.
    pub fn fill_document(
        &self,
        doc: &mut Document,
        values: &IndexMap<String, FieldValue>,
    ) -> Result<()> {
        let fields = acroform::collect_fields(doc)?;

        for (widget_name, value) in values {
            let targets = lookup(&fields, widget_name);
            if targets.is_empty() {
                if self.config.strict {
                    return Err(Error::WidgetNotFound(widget_name.clone()));
                }
                log::warn!("Widget '{}' not found in template, skipping", widget_name);
                continue;
            }
            for field in targets {
                write_value(doc, field, widget_name, value)?;
            }
        }

        if self.config.need_appearances && !values.is_empty() {
            set_need_appearances(doc)?;
        }
        Ok(())
    }

    /// Values currently stored in the template's fields, keyed by full name.
    pub fn field_values(&self, template: &Path) -> Result<IndexMap<String, Option<String>>> {
        let doc = load(template)?;
        Ok(acroform::collect_fields(&doc)?
            .into_iter()
            .map(|field| (field.full_name, field.value))
            .collect())
    }
}

impl FormWriter for LopdfBackend {
    fn fill(&self, template: &Path, values: &IndexMap<String, FieldValue>) -> Result<Vec<u8>> {
        let mut doc = load(template)?;
        self.fill_document(&mut doc, values)?;
        let bytes = save(&mut doc)?;
        log::debug!(
            "Filled {} values into {} ({} bytes)",
            values.len(),
            template.display(),
            bytes.len()
        );
        Ok(bytes)
    }
}

impl FormInspector for LopdfBackend {
    fn schema(&self, template: &Path) -> Result<Value> {
        let doc = load(template)?;
        let fields = acroform::collect_fields(&doc)?;

        let mut properties = Map::new();
        for field in &fields {
            properties.insert(schema_key(field, &fields), field_schema(field));
        }

        Ok(json!({
            "type": "object",
            "properties": properties,
        }))
    }

    fn preview(&self, template: &Path) -> Result<Vec<u8>> {
        let mut doc = load(template)?;
        let fields = acroform::collect_fields(&doc)?;

        for field in &fields {
            let value = match field.kind {
                AcroFieldKind::Text => FieldValue::Text(schema_key(field, &fields)),
                AcroFieldKind::Checkbox => FieldValue::Bool(true),
                _ => continue,
            };
            write_value(&mut doc, field, &field.full_name, &value)?;
        }
        if !fields.is_empty() && self.config.need_appearances {
            set_need_appearances(&mut doc)?;
        }

        save(&mut doc)
    }
}

fn load(template: &Path) -> Result<Document> {
    let bytes = std::fs::read(template)?;
    log::debug!("Loaded template {} ({} bytes)", template.display(), bytes.len());
    Ok(Document::load_mem(&bytes)?)
}

fn save(doc: &mut Document) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| Error::Pdf(format!("failed to save document: {}", e)))?;
    Ok(buf)
}

/// Fields addressed by `name`: an exact full-name match wins, otherwise every
/// field whose terminal name matches.
fn lookup<'a>(fields: &'a [AcroField], name: &str) -> Vec<&'a AcroField> {
    if let Some(field) = fields.iter().find(|f| f.full_name == name) {
        return vec![field];
    }
    fields.iter().filter(|f| f.partial_name == name).collect()
}

/// Schema key: the terminal name, unless another field shares it.
fn schema_key(field: &AcroField, fields: &[AcroField]) -> String {
    let shared = fields
        .iter()
        .filter(|f| f.partial_name == field.partial_name)
        .count()
        > 1;
    if shared || field.partial_name.is_empty() {
        field.full_name.clone()
    } else {
        field.partial_name.clone()
    }
}

fn field_schema(field: &AcroField) -> Value {
    let widget_type = field
        .kind
        .widget_type()
        .map(|t| t.as_str())
        .unwrap_or_else(|| field.kind.as_str());

    let mut schema = Map::new();
    match field.kind {
        AcroFieldKind::Text => {
            schema.insert("type".into(), json!("string"));
            if let Some(max_length) = field.max_length {
                schema.insert("maxLength".into(), json!(max_length));
            }
            let flags = TextFieldFlags::from_bits_truncate(field.flags);
            if flags.contains(TextFieldFlags::MULTILINE) {
                schema.insert("multiline".into(), json!(true));
            }
            if flags.contains(TextFieldFlags::COMB) {
                schema.insert("comb".into(), json!(true));
            }
            if flags.contains(TextFieldFlags::REQUIRED) {
                schema.insert("required".into(), json!(true));
            }
        },
        AcroFieldKind::Checkbox => {
            schema.insert("type".into(), json!("boolean"));
        },
        AcroFieldKind::Radio => {
            let states = field.on_states();
            schema.insert("type".into(), json!("integer"));
            schema.insert("maximum".into(), json!(states.len().saturating_sub(1)));
            schema.insert("choices".into(), json!(states));
        },
        AcroFieldKind::ComboBox | AcroFieldKind::ListBox => {
            schema.insert("type".into(), json!("integer"));
            schema.insert(
                "maximum".into(),
                json!(field.options.len().saturating_sub(1)),
            );
            schema.insert("choices".into(), json!(field.options));
            let flags = ChoiceFieldFlags::from_bits_truncate(field.flags);
            if flags.contains(ChoiceFieldFlags::MULTI_SELECT) {
                schema.insert("multiSelect".into(), json!(true));
            }
        },
        AcroFieldKind::Signature | AcroFieldKind::PushButton | AcroFieldKind::Unknown => {
            schema.insert("type".into(), json!("string"));
        },
    }
    schema.insert("widget_type".into(), json!(widget_type));
    schema.insert("full_name".into(), json!(field.full_name));
    Value::Object(schema)
}

fn write_value(doc: &mut Document, field: &AcroField, widget_name: &str, value: &FieldValue) -> Result<()> {
    match (field.kind, value) {
        (AcroFieldKind::Text | AcroFieldKind::ComboBox | AcroFieldKind::ListBox, FieldValue::Text(text)) => {
            if let Some(max_length) = field.max_length {
                if text.chars().count() > max_length as usize {
                    log::warn!(
                        "Value for '{}' exceeds the template's /MaxLen {}",
                        widget_name,
                        max_length
                    );
                }
            }
            dict_mut(doc, field.field_id)?.set("V", acroform::encode_text_string(text));
        },
        (AcroFieldKind::Checkbox, FieldValue::Bool(checked)) => {
            let mut field_state = "Off".to_string();
            for widget in &field.widgets {
                let state = if *checked {
                    widget.on_state.clone().unwrap_or_else(|| "Yes".to_string())
                } else {
                    "Off".to_string()
                };
                if *checked && field_state == "Off" {
                    field_state = state.clone();
                }
                dict_mut(doc, widget.id)?.set("AS", Object::Name(state.into_bytes()));
            }
            dict_mut(doc, field.field_id)?.set("V", Object::Name(field_state.into_bytes()));
        },
        (kind, value) => {
            return Err(Error::WidgetTypeMismatch {
                widget: widget_name.to_string(),
                expected: kind.as_str().to_string(),
                found: value.kind_name().to_string(),
            });
        },
    }
    log::trace!("Set '{}' = {:?}", widget_name, value);
    Ok(())
}

fn dict_mut(doc: &mut Document, id: ObjectId) -> Result<&mut Dictionary> {
    Ok(doc.get_object_mut(id)?.as_dict_mut()?)
}

fn set_need_appearances(doc: &mut Document) -> Result<()> {
    let root_id = doc.trailer.get(b"Root")?.as_reference()?;
    let acroform = doc.get_object(root_id)?.as_dict()?.get(b"AcroForm").cloned();

    match acroform {
        Ok(Object::Reference(id)) => {
            dict_mut(doc, id)?.set("NeedAppearances", true);
        },
        Ok(Object::Dictionary(_)) => {
            dict_mut(doc, root_id)?
                .get_mut(b"AcroForm")?
                .as_dict_mut()?
                .set("NeedAppearances", true);
        },
        _ => log::debug!("No AcroForm to flag for appearance regeneration"),
    }
    Ok(())
}
