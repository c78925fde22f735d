//! AcroForm field discovery.
//!
//! Walks the interactive form of a document (ISO 32000-1:2008, Section 12.7)
//! and lists its terminal fields together with the widget annotations that
//! display them.

use std::collections::HashSet;

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};

use super::field_flags::{ButtonFieldFlags, ChoiceFieldFlags};
use crate::error::Result;
use crate::mapping::WidgetType;

/// Field hierarchies deeper than this are not followed.
const MAX_FIELD_DEPTH: usize = 32;

/// Kind of a terminal form field, from /FT and /Ff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcroFieldKind {
    /// /Tx
    Text,
    /// /Btn without radio or push button flags
    Checkbox,
    /// /Btn with the radio flag
    Radio,
    /// /Btn with the push button flag
    PushButton,
    /// /Ch with the combo flag
    ComboBox,
    /// /Ch without the combo flag
    ListBox,
    /// /Sig
    Signature,
    /// Missing or unrecognized /FT
    Unknown,
}

impl AcroFieldKind {
    fn classify(field_type: Option<&[u8]>, flags: u32) -> Self {
        match field_type {
            Some(b"Tx") => AcroFieldKind::Text,
            Some(b"Btn") => {
                let flags = ButtonFieldFlags::from_bits_truncate(flags);
                if flags.contains(ButtonFieldFlags::PUSHBUTTON) {
                    AcroFieldKind::PushButton
                } else if flags.contains(ButtonFieldFlags::RADIO) {
                    AcroFieldKind::Radio
                } else {
                    AcroFieldKind::Checkbox
                }
            },
            Some(b"Ch") => {
                if ChoiceFieldFlags::from_bits_truncate(flags).contains(ChoiceFieldFlags::COMBO) {
                    AcroFieldKind::ComboBox
                } else {
                    AcroFieldKind::ListBox
                }
            },
            Some(b"Sig") => AcroFieldKind::Signature,
            _ => AcroFieldKind::Unknown,
        }
    }

    /// Matching descriptor widget kind, if any.
    pub fn widget_type(&self) -> Option<WidgetType> {
        match self {
            AcroFieldKind::Text => Some(WidgetType::Text),
            AcroFieldKind::Checkbox => Some(WidgetType::Checkbox),
            AcroFieldKind::Radio => Some(WidgetType::Radio),
            AcroFieldKind::ComboBox | AcroFieldKind::ListBox => Some(WidgetType::Dropdown),
            AcroFieldKind::Signature => Some(WidgetType::Signature),
            AcroFieldKind::PushButton | AcroFieldKind::Unknown => None,
        }
    }

    /// Lowercase name for messages and schemas.
    pub fn as_str(&self) -> &'static str {
        match self {
            AcroFieldKind::Text => "text",
            AcroFieldKind::Checkbox => "checkbox",
            AcroFieldKind::Radio => "radio",
            AcroFieldKind::PushButton => "pushbutton",
            AcroFieldKind::ComboBox => "combobox",
            AcroFieldKind::ListBox => "listbox",
            AcroFieldKind::Signature => "signature",
            AcroFieldKind::Unknown => "unknown",
        }
    }
}

/// A widget annotation belonging to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    /// Annotation object
    pub id: ObjectId,
    /// Name of the "on" appearance state (buttons only)
    pub on_state: Option<String>,
}

/// A terminal form field.
#[derive(Debug, Clone)]
pub struct AcroField {
    /// Fully qualified name (`parent.child`)
    pub full_name: String,
    /// Terminal /T, the name widget identifiers usually refer to
    pub partial_name: String,
    /// Field kind
    pub kind: AcroFieldKind,
    /// Raw /Ff flags (inherited when absent)
    pub flags: u32,
    /// /MaxLen for text fields (inherited when absent)
    pub max_length: Option<u32>,
    /// Display values of /Opt for choice fields
    pub options: Vec<String>,
    /// Current /V decoded to text
    pub value: Option<String>,
    /// Field dictionary object
    pub field_id: ObjectId,
    /// Widget annotations; the field itself when field and widget are merged
    pub widgets: Vec<Widget>,
}

impl AcroField {
    /// Whether `name` refers to this field (by full or partial name).
    pub fn matches(&self, name: &str) -> bool {
        self.full_name == name || self.partial_name == name
    }

    /// Distinct on-states across widgets, in widget order.
    pub fn on_states(&self) -> Vec<String> {
        let mut states: Vec<String> = Vec::new();
        for state in self.widgets.iter().filter_map(|w| w.on_state.as_ref()) {
            if !states.contains(state) {
                states.push(state.clone());
            }
        }
        states
    }
}

#[derive(Debug, Clone, Default)]
struct Inherited {
    field_type: Option<Vec<u8>>,
    flags: Option<u32>,
    max_length: Option<u32>,
}

/// List every terminal field of the document's AcroForm.
///
/// Documents without an AcroForm yield an empty list. Cycles in /Kids and
/// hierarchies deeper than a fixed limit are skipped with a warning.
pub fn collect_fields(doc: &Document) -> Result<Vec<AcroField>> {
    let Some(acroform) = acroform_dict(doc)? else {
        log::debug!("Document has no AcroForm");
        return Ok(Vec::new());
    };

    let roots = match acroform.get(b"Fields").ok().and_then(|o| resolve(doc, o)) {
        Some(Object::Array(fields)) => reference_ids(fields),
        _ => Vec::new(),
    };

    let mut visited = HashSet::new();
    let mut result = Vec::new();
    for id in roots {
        walk(doc, id, "", &Inherited::default(), 0, &mut visited, &mut result)?;
    }

    log::debug!("Found {} form fields", result.len());
    Ok(result)
}

/// The AcroForm dictionary of the catalog, if present.
pub(crate) fn acroform_dict(doc: &Document) -> Result<Option<&Dictionary>> {
    let root_id = doc.trailer.get(b"Root")?.as_reference()?;
    let catalog = doc.get_object(root_id)?.as_dict()?;
    Ok(catalog
        .get(b"AcroForm")
        .ok()
        .and_then(|o| resolve(doc, o))
        .and_then(|o| o.as_dict().ok()))
}

fn walk(
    doc: &Document,
    id: ObjectId,
    parent_name: &str,
    inherited: &Inherited,
    depth: usize,
    visited: &mut HashSet<ObjectId>,
    result: &mut Vec<AcroField>,
) -> Result<()> {
    if depth > MAX_FIELD_DEPTH {
        log::warn!("Field hierarchy deeper than {} at object {:?}", MAX_FIELD_DEPTH, id);
        return Ok(());
    }
    if !visited.insert(id) {
        log::warn!("Circular field reference at object {:?}", id);
        return Ok(());
    }

    let dict = match doc.get_object(id) {
        Ok(Object::Dictionary(dict)) => dict,
        _ => return Ok(()),
    };

    let partial_name = dict
        .get(b"T")
        .ok()
        .and_then(|o| resolve(doc, o))
        .and_then(object_text)
        .unwrap_or_default();
    let full_name = match (parent_name.is_empty(), partial_name.is_empty()) {
        (true, _) => partial_name.clone(),
        (false, true) => parent_name.to_string(),
        (false, false) => format!("{}.{}", parent_name, partial_name),
    };

    let inherited = Inherited {
        field_type: match dict.get(b"FT").ok().and_then(|o| resolve(doc, o)) {
            Some(Object::Name(name)) => Some(name.clone()),
            _ => inherited.field_type.clone(),
        },
        flags: integer(doc, dict, b"Ff")
            .map(|i| i as u32)
            .or(inherited.flags),
        max_length: integer(doc, dict, b"MaxLen")
            .map(|i| i as u32)
            .or(inherited.max_length),
    };

    let kids = match dict.get(b"Kids").ok().and_then(|o| resolve(doc, o)) {
        Some(Object::Array(kids)) => reference_ids(kids),
        _ => Vec::new(),
    };
    let (field_kids, widget_kids): (Vec<ObjectId>, Vec<ObjectId>) =
        kids.into_iter().partition(|kid| is_named_field(doc, *kid));

    if !field_kids.is_empty() {
        for kid in field_kids {
            walk(doc, kid, &full_name, &inherited, depth + 1, visited, result)?;
        }
        return Ok(());
    }

    if full_name.is_empty() {
        log::debug!("Skipping unnamed field at object {:?}", id);
        return Ok(());
    }

    let flags = inherited.flags.unwrap_or(0);
    let kind = AcroFieldKind::classify(inherited.field_type.as_deref(), flags);
    let widget_ids = if widget_kids.is_empty() {
        vec![id]
    } else {
        widget_kids
    };
    let widgets = widget_ids
        .into_iter()
        .map(|wid| Widget {
            id: wid,
            on_state: match kind {
                AcroFieldKind::Checkbox | AcroFieldKind::Radio => on_state(doc, wid),
                _ => None,
            },
        })
        .collect();

    result.push(AcroField {
        full_name,
        partial_name,
        kind,
        flags,
        max_length: inherited.max_length,
        options: choice_options(doc, dict),
        value: dict
            .get(b"V")
            .ok()
            .and_then(|o| resolve(doc, o))
            .and_then(object_text),
        field_id: id,
        widgets,
    });
    Ok(())
}

fn is_named_field(doc: &Document, id: ObjectId) -> bool {
    matches!(doc.get_object(id), Ok(Object::Dictionary(d)) if d.has(b"T"))
}

/// The first appearance state other than /Off in the widget's normal appearances.
fn on_state(doc: &Document, widget_id: ObjectId) -> Option<String> {
    let widget = doc.get_object(widget_id).ok()?.as_dict().ok()?;
    let appearances = resolve(doc, widget.get(b"AP").ok()?)?.as_dict().ok()?;
    let normal = resolve(doc, appearances.get(b"N").ok()?)?.as_dict().ok()?;
    normal
        .iter()
        .map(|(key, _)| String::from_utf8_lossy(key).into_owned())
        .find(|key| key != "Off")
}

fn choice_options(doc: &Document, dict: &Dictionary) -> Vec<String> {
    let Some(Object::Array(options)) = dict.get(b"Opt").ok().and_then(|o| resolve(doc, o)) else {
        return Vec::new();
    };
    options
        .iter()
        .filter_map(|option| match resolve(doc, option)? {
            // [export display] pairs show the display string
            Object::Array(pair) => pair
                .get(1)
                .or_else(|| pair.first())
                .and_then(|o| resolve(doc, o))
                .and_then(object_text),
            other => object_text(other),
        })
        .collect()
}

fn integer(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<i64> {
    match dict.get(key).ok().and_then(|o| resolve(doc, o)) {
        Some(Object::Integer(i)) => Some(*i),
        _ => None,
    }
}

fn reference_ids(objects: &[Object]) -> Vec<ObjectId> {
    objects
        .iter()
        .filter_map(|o| match o {
            Object::Reference(id) => Some(*id),
            _ => {
                log::debug!("Skipping direct field object");
                None
            },
        })
        .collect()
}

/// Follow an indirect reference, or return the object itself.
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn object_text(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        Object::Array(items) => items.first().and_then(object_text),
        _ => None,
    }
}

/// Decode a PDF text string: UTF-16BE when it starts with a byte order mark,
/// otherwise single-byte (Latin-1 for the printable range).
pub fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

/// Encode text as a PDF string object: literal ASCII when possible, UTF-16BE
/// with a byte order mark otherwise.
pub fn encode_text_string(text: &str) -> Object {
    if text.is_ascii() {
        Object::String(text.as_bytes().to_vec(), StringFormat::Literal)
    } else {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in text.encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        Object::String(bytes, StringFormat::Hexadecimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    #[test]
    fn test_classify() {
        assert_eq!(AcroFieldKind::classify(Some(&b"Tx"[..]), 0), AcroFieldKind::Text);
        assert_eq!(AcroFieldKind::classify(Some(&b"Btn"[..]), 0), AcroFieldKind::Checkbox);
        assert_eq!(AcroFieldKind::classify(Some(&b"Btn"[..]), 1 << 15), AcroFieldKind::Radio);
        assert_eq!(AcroFieldKind::classify(Some(&b"Btn"[..]), 1 << 16), AcroFieldKind::PushButton);
        assert_eq!(AcroFieldKind::classify(Some(&b"Ch"[..]), 1 << 17), AcroFieldKind::ComboBox);
        assert_eq!(AcroFieldKind::classify(Some(&b"Ch"[..]), 0), AcroFieldKind::ListBox);
        assert_eq!(AcroFieldKind::classify(Some(&b"Sig"[..]), 0), AcroFieldKind::Signature);
        assert_eq!(AcroFieldKind::classify(None, 0), AcroFieldKind::Unknown);
    }

    #[test]
    fn test_widget_type_mapping() {
        assert_eq!(AcroFieldKind::ComboBox.widget_type(), Some(WidgetType::Dropdown));
        assert_eq!(AcroFieldKind::PushButton.widget_type(), None);
    }

    #[test]
    fn test_text_string_roundtrip_ascii() {
        let obj = encode_text_string("John Doe");
        match obj {
            Object::String(bytes, StringFormat::Literal) => {
                assert_eq!(decode_text_string(&bytes), "John Doe");
            },
            other => panic!("unexpected object {:?}", other),
        }
    }

    #[test]
    fn test_text_string_utf16() {
        let obj = encode_text_string("Zoë Łukasz");
        match obj {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
                assert_eq!(decode_text_string(&bytes), "Zoë Łukasz");
            },
            other => panic!("unexpected object {:?}", other),
        }
    }

    #[test]
    fn test_decode_latin1() {
        assert_eq!(decode_text_string(&[0x4A, 0xE9]), "Jé");
    }

    #[test]
    fn test_document_without_acroform() {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => Vec::<Object>::new(),
                "Count" => 0i64,
            }),
        );
        doc.trailer.set("Root", catalog_id);

        assert!(collect_fields(&doc).unwrap().is_empty());
    }
}
