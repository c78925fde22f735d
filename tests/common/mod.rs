//! Blank form templates built in memory for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// A field to place on the template page.
pub enum TemplateField {
    /// Text box, optionally with /MaxLen
    Text(&'static str, Option<i64>),
    /// Checkbox whose on-state is the given appearance name
    Checkbox(&'static str, &'static str),
    /// Combo box with the given options
    Dropdown(&'static str, &'static [&'static str]),
    /// Radio group with one widget per on-state
    Radio(&'static str, &'static [&'static str]),
}

/// Build a one-page template. With `parent`, every field becomes a kid of a
/// non-terminal field with that name, as in IRS forms (`topmostSubform[0]`).
pub fn build_template(fields: &[TemplateField], parent: Option<&str>) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let page_id = doc.new_object_id();
    let parent_id = parent.map(|_| doc.new_object_id());

    let on_appearance = doc.add_object(Stream::new(Dictionary::new(), b"0 g 2 2 11 11 re f".to_vec()));
    let off_appearance = doc.add_object(Stream::new(Dictionary::new(), Vec::new()));

    let mut field_ids: Vec<Object> = Vec::new();
    let mut annots: Vec<Object> = Vec::new();
    let mut y = 740i64;

    for field in fields {
        y -= 30;
        let mut dict = match field {
            TemplateField::Text(name, max_len) => {
                let mut dict = widget(name, page_id, y);
                dict.set("FT", "Tx");
                dict.set("DA", Object::string_literal("/Helv 0 Tf 0 g"));
                if let Some(max_len) = max_len {
                    dict.set("MaxLen", *max_len);
                }
                dict
            },
            TemplateField::Checkbox(name, on_state) => {
                let mut dict = widget(name, page_id, y);
                dict.set("FT", "Btn");
                dict.set(
                    "AP",
                    dictionary! {
                        "N" => dictionary! {
                            *on_state => on_appearance,
                            "Off" => off_appearance,
                        },
                    },
                );
                dict.set("AS", "Off");
                dict.set("V", "Off");
                dict
            },
            TemplateField::Dropdown(name, options) => {
                let mut dict = widget(name, page_id, y);
                dict.set("FT", "Ch");
                dict.set("Ff", 1i64 << 17);
                dict.set(
                    "Opt",
                    options
                        .iter()
                        .map(|o| Object::string_literal(*o))
                        .collect::<Vec<_>>(),
                );
                dict
            },
            TemplateField::Radio(name, states) => {
                let group_id = doc.new_object_id();
                let mut kids = Vec::new();
                for (i, state) in states.iter().enumerate() {
                    let kid = doc.add_object(dictionary! {
                        "Type" => "Annot",
                        "Subtype" => "Widget",
                        "Rect" => rect(72 + 20 * i as i64, y, 15, 15),
                        "P" => page_id,
                        "Parent" => group_id,
                        "AS" => "Off",
                        "AP" => dictionary! {
                            "N" => dictionary! {
                                *state => on_appearance,
                                "Off" => off_appearance,
                            },
                        },
                    });
                    kids.push(Object::Reference(kid));
                    annots.push(Object::Reference(kid));
                }
                let mut group = dictionary! {
                    "FT" => "Btn",
                    "Ff" => 1i64 << 15,
                    "T" => Object::string_literal(*name),
                    "Kids" => kids,
                };
                if let Some(parent_id) = parent_id {
                    group.set("Parent", parent_id);
                }
                doc.objects.insert(group_id, Object::Dictionary(group));
                field_ids.push(Object::Reference(group_id));
                continue;
            },
        };
        if let Some(parent_id) = parent_id {
            dict.set("Parent", parent_id);
        }
        let id = doc.add_object(dict);
        field_ids.push(Object::Reference(id));
        annots.push(Object::Reference(id));
    }

    let root_fields = match (parent, parent_id) {
        (Some(parent), Some(parent_id)) => {
            doc.objects.insert(
                parent_id,
                Object::Dictionary(dictionary! {
                    "T" => Object::string_literal(parent),
                    "Kids" => field_ids,
                }),
            );
            vec![Object::Reference(parent_id)]
        },
        _ => field_ids,
    };

    doc.objects.insert(
        page_id,
        Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Annots" => annots,
        }),
    );
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1i64,
        }),
    );
    let acroform_id = doc.add_object(dictionary! {
        "Fields" => root_fields,
        "DA" => Object::string_literal("/Helv 0 Tf 0 g"),
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
        "AcroForm" => acroform_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save template");
    buf
}

fn widget(name: &str, page_id: ObjectId, y: i64) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "T" => Object::string_literal(name),
        "Rect" => rect(72, y, 200, 20),
        "P" => page_id,
    }
}

fn rect(x: i64, y: i64, w: i64, h: i64) -> Vec<Object> {
    vec![x.into(), y.into(), (x + w).into(), (y + h).into()]
}

/// Write a template into `dir` and return its path.
pub fn write_template(
    dir: &Path,
    file_name: &str,
    fields: &[TemplateField],
    parent: Option<&str>,
) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, build_template(fields, parent)).expect("failed to write template");
    path
}

/// Fields of the Form 8962 sample used across tests.
pub fn f8962_fields() -> Vec<TemplateField> {
    vec![
        TemplateField::Text("f1_1[0]", None),
        TemplateField::Text("f1_2[0]", Some(11)),
        TemplateField::Checkbox("c1_1[0]", "1"),
        TemplateField::Text("f1_3[0]", None),
        TemplateField::Text("f1_4[0]", None),
        TemplateField::Text("f1_5[0]", None),
        TemplateField::Text("f1_6[0]", None),
    ]
}

/// Form 8962-like template, fields nested under `topmostSubform[0]`.
pub fn f8962_template(dir: &Path) -> PathBuf {
    write_template(dir, "f8962.pdf", &f8962_fields(), Some("topmostSubform[0]"))
}
