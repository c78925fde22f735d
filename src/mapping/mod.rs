//! Mapping between data records and PDF form widgets.
//!
//! - [`FieldMapper`]: one logical field mapped to one widget
//! - [`PdfForm`]: named set of descriptors plus the blank template
//! - [`FormModel`]: record type synthesized from the descriptors
//! - [`FormRecord`]: validated input, serializable by widget name

pub mod coerce;
pub mod field;
pub mod form;
pub mod model;
pub mod record;
pub mod validation;
pub mod widget;

pub use field::{DefaultValue, FieldMapper, FieldMapperBuilder};
pub use form::PdfForm;
pub use model::{FieldSpec, FormModel};
pub use record::{FieldValue, FormRecord};
pub use validation::{FieldError, ValidationErrors};
pub use widget::{Coercion, ValueKind, WidgetCapability, WidgetType};
