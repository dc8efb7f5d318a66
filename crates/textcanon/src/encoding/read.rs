//! Read path: reinterpret loaded bytes as text and validate them.

use tracing::trace;

use super::invalid_encoding;
use crate::attributes::{AttrValue, TextValue};
use crate::error::Result;
use crate::model::Record;
use crate::schema::TypeDef;

/// Turn every registered raw text attribute of a freshly loaded `record` into
/// encoded text.
///
/// The first attribute whose bytes are not UTF-8 fails the load with
/// `InvalidEncoding`. That attribute is rebuilt as `Raw` from its original
/// bytes before the error is returned, so a caller that recovers from the
/// error still holds a consistent record. Attributes validated before the
/// failure stay encoded.
pub fn reconstruct_after_load(def: &TypeDef, record: &mut Record) -> Result<()> {
    for name in def.encoded_attributes().iter() {
        let Some(AttrValue::Text(text)) = record.get_mut(name) else {
            continue;
        };

        let loaded = std::mem::replace(text, TextValue::Raw(Vec::new()));
        match loaded.validate() {
            Ok(valid) => {
                *text = valid;
                trace!(object_type = %def.name(), attribute = name, "reconstructed text");
            }
            Err(invalid) => {
                *text = TextValue::Raw(invalid.bytes);
                return Err(invalid_encoding(def, name, invalid.error));
            }
        }
    }
    Ok(())
}
