//! Write path: promote registered text attributes before they are persisted.

use tracing::trace;

use super::{invalid_encoding, WritePolicy};
use crate::attributes::{AttrValue, TextValue};
use crate::error::Result;
use crate::model::Record;
use crate::schema::TypeDef;

/// Canonicalize every registered text attribute of `record` in place.
///
/// Null, missing, non-text and structured values are skipped. Returns how many
/// raw values were promoted to encoded text. With [`WritePolicy::Trusting`]
/// this never fails; with [`WritePolicy::Strict`] the first invalid value
/// fails the write and is left raw.
pub fn normalize_for_write(
    def: &TypeDef,
    record: &mut Record,
    policy: WritePolicy,
) -> Result<usize> {
    let mut promoted = 0;

    for name in def.encoded_attributes().iter() {
        let Some(AttrValue::Text(text)) = record.get_mut(name) else {
            continue;
        };
        if text.is_encoded() {
            continue;
        }

        let raw = std::mem::replace(text, TextValue::Raw(Vec::new()));
        *text = match policy {
            WritePolicy::Trusting => raw.promote(),
            WritePolicy::Strict => match raw.validate() {
                Ok(valid) => valid,
                Err(invalid) => {
                    *text = TextValue::Raw(invalid.bytes);
                    return Err(invalid_encoding(def, name, invalid.error));
                }
            },
        };

        if text.is_encoded() {
            promoted += 1;
            trace!(object_type = %def.name(), attribute = name, "promoted raw bytes");
        } else {
            trace!(
                object_type = %def.name(),
                attribute = name,
                "raw bytes are not UTF-8; storing unchanged"
            );
        }
    }

    Ok(promoted)
}
