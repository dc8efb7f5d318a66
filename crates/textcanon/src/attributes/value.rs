//! Attribute value types and encoding state transitions.
//!
//! A text attribute is either raw bytes straight from (or bound for) storage,
//! or encoded text that is known to be valid UTF-8. Moving between the two is
//! an explicit transition that consumes the old value and returns a new one,
//! so there is no way to hold a value tagged as text whose bytes are invalid.

use std::fmt;

/// A textual scalar in one of its two representational states.
///
/// The state is transient and instance-local: storage only ever sees bytes.
#[derive(Clone, PartialEq, Eq)]
pub enum TextValue {
    /// Untagged bytes with no encoding guarantee.
    Raw(Vec<u8>),

    /// Validated canonical (UTF-8) text.
    Encoded(String),
}

/// Bytes that failed UTF-8 validation, handed back untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidText {
    pub bytes: Vec<u8>,
    pub error: std::str::Utf8Error,
}

impl TextValue {
    pub fn raw(bytes: impl Into<Vec<u8>>) -> Self {
        TextValue::Raw(bytes.into())
    }

    pub fn encoded(text: impl Into<String>) -> Self {
        TextValue::Encoded(text.into())
    }

    pub fn is_encoded(&self) -> bool {
        matches!(self, TextValue::Encoded(_))
    }

    /// The underlying bytes, regardless of state.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            TextValue::Raw(bytes) => bytes,
            TextValue::Encoded(text) => text.as_bytes(),
        }
    }

    /// The text content, only available once the value is encoded.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TextValue::Raw(_) => None,
            TextValue::Encoded(text) => Some(text),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            TextValue::Raw(bytes) => bytes,
            TextValue::Encoded(text) => text.into_bytes(),
        }
    }

    /// Drop the encoding tag. This is what crosses the storage boundary.
    pub fn into_raw(self) -> Self {
        TextValue::Raw(self.into_bytes())
    }

    /// Write-path promotion.
    ///
    /// Encoded text is returned as is. Raw bytes that already form valid UTF-8
    /// are re-tagged without copying. Raw bytes that do not are returned
    /// unchanged: promotion never fails and never transcodes.
    pub fn promote(self) -> Self {
        match self {
            TextValue::Encoded(text) => TextValue::Encoded(text),
            TextValue::Raw(bytes) => match String::from_utf8(bytes) {
                Ok(text) => TextValue::Encoded(text),
                Err(err) => TextValue::Raw(err.into_bytes()),
            },
        }
    }

    /// Read-path reinterpretation plus validation.
    ///
    /// Encoded values are never re-decoded. On failure the original bytes are
    /// returned inside the error so the caller can restore the raw state.
    pub fn validate(self) -> Result<Self, InvalidText> {
        match self {
            TextValue::Encoded(text) => Ok(TextValue::Encoded(text)),
            TextValue::Raw(bytes) => String::from_utf8(bytes)
                .map(TextValue::Encoded)
                .map_err(|err| InvalidText {
                    error: err.utf8_error(),
                    bytes: err.into_bytes(),
                }),
        }
    }
}

impl fmt::Debug for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextValue::Raw(bytes) => write!(f, "Raw({:?})", String::from_utf8_lossy(bytes)),
            TextValue::Encoded(text) => write!(f, "Encoded({:?})", text),
        }
    }
}

impl From<&str> for TextValue {
    fn from(text: &str) -> Self {
        TextValue::Encoded(text.to_string())
    }
}

impl From<String> for TextValue {
    fn from(text: String) -> Self {
        TextValue::Encoded(text)
    }
}

/// Runtime representation of an attribute value held by a record.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Null,

    /// Text, the only kind that participates in normalization.
    Text(TextValue),

    Int(i64),

    Float(f64),

    Bool(bool),

    /// Nested or composite data; never normalized.
    Structured(serde_json::Value),
}

impl AttrValue {
    /// Encoded text from a `&str`.
    pub fn text(text: impl Into<String>) -> Self {
        AttrValue::Text(TextValue::Encoded(text.into()))
    }

    /// Untagged bytes.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        AttrValue::Text(TextValue::Raw(bytes.into()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    pub fn as_text(&self) -> Option<&TextValue> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Encoded text content, if any.
    pub fn as_str(&self) -> Option<&str> {
        self.as_text().and_then(TextValue::as_str)
    }

    /// Strip every encoding tag, as storage does.
    pub fn into_stored(self) -> Self {
        match self {
            AttrValue::Text(text) => AttrValue::Text(text.into_raw()),
            other => other,
        }
    }

    /// Compare the way a byte-oriented backend would: text by bytes only.
    pub fn stored_eq(&self, other: &AttrValue) -> bool {
        match (self, other) {
            (AttrValue::Text(a), AttrValue::Text(b)) => a.as_bytes() == b.as_bytes(),
            (a, b) => a == b,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(text: &str) -> Self {
        AttrValue::text(text)
    }
}

impl From<String> for AttrValue {
    fn from(text: String) -> Self {
        AttrValue::Text(TextValue::Encoded(text))
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}
