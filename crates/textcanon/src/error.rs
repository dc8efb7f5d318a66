use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CanonError {
    /// A loaded (or, under strict writes, a saved) text attribute is not valid UTF-8.
    ///
    /// The offending attribute is left holding its original raw bytes.
    #[error("Invalid UTF-8 in attribute `{attribute}` of `{object_type}` (valid up to byte {valid_up_to})")]
    InvalidEncoding {
        attribute: String,
        object_type: String,
        valid_up_to: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("Record not found: {0}")]
    RecordNotFound(Uuid),

    #[error("Record already exists: {0}")]
    RecordExists(Uuid),

    #[error("Unknown object type: {0}")]
    UnknownType(String),

    #[error("Object type already defined: {0}")]
    DuplicateType(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl CanonError {
    /// Name of the attribute that failed validation, if this is an encoding error.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            CanonError::InvalidEncoding { attribute, .. } => Some(attribute),
            _ => None,
        }
    }
}

impl From<confique::Error> for CanonError {
    fn from(err: confique::Error) -> Self {
        CanonError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CanonError>;
