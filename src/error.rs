use thiserror::Error;

/// Rejected list lifecycle operations. Returning one of these guarantees
/// that nothing changed: memory, store and fragment are untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("List name must not be empty")]
    EmptyName,

    #[error("A list named '{0}' already exists")]
    DuplicateName(String),

    #[error("No list named '{0}'")]
    UnknownList(String),

    #[error("No list is active; create or switch to a list first")]
    NoActiveList,

    #[error("Storage rejected the change: {0}")]
    Storage(String),
}

impl From<StoreError> for ListError {
    fn from(e: StoreError) -> Self {
        ListError::Storage(e.to_string())
    }
}

/// Failures decoding a favorites token from the fragment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Token is not valid compressed data")]
    Decompress,

    #[error("Decompressed data is not valid UTF-16")]
    InvalidUtf16,
}

/// Failures persisting the key-value store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
