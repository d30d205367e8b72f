use thiserror::Error as ThisError;

/// Error type for `qs_encode`.
///
/// Every failure aborts the whole encoding: no partial querystring is ever
/// returned alongside an error.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value was not a map or sequence where one was required.
    #[error("invalid input: expected a map or sequence, got {0}")]
    InvalidInput(&'static str),

    /// A leaf value cannot be represented in a querystring.
    #[error("invalid type: unsupported value for key `{0}`")]
    InvalidType(String),

    /// Nesting went deeper than the configured maximum.
    #[error("maximum nesting depth of {0} exceeded")]
    DepthExceeded(usize),

    /// More pairs would be emitted than the configured maximum.
    #[error("maximum number of pairs ({0}) exceeded")]
    PairsExceeded(usize),

    /// Custom error raised by a `Serialize` implementation.
    #[error("{0}")]
    Custom(String),

    /// Map key of a type that cannot be turned into a key segment.
    #[error("unsupported map key type")]
    Unsupported,
}

/// Broad classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ErrorKind {
    InvalidInput,
    InvalidType,
    DepthExceeded,
    PairsExceeded,
    Serialize,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::InvalidType(_) => ErrorKind::InvalidType,
            Error::DepthExceeded(_) => ErrorKind::DepthExceeded,
            Error::PairsExceeded(_) => ErrorKind::PairsExceeded,
            Error::Custom(_) | Error::Unsupported => ErrorKind::Serialize,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
