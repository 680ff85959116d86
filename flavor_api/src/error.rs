use thiserror::Error;

/// A unified error type for this library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlavorError {
    /// The registry was read before any environment was selected.
    #[error("No environment selected; call `select` before reading configuration")]
    Unconfigured,

    /// The caller passed something this library cannot turn into a URL:
    /// a malformed segment, a negative resource id, an unparsable URL, etc.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, FlavorError>;

impl FlavorError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        FlavorError::InvalidArgument(reason.into())
    }
}

impl From<url::ParseError> for FlavorError {
    fn from(err: url::ParseError) -> Self {
        FlavorError::InvalidArgument(format!("malformed URL: {err}"))
    }
}

impl From<serde_urlencoded::ser::Error> for FlavorError {
    fn from(err: serde_urlencoded::ser::Error) -> Self {
        FlavorError::InvalidArgument(format!("query serialization failed: {err}"))
    }
}
