use crate::notify::Severity;

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The failures a user can see. Every one of these is caught where it happens and turned into a
/// toast; none of them stop the `Tracker` from accepting further input.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum FormError {
    /// A required field was missing when the form was submitted. Detected locally, so the
    /// gateway is never called.
    #[error("{0}")]
    Validation(String),

    /// The record store rejected a call or could not be reached. The message comes from the
    /// response body when there is one.
    #[error("{0}")]
    Remote(String),

    /// Local storage could not be read or written.
    #[error("{0}")]
    Storage(String),
}

impl FormError {
    /// Converts any gateway failure into a `Remote` error, keeping only the outermost message.
    pub(crate) fn remote(e: &Error) -> Self {
        FormError::Remote(e.to_string())
    }

    /// The toast title for this kind of error.
    pub fn title(&self) -> &'static str {
        match self {
            FormError::Validation(_) => "Validation",
            FormError::Remote(_) | FormError::Storage(_) => "Error",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            FormError::Validation(_) => Severity::Warning,
            FormError::Remote(_) | FormError::Storage(_) => Severity::Error,
        }
    }
}
