/// Convenience result type used across Mattebox.
pub type MatteboxResult<T> = Result<T, MatteboxError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum MatteboxError {
    /// Structurally invalid caller-provided data (empty batches, mismatched
    /// dimensions, out-of-range parameters).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Errors while decoding overlay payloads into masks.
    #[error("decode error: {0}")]
    Decode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MatteboxError {
    /// Build a [`MatteboxError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`MatteboxError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
