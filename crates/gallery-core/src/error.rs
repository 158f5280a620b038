//! Error types for gallery domain values.

/// A status string that does not name a known status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} status: {value:?}")]
pub struct StatusError {
    /// Which status family was being parsed (`"painting"` or `"order"`).
    pub kind: &'static str,
    /// The rejected input, as received.
    pub value: String,
}
