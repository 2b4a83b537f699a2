/// Result alias that carries the custom [`SortVizError`] type.
pub type Result<T> = std::result::Result<T, SortVizError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum SortVizError {
    /// A sorting run finished with an element out of place. This signals a
    /// bug in the algorithm itself, so the session must not continue to the
    /// next stage.
    #[error("{algorithm} failed verification: array[{index}] = {value}")]
    Verification {
        algorithm: String,
        index: usize,
        value: u32,
    },
    /// Wrapper around standard IO errors from the output channels.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Free-form message for the rare faults without a dedicated variant.
    #[error("{0}")]
    Message(String),
}

impl SortVizError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for SortVizError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for SortVizError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
