use thiserror::Error;

/// Operator input that cannot become a queued command.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Symbol must not be empty")]
    EmptySymbol,

    #[error("Invalid direction: '{0}' (must be BUY or SELL)")]
    InvalidDirection(String),

    #[error("Invalid volume: '{0}'")]
    InvalidVolume(String),

    #[error("Volume must be positive, got {0}")]
    NonPositiveVolume(f64),

    #[error("Invalid {field} level: '{value}'")]
    InvalidPriceLevel { field: &'static str, value: String },
}

impl From<ValidationError> for String {
    fn from(error: ValidationError) -> Self {
        error.to_string()
    }
}

/// Why a request body did not yield a JSON document.
///
/// Never leaves the ingestion path as an error: it is folded into the
/// record's parse outcome through `reason()` and `detail()`.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("Request body is empty")]
    EmptyBody,

    #[error("{0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Failed to read request body")]
    BodyUnreadable(String),
}

impl SplitError {
    /// Short, human-readable failure reason.
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Diagnostic detail: decoder category and position, or the transport error.
    pub fn detail(&self) -> String {
        match self {
            SplitError::EmptyBody => String::new(),
            SplitError::Malformed(e) => format!(
                "{:?} error at line {}, column {}: {}",
                e.classify(),
                e.line(),
                e.column(),
                e
            ),
            SplitError::BodyUnreadable(cause) => cause.clone(),
        }
    }
}
