use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid drug type: {0}")]
    InvalidDrugType(String),

    #[error("Unparsable numeric field {field}: {value:?}")]
    UnparsableNumericField { field: &'static str, value: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Condition name reported to the user.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDrugType(_) => "InvalidValue",
            Self::UnparsableNumericField { .. } => "UnparsableNumericField",
            Self::Serialization(_) => "Serialization",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
