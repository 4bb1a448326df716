use thiserror::Error;

/// Failures detected at call entry. No partial results are produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("card '{card}' is not bettable in the {variant} game")]
    InvalidChoice { card: String, variant: String },
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl SimError {
    pub fn kind(&self) -> &'static str {
        match self {
            SimError::InvalidChoice { .. } => "InvalidChoice",
            SimError::InvalidParameter(_) => "InvalidParameter",
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
