use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmiAdvisorError {
    #[error("Invalid argument: {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("Reference data error: {0}")]
    ReferenceData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl EmiAdvisorError {
    pub(crate) fn invalid(field: &str, reason: &str) -> Self {
        EmiAdvisorError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for EmiAdvisorError {
    fn from(e: serde_json::Error) -> Self {
        EmiAdvisorError::SerializationError(e.to_string())
    }
}
