//! Error handling for the pricing engine

/// Pricing error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid input for {field}: {message}")]
    InvalidInput { field: &'static str, message: String },

    #[error("Malformed discount rule: {message}")]
    MalformedRule { message: String },

    #[error("An active discount rule for {min_days}+ days already exists")]
    DuplicateTier { min_days: u32 },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PricingError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        PricingError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    /// Stable tag used in error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            PricingError::InvalidInput { .. } => "invalid_input",
            PricingError::MalformedRule { .. } => "malformed_rule",
            PricingError::DuplicateTier { .. } => "duplicate_tier",
            PricingError::Config(_) => "configuration_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
