use thiserror::Error;

/// Failures of the remote data gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The server could not be reached, or answered with a non-2xx status other than
    /// an authentication failure, or sent a body that could not be parsed.
    #[error("Network error: {0}")]
    Network(String),

    /// Login rejected, or a protected request made without a valid stored token.
    #[error("Authentication error: {0}")]
    Authentication(String),
}

impl GatewayError {
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
}

/// Engine misuse. These indicate a wiring bug and are not meant to be recovered from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Column '{0}' was never declared as filterable")]
    UnknownColumn(String),

    #[error("Column '{0}' does not exist on this record type")]
    NoSuchColumn(String),

    #[error("Column '{0}' is declared more than once")]
    DuplicateColumn(String),

    #[error("'{0}' is not a fiscal quarter")]
    InvalidQuarter(String),

    #[error("Series '{series}' has {values} values for {categories} categories")]
    MisalignedSeries {
        series: String,
        values: usize,
        categories: usize,
    },
}

/// Form input rejected before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid fields: {}", fields.join(", "))]
    InvalidFields { fields: Vec<String> },
}

impl ValidationError {
    pub fn fields(&self) -> &[String] {
        match self {
            Self::InvalidFields { fields } => fields,
        }
    }
}

/// Error types for the compute module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ConfigurationError::UnknownColumn("stage".to_string());
        assert_eq!(err.to_string(), "Column 'stage' was never declared as filterable");

        let err = ValidationError::InvalidFields {
            fields: vec!["email".to_string(), "first_name".to_string()],
        };
        assert_eq!(err.to_string(), "Invalid fields: email, first_name");
    }

    #[test]
    fn test_compute_error_is_transparent() {
        let err: ComputeError = GatewayError::Network("HTTP error: 500".to_string()).into();
        assert_eq!(err.to_string(), "Network error: HTTP error: 500");
        assert!(matches!(err, ComputeError::Gateway(_)));
    }
}
