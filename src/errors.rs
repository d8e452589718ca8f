use serde::Serialize;

/// Errors surfaced by the GreenLedger services.
///
/// The engine's core functions are total over well-formed input, so most
/// variants here represent caller misuse caught at the boundary (blank
/// address, empty cart, malformed OTP) rather than internal failures.
#[derive(Debug, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    #[error("Order error: {0}")]
    OrderError(String),

    #[error("Event error: {0}")]
    EventError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::SerializationError(err.to_string())
    }
}

impl ServiceError {
    /// Message suitable for showing to an end user. Internal errors are
    /// collapsed to a generic message so implementation details never
    /// reach the UI layer.
    pub fn user_message(&self) -> String {
        match self {
            Self::EventError(_) | Self::SerializationError(_) | Self::InternalError(_) => {
                "Something went wrong".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Whether the error is a recoverable caller/input problem rather
    /// than a failure of the engine itself.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidInput(_)
                | Self::InvalidOperation(_)
                | Self::InsufficientStock(_)
                | Self::NotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_hides_internal_details() {
        assert_eq!(
            ServiceError::InternalError("store poisoned".into()).user_message(),
            "Something went wrong"
        );
        assert_eq!(
            ServiceError::SerializationError("bad json".into()).user_message(),
            "Something went wrong"
        );

        // User-facing errors keep their message
        assert_eq!(
            ServiceError::NotFound("Product QR-404 not found".into()).user_message(),
            "Not found: Product QR-404 not found"
        );
        assert_eq!(
            ServiceError::ValidationError("delivery address is blank".into()).user_message(),
            "Validation error: delivery address is blank"
        );
    }

    #[test]
    fn user_error_classification() {
        assert!(ServiceError::ValidationError("x".into()).is_user_error());
        assert!(ServiceError::NotFound("x".into()).is_user_error());
        assert!(ServiceError::InsufficientStock("x".into()).is_user_error());
        assert!(!ServiceError::InternalError("x".into()).is_user_error());
        assert!(!ServiceError::PaymentDeclined("x".into()).is_user_error());
    }
}
