use thiserror::Error;
use uuid::Uuid;

use crate::domain::checkout::CheckoutStage;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Vehicle {vehicle_id} is no longer available")]
    VehicleUnavailable { vehicle_id: Uuid },

    #[error("Checkout failed at {stage}: {cause}")]
    CheckoutFailed { stage: CheckoutStage, cause: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried by the user.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(_))
    }

    /// Errors the caller can fix by changing input or cart contents.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            DomainError::Validation { .. }
                | DomainError::EmptyCart
                | DomainError::VehicleUnavailable { .. }
        )
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity() {
        let id = Uuid::nil();
        let err = DomainError::not_found("Vehicle", id);
        assert_eq!(err.to_string(), format!("Not found: Vehicle with id={}", id));
    }

    #[test]
    fn checkout_failure_mentions_stage() {
        let err = DomainError::CheckoutFailed {
            stage: CheckoutStage::CartCleared,
            cause: "disk full".into(),
        };
        assert_eq!(err.to_string(), "Checkout failed at CartCleared: disk full");
        assert!(!err.is_user_correctable());
    }

    #[test]
    fn storage_errors_are_transient() {
        let err: DomainError = sea_orm::DbErr::Custom("connection reset".into()).into();
        assert!(err.is_transient());
        assert!(!DomainError::EmptyCart.is_transient());
        assert!(DomainError::EmptyCart.is_user_correctable());
    }
}
