use thiserror::Error;
use uuid::Uuid;

/// Caller-facing failure kinds of the product service.
///
/// A plain miss on `get` is `Ok(None)`, never [`ServiceError::NotFound`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// One or more field violations, joined in rule order.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Update/delete targeted an id with no stored record.
    #[error("not found: {0}")]
    NotFound(String),
    /// Fault in the storage medium (I/O, serialization, database).
    #[error("internal failure: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn product_not_found(id: Uuid) -> Self { Self::NotFound(format!("product {} not found", id)) }

    pub fn internal(e: impl std::fmt::Display) -> Self { Self::Internal(e.to_string()) }

    /// Message without the kind prefix, suitable for a response body.
    pub fn detail(&self) -> &str {
        match self {
            Self::InvalidInput(m) | Self::NotFound(m) | Self::Internal(m) => m,
        }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self { Self::Internal(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_mentions_id() {
        let id = Uuid::new_v4();
        let err = ServiceError::product_not_found(id);
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(err.detail().contains(&id.to_string()));
    }

    #[test]
    fn model_errors_become_internal() {
        let err: ServiceError = models::errors::ModelError::Db("connection reset".into()).into();
        assert!(matches!(err, ServiceError::Internal(ref m) if m.contains("connection reset")));
    }
}
