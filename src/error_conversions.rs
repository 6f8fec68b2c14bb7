//! Conversions from domain errors into the service layer.
//!
//! The domain layer must not depend on service error types.

use crate::domain::types::TypeConstraintError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_errors_become_form_errors() {
        let err = ServiceError::from(TypeConstraintError::NonPositiveId);
        assert!(matches!(err, ServiceError::Form(_)));
    }
}
