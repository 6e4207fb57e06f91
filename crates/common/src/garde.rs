//! Request validation glue between garde reports and the domain error type.

use crate::domain::DomainError;
use garde::Validate;

/// Validate a request struct, folding any garde report into a single
/// ValidationError listing each offending field
pub fn validate_struct<T>(value: &T) -> Result<(), DomainError>
where
    T: Validate,
    T::Context: Default,
{
    value.validate().map_err(|report| {
        let mut reasons = Vec::new();
        for (path, error) in report.iter() {
            let field = path.to_string();
            if field.is_empty() {
                reasons.push(error.message().to_string());
            } else {
                reasons.push(format!("{field}: {}", error.message()));
            }
        }
        DomainError::ValidationError(reasons.join(", "))
    })
}
