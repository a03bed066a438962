use crate::errors::repository::RepositoryError;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(validation_messages(&errors))
    }
}

/// Flattens nested validator output into sorted `path: message` lines,
/// e.g. `workshops[1].production_time: production_time cannot be negative`.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut out = Vec::new();
    collect_messages("", errors, &mut out);
    out.sort();
    out
}

fn collect_messages(prefix: &str, errors: &ValidationErrors, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid {}", error.code));
                    out.push(format!("{path}: {message}"));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_messages(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}
