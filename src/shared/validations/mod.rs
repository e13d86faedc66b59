use validator::{ValidationErrors, ValidationErrorsKind};

use crate::shared::errors::DomainError;

/// Collapse `validator` output into a single `DomainError::Validation`.
///
/// Fields are visited in name order so the reported field is stable
/// across runs (`ValidationErrors` is backed by a hash map).
pub fn first_violation(errors: &ValidationErrors) -> DomainError {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        if let ValidationErrorsKind::Field(errs) = kind {
            if let Some(e) = errs.first() {
                let reason = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                return DomainError::validation(field.to_string(), reason);
            }
        }
    }

    DomainError::validation("input", "validation failed")
}

/// Human readable list of every field violation, `field: message; ...`.
pub fn describe_violations(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, msg)
            })
        })
        .collect();
    messages.sort();

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 2, message = "too short"))]
        brand: String,
        #[validate(length(min = 2))]
        name: String,
    }

    #[test]
    fn reports_alphabetically_first_field() {
        let probe = Probe {
            brand: "x".into(),
            name: "y".into(),
        };
        let errors = probe.validate().unwrap_err();
        match first_violation(&errors) {
            DomainError::Validation { field, reason } => {
                assert_eq!(field, "brand");
                assert_eq!(reason, "too short");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_error_code() {
        let probe = Probe {
            brand: "ok".into(),
            name: "y".into(),
        };
        let errors = probe.validate().unwrap_err();
        match first_violation(&errors) {
            DomainError::Validation { field, reason } => {
                assert_eq!(field, "name");
                assert_eq!(reason, "length");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(describe_violations(&errors), "name: length");
    }
}
