//! Request validation for user writes.

use crate::error::AppError;
use crate::model::{CreateUserBody, NewUser, UpdateUserBody, UserChanges};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a create body. Values are kept as submitted.
    pub fn validate_create(body: CreateUserBody) -> Result<NewUser, AppError> {
        validate_name(&body.name)?;
        validate_email(&body.email)?;
        Ok(NewUser {
            name: body.name,
            email: body.email,
        })
    }

    /// Validate only the fields present in an update body and stage them.
    /// Names are trimmed; emails are trimmed and lower-cased.
    pub fn validate_partial(body: UpdateUserBody) -> Result<UserChanges, AppError> {
        let mut changes = UserChanges::default();
        if let Some(name) = body.name {
            let name = name.trim();
            validate_name(name)?;
            changes.name = Some(name.to_string());
        }
        if let Some(email) = body.email {
            let email = email.trim().to_lowercase();
            validate_email(&email)?;
            changes.email = Some(email);
        }
        Ok(changes)
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".into()));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if !email.contains('@') {
        return Err(AppError::Validation("email must contain '@'".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, email: &str) -> Result<NewUser, AppError> {
        RequestValidator::validate_create(CreateUserBody {
            name: name.into(),
            email: email.into(),
        })
    }

    #[test]
    fn create_keeps_values_as_submitted() {
        let u = create(" Ana ", "Ana@X.com").unwrap();
        assert_eq!(u.name, " Ana ");
        assert_eq!(u.email, "Ana@X.com");
    }

    #[test]
    fn create_rejects_blank_name() {
        let err = create("   ", "ana@x.com").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "name must not be empty"));
    }

    #[test]
    fn create_rejects_email_without_at() {
        let err = create("Ana", "ana.x.com").unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "email must contain '@'"));
    }

    #[test]
    fn partial_trims_and_lowercases() {
        let changes = RequestValidator::validate_partial(UpdateUserBody {
            name: Some("  Bea ".into()),
            email: Some(" BEA@X.COM ".into()),
        })
        .unwrap();
        assert_eq!(changes.name.as_deref(), Some("Bea"));
        assert_eq!(changes.email.as_deref(), Some("bea@x.com"));
    }

    #[test]
    fn partial_with_no_fields_is_empty() {
        let changes = RequestValidator::validate_partial(UpdateUserBody::default()).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn partial_validates_only_present_fields() {
        let changes = RequestValidator::validate_partial(UpdateUserBody {
            name: None,
            email: Some("c@x.com".into()),
        })
        .unwrap();
        assert_eq!(changes.name, None);

        let err = RequestValidator::validate_partial(UpdateUserBody {
            name: Some("".into()),
            email: None,
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
