//! Local form validation.
//!
//! Screens run these before any request so that field errors show up
//! immediately; the backend still validates on its side.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FieldErrors;
use crate::onboarding::{AssetSymbol, InvestorType, OnboardingRequest};
use crate::vote::SectionType;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Validates the login form. Keys: `email`, `password`.
pub fn validate_login(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if email.trim().is_empty() {
        errors.insert("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.insert("email", "Invalid email format");
    }
    if password.is_empty() {
        errors.insert("password", "Password is required");
    }
    errors
}

/// Validates the registration form. Keys: `email`, `name`, `password`.
pub fn validate_signup(email: &str, name: &str, password: &str) -> FieldErrors {
    let mut errors = validate_login(email, password);
    if name.trim().is_empty() {
        errors.insert("name", "Name is required");
    }
    if !password.is_empty() && password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
    errors
}

/// Onboarding answers as collected by the survey, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingForm {
    pub assets: Vec<AssetSymbol>,
    pub investor_type: Option<InvestorType>,
    pub content_types: Vec<SectionType>,
}

impl OnboardingForm {
    /// Validates the survey. Keys: `assets`, `investor_type`, `content_types`.
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.assets.is_empty() {
            errors.insert("assets", "Select at least one asset");
        }
        if self.investor_type.is_none() {
            errors.insert("investor_type", "Select your investor type");
        }
        if self.content_types.is_empty() {
            errors.insert("content_types", "Select at least one content type");
        }
        errors
    }

    /// Builds the request body, or returns the field errors.
    pub fn into_request(self) -> Result<OnboardingRequest, FieldErrors> {
        let errors = self.validate();
        match self.investor_type {
            Some(investor_type) if errors.is_empty() => Ok(OnboardingRequest {
                assets: self.assets,
                investor_type,
                content_types: self.content_types,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_login_empty() {
        let errors = validate_login("", "");
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_validate_login_bad_email() {
        let errors = validate_login("not-an-email", "pw");
        assert_eq!(errors.get("email"), Some("Invalid email format"));
        assert!(!errors.contains("password"));
    }

    #[test]
    fn test_validate_login_ok_with_whitespace() {
        assert!(validate_login("  a@b.com ", "pw").is_empty());
    }

    #[test]
    fn test_validate_signup_name_and_short_password() {
        let errors = validate_signup("x@y.com", "", "abc");
        assert!(!errors.contains("email"));
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn test_validate_signup_empty_password_is_required_not_short() {
        let errors = validate_signup("x@y.com", "X", "");
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn test_onboarding_form_errors() {
        let errors = OnboardingForm::default().validate();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains("assets"));
        assert!(errors.contains("investor_type"));
        assert!(errors.contains("content_types"));
    }

    #[test]
    fn test_onboarding_form_into_request() {
        let form = OnboardingForm {
            assets: vec![AssetSymbol::Sol],
            investor_type: Some(InvestorType::Hodler),
            content_types: vec![SectionType::Price],
        };
        let request = form.into_request().unwrap();
        assert_eq!(request.assets, vec![AssetSymbol::Sol]);
        assert_eq!(request.investor_type, InvestorType::Hodler);
    }
}
