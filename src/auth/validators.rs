// src/auth/validators.rs

use super::models::{CreateUserRequest, LoginRequest};
use crate::common::{ValidationResult, Validator};

// ============================================================================
// Auth Form Validators
// ============================================================================

pub struct SignupValidator;

impl Validator<CreateUserRequest> for SignupValidator {
    fn validate(&self, data: &CreateUserRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        if data.name.trim().is_empty() {
            result.add_error("name", "Full name is required");
        } else if data.name.len() > 255 {
            result.add_error("name", "Name must be less than 255 characters");
        }

        result.merge(validate_email(&data.email));
        result
    }
}

pub struct LoginValidator;

impl Validator<LoginRequest> for LoginValidator {
    fn validate(&self, data: &LoginRequest) -> ValidationResult {
        validate_email(&data.email)
    }
}

fn validate_email(email: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    let email = email.trim();

    if email.is_empty() {
        result.add_error("email", "Email address is required");
    } else if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        result.add_error("email", "Email address must be valid");
    }

    result
}
