//! Typed request forms with explicit validators. Each form is a plain struct
//! deserialized from the submitted body; `validate` returns the messages to
//! re-render inline, an empty list meaning the input is acceptable.

use serde::{Deserialize, Serialize};

pub const USERNAME_MIN: usize = 2;
pub const USERNAME_MAX: usize = 20;
pub const PASSWORD_MIN: usize = 6;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(validate_username(&self.username));
        errors.extend(validate_email(&self.email));
        errors.extend(validate_password(&self.password));
        if self.password != self.confirm_password {
            errors.push("Passwords must match.".to_string());
        }
        errors
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    // HTML checkboxes post "on" or nothing at all
    pub remember: Option<String>,
}

impl LoginForm {
    pub fn remember(&self) -> bool {
        self.remember.is_some()
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RequestResetForm {
    pub email: String,
}

impl RequestResetForm {
    pub fn validate(&self) -> Vec<String> {
        validate_email(&self.email)
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ResetPasswordForm {
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = validate_password(&self.password);
        if self.password != self.confirm_password {
            errors.push("Passwords must match.".to_string());
        }
        errors
    }
}

pub fn validate_username(username: &str) -> Vec<String> {
    let mut errors = Vec::new();
    let len = username.chars().count();
    if len < USERNAME_MIN || len > USERNAME_MAX {
        errors.push(format!(
            "Username must be between {} and {} characters long.",
            USERNAME_MIN, USERNAME_MAX
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        errors.push("Username may only contain letters, digits, dashes and underscores.".to_string());
    }
    errors
}

pub fn validate_email(email: &str) -> Vec<String> {
    // local@domain.tld, nothing fancier; the mail provider is the real judge
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if well_formed {
        Vec::new()
    } else {
        vec!["Please enter a valid email address.".to_string()]
    }
}

pub fn validate_password(password: &str) -> Vec<String> {
    if password.chars().count() < PASSWORD_MIN {
        vec![format!(
            "Password must be at least {} characters long.",
            PASSWORD_MIN
        )]
    } else {
        Vec::new()
    }
}
