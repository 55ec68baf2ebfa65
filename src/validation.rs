//! Form validation for the login, registration and movie edit screens.
//!
//! Each validator returns an empty `Vec` when the form is valid, otherwise one
//! [`FieldError`] per failed field, in form order.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Display;

use crate::models::{Genre, MovieForm};

const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 72;
const TITLE_MIN: usize = 2;
const TITLE_MAX: usize = 150;
const DESCRIPTION_MAX: usize = 500;

/// A validation failure attached to a single form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub fn validate_login(form: &LoginForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(err) = check_email(&form.email) {
        errors.push(err);
    }
    if form.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    errors
}

pub fn validate_register(form: &RegisterForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(err) = check_email(&form.email) {
        errors.push(err);
    }

    let password_len = form.password.chars().count();
    if form.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if password_len < PASSWORD_MIN {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    } else if password_len > PASSWORD_MAX {
        errors.push(FieldError::new(
            "password",
            "Password must be 72 characters or fewer",
        ));
    }

    if form.confirm_password.is_empty() {
        errors.push(FieldError::new(
            "confirmPassword",
            "Please confirm your password",
        ));
    } else if form.confirm_password != form.password {
        errors.push(FieldError::new("confirmPassword", "Passwords do not match"));
    }

    errors
}

pub fn validate_movie(form: &MovieForm) -> Vec<FieldError> {
    let mut errors = Vec::new();

    let title = form.title.trim();
    let title_len = title.chars().count();
    if title.is_empty() {
        errors.push(FieldError::new("title", "Title is required"));
    } else if title_len < TITLE_MIN {
        errors.push(FieldError::new("title", "Title must be at least 2 characters"));
    } else if title_len > TITLE_MAX {
        errors.push(FieldError::new(
            "title",
            "Title must be 150 characters or fewer",
        ));
    }

    if form.genre.parse::<Genre>().is_err() {
        errors.push(FieldError::new("genre", "Please select a genre"));
    }

    if form.description.trim().is_empty() {
        errors.push(FieldError::new("description", "Description is required"));
    } else if form.description.chars().count() > DESCRIPTION_MAX {
        errors.push(FieldError::new(
            "description",
            "Description must be 500 characters or fewer",
        ));
    }

    if form.rating < 1 {
        errors.push(FieldError::new("rating", "Please give a rating"));
    } else if form.rating > 5 {
        errors.push(FieldError::new("rating", "Rating cannot exceed 5"));
    }

    if form.watch_date.is_empty() {
        errors.push(FieldError::new("watchDate", "Watch date is required"));
    } else if !is_iso_date(&form.watch_date) {
        errors.push(FieldError::new(
            "watchDate",
            "Date must be in YYYY-MM-DD format",
        ));
    }

    errors
}

fn check_email(email: &str) -> Option<FieldError> {
    let email = email.trim();
    if email.is_empty() {
        Some(FieldError::new("email", "Email is required"))
    } else if !is_email(email) {
        Some(FieldError::new(
            "email",
            "Please enter a valid email address",
        ))
    } else {
        None
    }
}

fn is_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

/// Strict `YYYY-MM-DD` that is also a real calendar date
fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    shape_ok && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
