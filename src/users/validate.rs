use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::users::dto::RegisterRequest;

const MIN_NAME_CHARS: usize = 2;
const MIN_PASSWORD_CHARS: usize = 2;
const MIN_PHONE_CHARS: usize = 13;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    // Leading '+' followed by digits; the overall length is checked separately.
    static ref PHONE_RE: Regex = Regex::new(r"^\+\d+").unwrap();
}

/// A single validation failure: which field and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Check a registration payload against the field rules. Returns every
/// violation found; an empty list means the payload is valid. The input is
/// never mutated and nothing is persisted here.
pub fn validate_registration(req: &RegisterRequest) -> Vec<Violation> {
    let mut violations = Vec::new();

    if req.first_name.chars().count() < MIN_NAME_CHARS {
        violations.push(Violation::new(
            "firstName",
            format!("must be at least {} characters", MIN_NAME_CHARS),
        ));
    }
    if req.last_name.chars().count() < MIN_NAME_CHARS {
        violations.push(Violation::new(
            "lastName",
            format!("must be at least {} characters", MIN_NAME_CHARS),
        ));
    }
    if !EMAIL_RE.is_match(&req.email) {
        violations.push(Violation::new("email", "is not a valid email address"));
    }
    if !PHONE_RE.is_match(&req.phone) {
        violations.push(Violation::new(
            "phone",
            "must start with '+' followed by digits",
        ));
    }
    if req.phone.chars().count() < MIN_PHONE_CHARS {
        violations.push(Violation::new(
            "phone",
            format!("must be at least {} characters", MIN_PHONE_CHARS),
        ));
    }
    if req.password.chars().count() < MIN_PASSWORD_CHARS {
        violations.push(Violation::new(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_CHARS),
        ));
    }

    violations
}

/// Render violations the way error bodies expect them: one line, semicolon
/// separated.
pub fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
