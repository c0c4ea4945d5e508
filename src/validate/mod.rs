//! Input validation performed before any network call.
//!
//! The rules mirror what the backend enforces so users get immediate
//! feedback: the five-requirement password policy, six-digit OTPs, and a
//! minimal email shape check. Server-side validation remains authoritative.

use regex::Regex;
use std::sync::LazyLock;

/// OTPs are exactly this many digits.
pub const OTP_LENGTH: usize = 6;

static LOWERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[a-z]").expect("valid pattern"));
static UPPERCASE: LazyLock<Regex> = LazyLock::new(|| Regex::new("[A-Z]").expect("valid pattern"));
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new("[0-9]").expect("valid pattern"));
static SPECIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[!@#$%^&*(),.?":{}|<>]"#).expect("valid pattern"));
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid pattern"));

/// Per-requirement result of checking a password against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordReport {
    pub length: bool,
    pub lowercase: bool,
    pub uppercase: bool,
    pub number: bool,
    pub special: bool,
}

impl PasswordReport {
    #[must_use]
    pub fn evaluate(password: &str) -> Self {
        Self {
            length: password.chars().count() >= 8,
            lowercase: LOWERCASE.is_match(password),
            uppercase: UPPERCASE.is_match(password),
            number: NUMBER.is_match(password),
            special: SPECIAL.is_match(password),
        }
    }

    /// True when all five requirements are met.
    #[must_use]
    pub fn satisfied(&self) -> bool {
        self.length && self.lowercase && self.uppercase && self.number && self.special
    }

    /// Message for the first unmet requirement, in policy order.
    #[must_use]
    pub fn first_unmet(&self) -> Option<&'static str> {
        if !self.length {
            Some("Password must be at least 8 characters long")
        } else if !self.lowercase {
            Some("Password must contain at least one lowercase letter")
        } else if !self.uppercase {
            Some("Password must contain at least one uppercase letter")
        } else if !self.number {
            Some("Password must contain at least one digit")
        } else if !self.special {
            Some("Password must contain at least one special character")
        } else {
            None
        }
    }
}

/// Strips everything but ASCII digits, matching the OTP input filter.
#[must_use]
pub fn sanitize_otp(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// True for exactly six ASCII digits.
#[must_use]
pub fn is_valid_otp(otp: &str) -> bool {
    otp.len() == OTP_LENGTH && otp.chars().all(|c| c.is_ascii_digit())
}

/// Minimal `local@domain.tld` shape check.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}
