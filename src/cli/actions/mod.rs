pub mod audit;
pub mod auth;

use secrecy::SecretString;
use serde_json::Value;

use crate::api::AuditKind;

/// Parsed CLI action, ready to execute.
#[derive(Debug)]
pub enum Action {
    Auth(AuthAction),
    Audit(AuditAction),
}

#[derive(Debug)]
pub enum AuthAction {
    Register {
        email: String,
        password: SecretString,
        confirm: SecretString,
    },
    Login {
        email: String,
        password: SecretString,
    },
    Logout,
    Me,
    ResetRequest {
        email: String,
    },
    ResetConfirm {
        otp: String,
        new_password: SecretString,
        confirm: SecretString,
    },
    ResetCancel,
}

#[derive(Debug)]
pub enum AuditAction {
    Create {
        kind: AuditKind,
        name: String,
        period: String,
        data: Value,
    },
    Get {
        kind: AuditKind,
        id: String,
    },
    List {
        kind: AuditKind,
    },
    Update {
        kind: AuditKind,
        id: String,
        data: Value,
    },
    Delete {
        kind: AuditKind,
        id: String,
    },
}
