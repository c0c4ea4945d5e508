use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use secrecy::SecretString;
use serde_json::Value;
use std::path::PathBuf;

use crate::api::AuditKind;
use crate::cli::{
    actions::{Action, AuditAction, AuthAction},
    commands::{ARG_BASE_URL, ARG_DATA_DIR, audit, auth},
    globals::GlobalArgs,
};

fn required(matches: &ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| anyhow!("missing required argument: {name}"))
}

fn json_object(matches: &ArgMatches, name: &str) -> Result<Value> {
    let raw = required(matches, name)?;
    serde_json::from_str(&raw).with_context(|| format!("--{name} must be valid JSON"))
}

fn kind(matches: &ArgMatches) -> Result<AuditKind> {
    required(matches, audit::ARG_KIND)?.parse()
}

/// Confirmation falls back to the password itself when not supplied, so
/// scripted use does not have to repeat the value.
fn password_pair(matches: &ArgMatches, password_arg: &str) -> Result<(SecretString, SecretString)> {
    let password = required(matches, password_arg)?;
    let confirm = matches
        .get_one::<String>(auth::ARG_CONFIRM_PASSWORD)
        .cloned()
        .unwrap_or_else(|| password.clone());
    Ok((SecretString::from(password), SecretString::from(confirm)))
}

fn auth_action(name: &str, matches: &ArgMatches) -> Result<Option<AuthAction>> {
    let action = match name {
        auth::CMD_REGISTER => {
            let (password, confirm) = password_pair(matches, auth::ARG_PASSWORD)?;
            Some(AuthAction::Register {
                email: required(matches, auth::ARG_EMAIL)?,
                password,
                confirm,
            })
        }
        auth::CMD_LOGIN => Some(AuthAction::Login {
            email: required(matches, auth::ARG_EMAIL)?,
            password: SecretString::from(required(matches, auth::ARG_PASSWORD)?),
        }),
        auth::CMD_LOGOUT => Some(AuthAction::Logout),
        auth::CMD_ME => Some(AuthAction::Me),
        auth::CMD_RESET_REQUEST => Some(AuthAction::ResetRequest {
            email: required(matches, auth::ARG_EMAIL)?,
        }),
        auth::CMD_RESET_CONFIRM => {
            let (new_password, confirm) = password_pair(matches, auth::ARG_NEW_PASSWORD)?;
            Some(AuthAction::ResetConfirm {
                otp: required(matches, auth::ARG_OTP)?,
                new_password,
                confirm,
            })
        }
        auth::CMD_RESET_CANCEL => Some(AuthAction::ResetCancel),
        _ => None,
    };

    Ok(action)
}

fn audit_action(matches: &ArgMatches) -> Result<AuditAction> {
    match matches.subcommand() {
        Some((audit::CMD_CREATE, matches)) => Ok(AuditAction::Create {
            kind: kind(matches)?,
            name: required(matches, audit::ARG_NAME)?,
            period: required(matches, audit::ARG_PERIOD)?,
            data: json_object(matches, audit::ARG_DATA)?,
        }),
        Some((audit::CMD_GET, matches)) => Ok(AuditAction::Get {
            kind: kind(matches)?,
            id: required(matches, audit::ARG_ID)?,
        }),
        Some((audit::CMD_LIST, matches)) => Ok(AuditAction::List {
            kind: kind(matches)?,
        }),
        Some((audit::CMD_UPDATE, matches)) => Ok(AuditAction::Update {
            kind: kind(matches)?,
            id: required(matches, audit::ARG_ID)?,
            data: json_object(matches, audit::ARG_DATA)?,
        }),
        Some((audit::CMD_DELETE, matches)) => Ok(AuditAction::Delete {
            kind: kind(matches)?,
            id: required(matches, audit::ARG_ID)?,
        }),
        _ => Err(anyhow!("unknown audit subcommand")),
    }
}

/// Maps parsed arguments to shared settings plus the action to run.
/// # Errors
/// Returns an error on missing arguments or unparseable values.
pub fn handler(matches: &ArgMatches) -> Result<(GlobalArgs, Action)> {
    let globals = GlobalArgs::new(
        required(matches, ARG_BASE_URL)?,
        PathBuf::from(required(matches, ARG_DATA_DIR)?),
    );

    let action = match matches.subcommand() {
        Some((audit::CMD_AUDIT, matches)) => Action::Audit(audit_action(matches)?),
        Some((name, matches)) => auth_action(name, matches)?
            .map(Action::Auth)
            .ok_or_else(|| anyhow!("unknown subcommand: {name}"))?,
        None => return Err(anyhow!("a subcommand is required")),
    };

    Ok((globals, action))
}
