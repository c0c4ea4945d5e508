use anyhow::{Result, anyhow};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::debug;

use crate::api::{ApiClient, ClientConfig};
use crate::cli::{actions::AuthAction, globals::GlobalArgs};
use crate::flows::{AuthFlow, FieldError, FlowOutcome};
use crate::session::SessionStore;

pub(crate) fn build_flow(globals: &GlobalArgs) -> Result<AuthFlow> {
    let config = ClientConfig::new(&globals.base_url)?;
    let api = ApiClient::new(&config)?;
    let store = SessionStore::new(globals.data_dir.clone());
    Ok(AuthFlow::new(api, store))
}

pub(crate) fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => debug!("failed to render output: {err}"),
    }
}

fn field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|err| format!("{}: {}", err.field, err.message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn finish<T>(outcome: FlowOutcome<T>, on_success: impl FnOnce(T)) -> Result<()> {
    match outcome {
        FlowOutcome::Success(value) => {
            on_success(value);
            Ok(())
        }
        FlowOutcome::Invalid(errors) => Err(anyhow!(field_errors(&errors))),
        FlowOutcome::Failed { message } => Err(anyhow!(message)),
    }
}

/// Handle auth actions
/// # Errors
/// Returns an error on validation failure, a failed API call, or a store
/// write error, so the process exits nonzero.
pub async fn handle(action: AuthAction, globals: &GlobalArgs) -> Result<()> {
    let flow = build_flow(globals)?;

    match action {
        AuthAction::Register {
            email,
            password,
            confirm,
        } => finish(
            flow.register(&email, password.expose_secret(), confirm.expose_secret())
                .await,
            |ack| println!("{}", ack.message()),
        ),
        AuthAction::Login { email, password } => finish(
            flow.login(&email, password.expose_secret()).await,
            |session| println!("Logged in as {}", session.user.email),
        ),
        AuthAction::Logout => {
            flow.logout().await?;
            println!("Logged out");
            Ok(())
        }
        AuthAction::Me => finish(flow.current_user().await, |user| print_json(&user)),
        AuthAction::ResetRequest { email } => finish(
            flow.request_password_reset(&email).await,
            |ack| println!("{}", ack.message()),
        ),
        AuthAction::ResetConfirm {
            otp,
            new_password,
            confirm,
        } => finish(
            flow.confirm_password_reset(
                &otp,
                new_password.expose_secret(),
                confirm.expose_secret(),
            )
            .await,
            |ack| println!("{}", ack.message()),
        ),
        AuthAction::ResetCancel => {
            flow.cancel_password_reset()?;
            println!("Pending password reset cleared");
            Ok(())
        }
    }
}
