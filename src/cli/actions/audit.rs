use anyhow::{Result, anyhow};

use crate::cli::{
    actions::{AuditAction, auth::build_flow, auth::print_json},
    globals::GlobalArgs,
};

/// Handle audit actions
/// # Errors
/// Returns an error when not logged in or when the API reports failure.
pub async fn handle(action: AuditAction, globals: &GlobalArgs) -> Result<()> {
    let flow = build_flow(globals)?;

    let Some(session) = flow.store().load() else {
        return Err(anyhow!("Not logged in; run `greenaudit login` first"));
    };
    let token = session.token;
    let api = flow.api();

    match action {
        AuditAction::Create {
            kind,
            name,
            period,
            data,
        } => {
            let record = api
                .create_audit(&token, kind, &name, &period, data)
                .await
                .into_result()?;
            print_json(&record);
        }
        AuditAction::Get { kind, id } => {
            let record = api.get_audit(&token, kind, &id).await.into_result()?;
            print_json(&record);
        }
        AuditAction::List { kind } => {
            let list = api.list_audits(&token, kind).await.into_result()?;
            print_json(&list);
        }
        AuditAction::Update { kind, id, data } => {
            let record = api
                .update_audit(&token, kind, &id, data)
                .await
                .into_result()?;
            print_json(&record);
        }
        AuditAction::Delete { kind, id } => {
            let ack = api.delete_audit(&token, kind, &id).await.into_result()?;
            println!("{}", ack.message());
        }
    }

    Ok(())
}
