use anyhow::Result;
use greenaudit::cli::{actions, actions::Action, start};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let (globals, action) = start()?;

    // Handle the action
    match action {
        Action::Auth(action) => actions::auth::handle(action, &globals).await?,
        Action::Audit(action) => actions::audit::handle(action, &globals).await?,
    }

    Ok(())
}
