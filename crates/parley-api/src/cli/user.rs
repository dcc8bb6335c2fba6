//! User management CLI commands: create, list.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use dialoguer::Password;
use secrecy::ExposeSecret;

use parley_core::repository::user::UserRepository;
use parley_types::auth::{MIN_PASSWORD_LEN, RegisterStatus};

use crate::state::AppState;

#[derive(Subcommand)]
pub enum UserCommand {
    /// Create a user account (prompts for the password).
    Create {
        /// Email address for the new account.
        #[arg(long)]
        email: String,
    },

    /// List user accounts.
    #[command(alias = "ls")]
    List,
}

/// Create a user through the same validation and hashing as `POST /register`.
///
/// Registration also opens a session; the CLI has no use for it and revokes
/// it straight away.
pub async fn create_user(state: &AppState, email: &str, json: bool) -> Result<()> {
    let password = Password::new()
        .with_prompt(format!("Password for {}", style(email).bold()))
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let outcome = state
        .auth_service
        .register(Some(email), Some(&password))
        .await;

    if let Some(session) = &outcome.session {
        state.auth_service.logout(session.token.expose_secret()).await;
    }

    if json {
        println!(
            "{}",
            serde_json::json!({"email": email.to_lowercase(), "status": outcome.status})
        );
        return match outcome.status {
            RegisterStatus::Success | RegisterStatus::CreatedSignInFailed => Ok(()),
            other => anyhow::bail!("user not created: {other}"),
        };
    }

    match outcome.status {
        RegisterStatus::Success | RegisterStatus::CreatedSignInFailed => {
            println!(
                "  {} User '{}' created",
                style("✓").green().bold(),
                style(email.to_lowercase()).cyan()
            );
            Ok(())
        }
        RegisterStatus::UserExists => anyhow::bail!("a user with email '{email}' already exists"),
        RegisterStatus::InvalidData => anyhow::bail!(
            "invalid email or password (passwords need at least {MIN_PASSWORD_LEN} characters)"
        ),
        RegisterStatus::Failed => anyhow::bail!("failed to create user, see logs for details"),
    }
}

/// List all users, oldest first.
pub async fn list_users(state: &AppState, json: bool) -> Result<()> {
    let users = state.auth_service.users().list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&users)?);
        return Ok(());
    }

    if users.is_empty() {
        println!();
        println!(
            "  {} No users yet. Add one with: {}",
            style("i").blue().bold(),
            style("parley user create --email you@example.com").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Email").fg(Color::White),
        Cell::new("ID").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for user in &users {
        table.add_row(vec![
            Cell::new(&user.email).fg(Color::Cyan),
            Cell::new(user.id.to_string()).fg(Color::DarkGrey),
            Cell::new(user.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} user{}",
        style(users.len()).bold(),
        if users.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}
