use super::context::{load_config, load_session};
use super::progress::Spinner;
use crate::output::Output;
use crate::UsersCommands;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use comfy_table::{presets, Cell, Table};
use media_tracker_sources::{PersistenceClient, PersistenceService};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_users(cmd: UsersCommands, output: &Output) -> Result<()> {
    let config = load_config()?;
    let client = PersistenceClient::from_config(&config.persistence);

    match cmd {
        UsersCommands::List => list_users(&client, output).await,
        UsersCommands::Add { name, select } => add_user(&client, &name, select, output).await,
        UsersCommands::Use { id } => use_user(&client, id, output).await,
    }
}

async fn list_users(client: &PersistenceClient, output: &Output) -> Result<()> {
    let spinner = Spinner::start("Fetching users...", output.is_human());
    let users = client.list_users().await;
    spinner.finish();
    let users = users.wrap_err("Failed to list users")?;

    let mut session = load_session()?;
    if let Some(id) = session.active_user_id() {
        if !users.iter().any(|u| u.id == id) {
            tracing::warn!("Active user {} no longer exists; clearing selection", id);
            session.clear_active_user();
            session.save().map_err(|e| eyre!("Failed to save session: {}", e))?;
        }
    }
    let active = session.active_user_id();

    if !output.is_human() {
        output.json(&json!({ "users": users, "active_user_id": active }));
        return Ok(());
    }

    if users.is_empty() {
        output.info("No users yet. Create one with 'watchboard users add <name>'.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(vec!["", "ID", "Name"]);
    for user in &users {
        let marker = if Some(user.id) == active { "●".green().to_string() } else { String::new() };
        table.add_row(vec![Cell::new(marker), Cell::new(user.id), Cell::new(&user.name)]);
    }
    output.println(table.to_string());
    Ok(())
}

async fn add_user(client: &PersistenceClient, name: &str, select: bool, output: &Output) -> Result<()> {
    let user = match client.create_user(name).await {
        Ok(user) => user,
        Err(e) if e.is_conflict() => {
            return Err(eyre!("A user named '{}' already exists", name.trim()));
        }
        Err(e) => return Err(e).wrap_err("Failed to create user"),
    };

    if select {
        let mut session = load_session()?;
        session.set_active_user(&user);
        session.save().map_err(|e| eyre!("Failed to save session: {}", e))?;
    }

    if output.is_human() {
        output.success(format!("Created user '{}' (id {})", user.name, user.id));
        if select {
            output.info(format!("Now using {}'s tracker", user.name.bold()));
        }
    } else {
        output.json(&json!({ "user": user, "selected": select }));
    }
    Ok(())
}

async fn use_user(client: &PersistenceClient, id: u64, output: &Output) -> Result<()> {
    let users = client.list_users().await.wrap_err("Failed to list users")?;
    let user = users
        .into_iter()
        .find(|u| u.id == id)
        .ok_or_else(|| eyre!("No user with id {}", id))?;

    let mut session = load_session()?;
    session.set_active_user(&user);
    session.save().map_err(|e| eyre!("Failed to save session: {}", e))?;

    if output.is_human() {
        output.success(format!("Now using {}'s tracker", user.name.bold()));
    } else {
        output.json(&json!({ "user": user }));
    }
    Ok(())
}
