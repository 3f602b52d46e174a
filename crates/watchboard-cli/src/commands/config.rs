use super::prompts::prompt_yes_no;
use super::progress::is_interactive;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use media_tracker_config::{Config, PathManager, RepositionPolicy};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Init { force } => init_config(force, output),
    }
}

/// Show the first and last two characters of a secret
fn mask_secret(s: &str) -> String {
    if s.is_empty() || s == Config::default().catalog.api_key {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}

fn section(title: &str, rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)]);
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    table
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();

    if !config_file.exists() {
        output.warn(format!("Configuration file not found at: {}", config_file.display()));
        output.info("Create one with 'watchboard config init'.");
        return Ok(());
    }

    let config = Config::load_from_file(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    let api_key = if full {
        config.catalog.api_key.clone()
    } else {
        mask_secret(&config.catalog.api_key)
    };

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "persistence": config.persistence,
            "catalog": {
                "base_url": config.catalog.base_url,
                "image_base_url": config.catalog.image_base_url,
                "api_key": api_key,
                "timeout_secs": config.catalog.timeout_secs,
            },
            "tracker": config.tracker,
            "logging": config.logging,
            "valid": config.validate().is_ok(),
        }));
        return Ok(());
    }

    output.println(format!("{} {}", "Config file:".bold(), config_file.display()));
    output.println(
        section(
            "Persistence",
            vec![
                ("Base URL", config.persistence.base_url.clone()),
                ("Timeout", format!("{}s", config.persistence.timeout_secs)),
            ],
        )
        .to_string(),
    );
    output.println(
        section(
            "Catalog (TMDB)",
            vec![
                ("Base URL", config.catalog.base_url.clone()),
                ("Image URL", config.catalog.image_base_url.clone()),
                ("API key", api_key),
                ("Timeout", format!("{}s", config.catalog.timeout_secs)),
            ],
        )
        .to_string(),
    );
    output.println(
        section(
            "Tracker",
            vec![(
                "Reposition on revert",
                match config.tracker.reposition_on_revert {
                    RepositionPolicy::Sticky => "sticky (keep new position)".to_string(),
                    RepositionPolicy::Restore => "restore (return to old position)".to_string(),
                },
            )],
        )
        .to_string(),
    );

    match config.validate() {
        Ok(()) => output.success("Configuration is valid"),
        Err(e) => output.warn(format!("Configuration problem: {}", e)),
    }
    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let paths = PathManager::default();
    let config_file = paths.config_file();

    if config_file.exists() && !force {
        let overwrite = is_interactive()
            && prompt_yes_no(&format!("{} exists. Overwrite it?", config_file.display()), false)?;
        if !overwrite {
            output.info("Keeping the existing configuration");
            return Ok(());
        }
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create {}: {}", paths.config_dir().display(), e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote starter configuration to {}", config_file.display()));
    output.info("Set catalog.api_key (or TMDB_API_KEY) and persistence.base_url before use.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret(""), "<not set>");
        assert_eq!(mask_secret("YOUR_TMDB_API_KEY"), "<not set>");
        assert_eq!(mask_secret("abcd"), "****");
        assert_eq!(mask_secret("0123456789abcdef"), "01***ef");
    }
}
