use color_eyre::eyre::eyre;
use color_eyre::Result;
use dialoguer::{Confirm, Select};

pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| eyre!("Failed to read confirmation: {}", e))
}

/// Pick one of `items`, returning its index
pub fn prompt_select(prompt: &str, items: &[String]) -> Result<usize> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| eyre!("Failed to read selection: {}", e))
}
