pub mod add;
pub mod board;
pub mod config;
pub mod context;
pub mod details;
pub mod prefs;
pub mod progress;
pub mod prompts;
pub mod remove;
pub mod search;
pub mod status;
pub mod users;
