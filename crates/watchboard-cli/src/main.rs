use clap::{ArgAction, Parser, Subcommand};
use commands::{add, board, config, details, prefs, remove, search, status, users};
use media_tracker_config::{Config, PathManager};
use media_tracker_models::{
    CardSize, MediaKind, MediaTypeFilter, RuntimeFilter, WatchPreference, WatchPreferenceFilter, WatchStatus,
};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchboard")]
#[command(about = "Watchboard - track what you and your partner are watching")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List, create and switch users
    Users {
        #[command(subcommand)]
        cmd: UsersCommands,
    },
    /// Show the board: one column per watch status, with counts
    #[command(long_about = "Show the active user's tracker as five status columns. Filters given here are remembered for the next run; use --reset to clear them.")]
    Board {
        /// Only movies or only shows (all, movie, show)
        #[arg(long = "type", value_name = "TYPE")]
        media_type: Option<MediaTypeFilter>,

        /// Runtime class (all, short <90m, medium 90-150m, long >150m)
        #[arg(long)]
        runtime: Option<RuntimeFilter>,

        /// Who it is watched with (all, alone, partner)
        #[arg(long)]
        preference: Option<WatchPreferenceFilter>,

        /// Forget remembered filters
        #[arg(long, action = ArgAction::SetTrue)]
        reset: bool,
    },
    /// Search the catalog for movies and shows
    Search {
        query: String,
    },
    /// Search and add a title to the tracker as To Watch
    Add {
        query: String,

        /// Which search result to add (1-based); prompts when omitted
        #[arg(long)]
        pick: Option<usize>,
    },
    /// Runtime, seasons, genres and cast for a title
    Details {
        id: u64,
        /// movie or tv
        kind: MediaKind,
    },
    /// Move a tracked title to another status
    Status {
        id: u64,
        kind: MediaKind,
        /// to-watch, in-progress, watching, waiting or watched
        status: WatchStatus,
    },
    /// Change who a tracked title is watched with
    Prefer {
        id: u64,
        kind: MediaKind,
        /// alone or partner
        preference: WatchPreference,
    },
    /// Remove a tracked title (asks for confirmation)
    Remove {
        id: u64,
        kind: MediaKind,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y', action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Show or change display preferences
    Prefs {
        #[command(subcommand)]
        cmd: PrefsCommands,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum UsersCommands {
    /// List all users
    List,
    /// Create a user
    Add {
        name: String,

        /// Make the new user the active one
        #[arg(long, action = ArgAction::SetTrue)]
        select: bool,
    },
    /// Make a user the active one
    Use { id: u64 },
}

#[derive(Subcommand)]
enum PrefsCommands {
    Show,
    Set {
        /// small, medium or large
        #[arg(long)]
        card_size: Option<CardSize>,

        /// Watch preference for new titles when no filter is set (alone or partner)
        #[arg(long)]
        default_preference: Option<WatchPreference>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the current configuration (API key masked)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file without asking
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // Logging settings come from the config file when there is a readable one
    let config_file = PathManager::default().config_file();
    let logging_config = Config::load_from_file(&config_file)
        .map(|c| c.logging)
        .unwrap_or_default();
    logging::init_logging(cli.verbose, cli.quiet, &logging_config)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Users { cmd } => users::run_users(cmd, &output).await,
        Commands::Board {
            media_type,
            runtime,
            preference,
            reset,
        } => {
            let args = board::BoardArgs {
                media_type,
                runtime,
                preference,
                reset,
            };
            board::run_board(args, &output).await
        }
        Commands::Search { query } => search::run_search(query, &output).await,
        Commands::Add { query, pick } => add::run_add(query, pick, &output).await,
        Commands::Details { id, kind } => details::run_details(id, kind, &output).await,
        Commands::Status { id, kind, status } => status::run_status(id, kind, status, &output).await,
        Commands::Prefer { id, kind, preference } => status::run_prefer(id, kind, preference, &output).await,
        Commands::Remove { id, kind, yes } => remove::run_remove(id, kind, yes, &output).await,
        Commands::Prefs { cmd } => prefs::run_prefs(cmd, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output),
    }
}
