mod app;
mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::App;

#[derive(Parser)]
#[command(name = "almanac")]
#[command(about = "A month calendar for your local appointments")]
struct Cli {
    /// Use this storage file instead of the configured one
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Log state changes and storage fallbacks
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the displayed month (default)
    Show,
    /// Move forward one or more months
    Next {
        #[arg(default_value_t = 1)]
        months: u16,
    },
    /// Move back one or more months
    Prev {
        #[arg(default_value_t = 1)]
        months: u16,
    },
    /// Jump back to the current month
    Today,
    /// Add an appointment on a day of the displayed month
    Add {
        /// Day of the displayed month (1-31)
        day: u32,

        #[command(flatten)]
        fields: FormArgs,
    },
    /// Change an existing appointment
    Edit {
        id: String,

        #[command(flatten)]
        fields: FormArgs,
    },
    /// Delete an appointment
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
    /// List appointments, optionally searching and filtering by category
    List {
        /// Case-insensitive text matched against name and description
        #[arg(short, long, default_value = "")]
        search: String,

        /// all, meeting, personal or birthday
        #[arg(short, long, default_value = "all")]
        category: String,
    },
    /// Export the displayed month as JSON
    Export {
        /// Directory to write into (defaults to the configured export_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show configuration paths
    Config,
}

/// Appointment form fields. Everything is optional here; `add` checks
/// what is required through the same validation the store applies.
#[derive(Args, Default)]
pub struct FormArgs {
    #[arg(short, long)]
    pub name: Option<String>,

    /// Start time, HH:MM (24h)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time, HH:MM (24h)
    #[arg(short, long)]
    pub end: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long)]
    pub location: Option<String>,

    /// meeting, personal or birthday
    #[arg(short, long)]
    pub category: Option<String>,

    /// Minutes before: 5, 15, 30 or 60
    #[arg(short, long)]
    pub reminder: Option<String>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "almanac=debug,almanac_core=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut app = App::load(cli.storage)?;

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => commands::show::run(&app),
        Commands::Next { months } => commands::navigate::run(&mut app, i32::from(months)),
        Commands::Prev { months } => commands::navigate::run(&mut app, -i32::from(months)),
        Commands::Today => commands::navigate::today(&mut app),
        Commands::Add { day, fields } => commands::add::run(&mut app, day, fields),
        Commands::Edit { id, fields } => commands::edit::run(&mut app, &id, fields),
        Commands::Delete { id, yes } => commands::delete::run(&mut app, &id, yes),
        Commands::List { search, category } => commands::list::run(&mut app, search, &category),
        Commands::Export { out } => commands::export::run(&mut app, out),
        Commands::Config => commands::config::run(&app),
    }
}
