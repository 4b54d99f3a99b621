use anyhow::{Context, Result};
use barakah_core::time::parse_timezone;
use barakah_core::{Catalog, GoalStore, SystemClock};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod goal_cmd;
mod state;

use goal_cmd::GoalCommand;
use state::FileStorage;

#[derive(Parser, Debug)]
#[command(name = "barakah", version, about = "Barakah goal planner and tracker")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan and track your active goal
    Goal {
        #[command(subcommand)]
        command: GoalCommand,
    },

    /// Manage ~/.barakah/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn init_logging(verbose: bool, configured: &str) {
    let fallback = if verbose { "debug" } else { configured };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(language: &str) -> Result<Catalog> {
    let catalog = Catalog::english();
    let path = state::strings_path(language)?;
    match state::read_optional(&path)? {
        Some(src) => Ok(catalog
            .with_overrides(&src)
            .with_context(|| format!("load {}", path.display()))?),
        None => Ok(catalog),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_logging(cli.verbose, &cfg.logging.filter);

    match cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },

        Command::Goal { command } => {
            let tz = parse_timezone(&cfg.profile.timezone)
                .context("invalid profile.timezone in config.toml")?;
            let home = state::ensure_barakah_home()?;
            debug!(home = %home.display(), %tz, "opening goal store");

            let mut store = GoalStore::open(FileStorage::new(home), SystemClock, tz)
                .context("open goal store")?;
            let catalog = load_catalog(&cfg.profile.language)?;
            goal_cmd::run(command, &mut store, &catalog, &cfg)?;
        }
    }

    Ok(())
}
