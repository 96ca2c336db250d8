//! Command-line front end over `hazard_core`.
//!
//! # Responsibility
//! - Map subcommands onto `HazardStore` operations.
//! - Print results as JSON lines so output stays scriptable.

use clap::{Parser, Subcommand};
use hazard_core::{HazardStore, StoreConfig};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "hazard", version, about = "Record and manage hazard reports")]
struct Cli {
    /// SQLite database file; created when missing.
    #[arg(long, env = "HAZARD_DB_PATH", default_value = hazard_core::DEFAULT_DB_FILE)]
    db: PathBuf,

    #[arg(
        long,
        env = "HAZARD_LOG_LEVEL",
        default_value_t = hazard_core::default_log_level().to_string()
    )]
    log_level: String,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "HAZARD_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register a user that can own hazards.
    AddUser { username: String, email: String },
    /// Report a new hazard.
    Add {
        name: String,
        location: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        user: i64,
    },
    /// List hazards, optionally only those owned by one user.
    List {
        #[arg(long)]
        user: Option<i64>,
    },
    /// Replace selected fields; empty values keep the stored ones.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete one hazard.
    Delete { id: i64 },
    /// Delete a user together with every hazard it owns.
    DeleteUser { id: i64 },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = StoreConfig {
        db_path: cli.db,
        log_level: cli.log_level,
        log_dir: cli.log_dir,
        ..StoreConfig::default()
    };
    config.validate()?;
    hazard_core::init_logging_from_config(&config)?;

    let store = HazardStore::open_with_config(&config)?;
    match cli.command {
        Command::AddUser { username, email } => {
            let id = store.create_user(&username, &email)?;
            println!("{}", serde_json::json!({ "id": id }));
        }
        Command::Add {
            name,
            location,
            description,
            user,
        } => {
            let id = store.create_hazard(&name, &location, description.as_deref(), user)?;
            println!("{}", serde_json::json!({ "id": id }));
        }
        Command::List { user } => {
            let hazards = match user {
                Some(user_id) => store.list_hazards_by_user(user_id)?,
                None => store.list_all_hazards()?,
            };
            for hazard in hazards {
                println!("{}", serde_json::to_string(&hazard)?);
            }
        }
        Command::Update {
            id,
            name,
            location,
            description,
        } => {
            let updated = store.update_hazard(
                id,
                name.as_deref(),
                location.as_deref(),
                description.as_deref(),
            )?;
            println!("{}", serde_json::json!({ "id": id, "updated": updated }));
        }
        Command::Delete { id } => {
            let deleted = store.delete_hazard(id)?;
            println!("{}", serde_json::json!({ "id": id, "deleted": deleted }));
        }
        Command::DeleteUser { id } => {
            let deleted = store.delete_user(id)?;
            println!("{}", serde_json::json!({ "user_id": id, "deleted": deleted }));
        }
    }
    store.close()?;
    Ok(())
}
