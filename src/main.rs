#![deny(clippy::mod_module_files)]
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod git;
mod protocol;
mod store;
mod workspace;

use config::PlaygroundConfig;
use store::{JsonFileStore, MemoryStore, UserRecord, UserStore};
use workspace::{Session, SessionStorage};

/// Wrapper enum for the available user store backends
/// This allows us to fall back to the in-memory store on read-only
/// filesystems while keeping the protocol handler generic.
enum Store {
    JsonFile(JsonFileStore),
    Memory(MemoryStore),
}

// Implement UserStore for Store by delegating to the inner backend
impl UserStore for Store {
    fn signup(&self, name: &str, email: &str) -> Result<UserRecord> {
        match self {
            Store::JsonFile(s) => s.signup(name, email),
            Store::Memory(s) => s.signup(name, email),
        }
    }

    fn login(&self, email: &str) -> Result<Option<UserRecord>> {
        match self {
            Store::JsonFile(s) => s.login(email),
            Store::Memory(s) => s.login(email),
        }
    }

    fn sync(&self, record: &UserRecord) -> Result<UserRecord> {
        match self {
            Store::JsonFile(s) => s.sync(record),
            Store::Memory(s) => s.sync(record),
        }
    }
}

/// Simulated version control for the Codex playground.
///
/// The host application drives it over stdin/stdout, one command per
/// line; session state lives in `session.json` inside the workspace and
/// push/pull exchange the full (files, git) tuple with the user store.
#[derive(Parser, Debug)]
#[command(name = "codex-vcs", version, about)]
struct Cli {
    /// Workspace directory holding session.json
    #[arg(long, default_value = ".")]
    workspace: PathBuf,

    /// Override the configured user store location (users.json)
    #[arg(long)]
    store: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = PlaygroundConfig::load()?;
    if let Some(store_path) = cli.store {
        config.store_path = store_path;
    }

    let store = match JsonFileStore::new(&config.store_path) {
        Ok(store) => Store::JsonFile(store),
        Err(e) => {
            tracing::warn!(
                "user store unavailable at {:?} ({e:#}); falling back to in-memory store",
                config.store_path
            );
            Store::Memory(MemoryStore::new())
        }
    };
    let storage = SessionStorage::new(&cli.workspace)?;
    let mut session = Session::open(storage)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    protocol::handle_commands(&mut session, &store, &config, stdin.lock(), &mut stdout)
}
