//! Session state: the open database and the executor in front of it.

use std::path::PathBuf;
use std::sync::Arc;

use clap::ArgMatches;
use contrail_engine::{Database, EngineConfig};
use contrail_executor::{Command, Executor, Output};

/// Journal directory when neither `--db` nor the config names one.
pub const DEFAULT_DB_DIR: &str = ".contrail";

/// One CLI session over one database.
pub struct SessionState {
    executor: Executor,
}

impl SessionState {
    /// Wrap an already open database.
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            executor: Executor::new(db),
        }
    }

    /// Open the database described by the global flags.
    ///
    /// `--memory` wins over `--db`, which wins over the config's `data_dir`.
    pub fn open(matches: &ArgMatches) -> Result<Self, String> {
        let config_path = matches.get_one::<String>("config").map(PathBuf::from);
        let mut config = EngineConfig::load(config_path.as_deref())
            .map_err(|e| format!("Failed to load configuration: {}", e))?;

        if matches.get_flag("memory") {
            config.data_dir = None;
        } else if let Some(dir) = matches.get_one::<String>("db") {
            config.data_dir = Some(PathBuf::from(dir));
        } else if config.data_dir.is_none() {
            config.data_dir = Some(PathBuf::from(DEFAULT_DB_DIR));
        }

        let db = Database::open_with_config(config)
            .map_err(|e| format!("Failed to open database: {}", e))?;
        Ok(Self::new(Arc::new(db)))
    }

    /// Run one command.
    pub fn execute(&self, cmd: Command) -> contrail_executor::Result<Output> {
        self.executor.execute(cmd)
    }

    /// Checkpoint and flush the journal.
    pub fn close(&self) -> Result<(), String> {
        self.executor
            .database()
            .shutdown()
            .map_err(|e| format!("Failed to close database: {}", e))
    }
}
