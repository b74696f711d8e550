//! The executor: single entry point for every command.

use std::sync::Arc;

use contrail_engine::Database;
use tracing::debug;

use crate::bridge::Engines;
use crate::handlers;
use crate::{Command, Output, Result};

/// Dispatches [`Command`]s to their handlers
///
/// All state lives in the `Arc<Database>`.
pub struct Executor {
    engines: Engines,
}

impl Executor {
    /// Create an executor over `db`
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            engines: Engines::new(db),
        }
    }

    /// Execute one command
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        debug!(target: "contrail::executor", command = cmd.name(), "execute");
        let p = &self.engines;
        match cmd {
            Command::Ingest(request) => handlers::ingest::ingest(p, request),
            Command::Track { id, timestamp } => handlers::track::track(p, id, timestamp),
            Command::ListActive => handlers::listing::list_active(p),
            Command::ListLogs { limit } => handlers::listing::list_logs(p, limit),
            Command::Search { criteria } => handlers::search::search(p, criteria),
            Command::Stats => handlers::db::stats(p),
            Command::Ping => handlers::db::ping(p),
        }
    }

    /// The database behind this executor
    pub fn database(&self) -> &Arc<Database> {
        &self.engines.db
    }
}
