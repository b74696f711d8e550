//! Engine handles shared by all handlers.

use contrail_engine::{Database, IngestEngine, QueryEngine};
use std::sync::Arc;

/// Write and read engines over one database
pub(crate) struct Engines {
    pub(crate) db: Arc<Database>,
    pub(crate) ingest: IngestEngine,
    pub(crate) query: QueryEngine,
}

impl Engines {
    pub(crate) fn new(db: Arc<Database>) -> Self {
        Self {
            ingest: IngestEngine::new(db.clone()),
            query: QueryEngine::new(db.clone()),
            db,
        }
    }
}
