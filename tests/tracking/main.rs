//! Tracking Integration Test Suite
//!
//! Exercises the public `contrail` facade end to end:
//!
//! - `ingest`: create/append semantics and validation
//! - `archive`: the landing transition
//! - `track`: full views and point lookups
//! - `search`: hybrid search over both collections
//! - `concurrency`: many producers and readers at once
//! - `durability`: journal replay across reopen
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test tracking
//! cargo test --test tracking durability::
//! ```

mod common;

mod archive;
mod concurrency;
mod durability;
mod ingest;
mod search;
mod track;
