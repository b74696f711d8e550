//! Durability mode for journal appends.

use serde::{Deserialize, Serialize};

/// When journal appends reach stable storage.
///
/// Every mode except `None` hands each entry to the OS before the write is
/// applied in memory, so a process crash loses nothing. The modes differ in
/// how much an OS crash or power loss can take with it.
///
/// | Mode | fsync | Use Case |
/// |------|-------|----------|
/// | None | never (no file) | Tests, ephemeral trackers |
/// | Batched | every `batch_size` appends, and on flush | Production (balanced) |
/// | Strict | every append | Audit-grade tracking |
///
/// In TOML: `durability = { mode = "batched", batch_size = 256 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DurabilityMode {
    /// No journal. All data lost when the process exits.
    None,

    /// fsync after every append.
    Strict,

    /// fsync every `batch_size` appends.
    ///
    /// May lose up to `batch_size` samples on power loss.
    Batched {
        /// Maximum appends between fsyncs
        batch_size: usize,
    },
}

impl DurabilityMode {
    /// Check if this mode keeps a journal file.
    pub fn requires_journal(&self) -> bool {
        !matches!(self, DurabilityMode::None)
    }

    /// Check if every append must be fsynced before it is acknowledged.
    pub fn requires_immediate_fsync(&self) -> bool {
        matches!(self, DurabilityMode::Strict)
    }

    /// Whether `pending` unsynced appends call for an fsync now.
    pub fn should_sync(&self, pending: usize) -> bool {
        match self {
            DurabilityMode::None => false,
            DurabilityMode::Strict => pending > 0,
            DurabilityMode::Batched { batch_size } => pending >= (*batch_size).max(1),
        }
    }

    /// Human-readable description of the mode.
    pub fn description(&self) -> &'static str {
        match self {
            DurabilityMode::None => "No durability (fastest, all data lost on exit)",
            DurabilityMode::Strict => "Sync fsync (safest, slowest)",
            DurabilityMode::Batched { .. } => "Batched fsync (balanced speed/safety)",
        }
    }

    /// Batched mode with the recommended batch size of 1000.
    pub fn buffered_default() -> Self {
        DurabilityMode::Batched { batch_size: 1000 }
    }
}

impl Default for DurabilityMode {
    fn default() -> Self {
        Self::buffered_default()
    }
}
