//! Engine configuration
//!
//! Loaded from `contrail.toml` or built in code. Every field has a default,
//! so an empty file is a valid configuration:
//!
//! ```toml
//! terminal_status = "landed"
//! default_status = "in_flight"
//! archive_list_limit = 50
//! timestamp_match = "exact"
//! data_dir = "./contrail-data"
//! durability = { mode = "batched", batch_size = 1000 }
//! ```
//!
//! Environment overrides (`CONTRAIL_DATA_DIR`, `CONTRAIL_DURABILITY`,
//! `CONTRAIL_TERMINAL_STATUS`) are applied on top of the file by
//! [`EngineConfig::load`].

use contrail_core::{Error, FlightStatus, Result, TimestampMatch};
use contrail_storage::DurabilityMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name
pub const CONFIG_FILE: &str = "contrail.toml";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Status value that ends a flight and moves it to the archive
    #[serde(default = "default_terminal_status")]
    pub terminal_status: String,

    /// Status recorded when a sample carries none
    #[serde(default = "default_status")]
    pub default_status: String,

    /// Archive listing size when the caller gives no limit
    #[serde(default = "default_archive_list_limit")]
    pub archive_list_limit: usize,

    /// How `track_at` compares timestamps
    #[serde(default)]
    pub timestamp_match: TimestampMatch,

    /// Journal directory; `None` keeps everything in memory
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Journal sync policy
    #[serde(default)]
    pub durability: DurabilityMode,
}

fn default_terminal_status() -> String {
    FlightStatus::LANDED.to_string()
}

fn default_status() -> String {
    FlightStatus::IN_FLIGHT.to_string()
}

fn default_archive_list_limit() -> usize {
    50
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            terminal_status: default_terminal_status(),
            default_status: default_status(),
            archive_list_limit: default_archive_list_limit(),
            timestamp_match: TimestampMatch::default(),
            durability: DurabilityMode::default(),
            data_dir: None,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Load with precedence: environment > file > defaults
    ///
    /// With no explicit path, `contrail.toml` in the working directory is
    /// used when present. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(CONFIG_FILE).exists() => Self::from_file(CONFIG_FILE)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CONTRAIL_*` overrides from `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("CONTRAIL_DATA_DIR") {
            self.data_dir = if dir.is_empty() {
                None
            } else {
                Some(PathBuf::from(dir))
            };
        }

        if let Some(mode) = lookup("CONTRAIL_DURABILITY") {
            self.durability = match mode.to_lowercase().as_str() {
                "none" => DurabilityMode::None,
                "strict" => DurabilityMode::Strict,
                "batched" => DurabilityMode::buffered_default(),
                other => {
                    return Err(Error::Config(format!(
                        "invalid CONTRAIL_DURABILITY: {}",
                        other
                    )))
                }
            };
        }

        if let Some(status) = lookup("CONTRAIL_TERMINAL_STATUS") {
            self.terminal_status = status;
        }

        Ok(())
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.terminal_status.trim().is_empty() {
            return Err(Error::Config("terminal_status must not be empty".into()));
        }
        if self.default_status.trim().is_empty() {
            return Err(Error::Config("default_status must not be empty".into()));
        }
        if self.terminal_status == self.default_status {
            return Err(Error::Config(format!(
                "default_status must differ from terminal_status ({})",
                self.terminal_status
            )));
        }
        if self.archive_list_limit == 0 {
            return Err(Error::Config(
                "archive_list_limit must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Whether `status` ends a flight
    pub fn is_terminal(&self, status: &FlightStatus) -> bool {
        status.is(&self.terminal_status)
    }

    /// Status for samples that carry none
    pub fn default_flight_status(&self) -> FlightStatus {
        FlightStatus::parse(&self.default_status)
    }

    /// Whether a journal is kept
    pub fn is_persistent(&self) -> bool {
        self.data_dir.is_some() && self.durability.requires_journal()
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.terminal_status, "landed");
        assert_eq!(config.default_status, "in_flight");
        assert_eq!(config.archive_list_limit, 50);
        assert_eq!(config.timestamp_match, TimestampMatch::Exact);
        assert!(config.data_dir.is_none());
        assert!(!config.is_persistent());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(
            EngineConfig::from_toml_str("").unwrap(),
            EngineConfig::default()
        );
    }

    #[test]
    fn test_full_document() {
        let config = EngineConfig::from_toml_str(
            r#"
            terminal_status = "arrived"
            archive_list_limit = 10
            timestamp_match = "instant"
            data_dir = "/var/lib/contrail"
            durability = { mode = "strict" }
            "#,
        )
        .unwrap();

        assert_eq!(config.terminal_status, "arrived");
        assert_eq!(config.archive_list_limit, 10);
        assert_eq!(config.timestamp_match, TimestampMatch::Instant);
        assert_eq!(config.durability, DurabilityMode::Strict);
        assert!(config.is_persistent());
        assert!(config.is_terminal(&FlightStatus::parse("arrived")));
        assert!(!config.is_terminal(&FlightStatus::Landed));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = EngineConfig::from_toml_str("terminal = \"landed\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validate() {
        let mut config = EngineConfig::default();
        config.terminal_status = "  ".into();
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.default_status = "landed".into();
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.archive_list_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("CONTRAIL_DATA_DIR", "/tmp/flights"),
            ("CONTRAIL_DURABILITY", "Strict"),
            ("CONTRAIL_TERMINAL_STATUS", "arrived"),
        ]
        .into_iter()
        .collect();

        let mut config = EngineConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/flights")));
        assert_eq!(config.durability, DurabilityMode::Strict);
        assert_eq!(config.terminal_status, "arrived");
    }

    #[test]
    fn test_bad_durability_override() {
        let mut config = EngineConfig::default();
        let err = config
            .apply_overrides(|key| (key == "CONTRAIL_DURABILITY").then(|| "sometimes".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_toml_output_parses_back() {
        let mut config = EngineConfig::default();
        config.data_dir = Some(PathBuf::from("data"));
        let text = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_from_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/contrail.toml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
