// ============================================================
// Layer 6 — Config Store
// ============================================================
// Saves and loads ReaderConfig as JSON so a reader can be
// rebuilt with the same mode / nbest / threshold it was tuned
// with.
//
// File layout:
//   <dir>/reader_config.json

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::application::reader_config::ReaderConfig;

pub const CONFIG_FILE: &str = "reader_config.json";

pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn save(&self, cfg: &ReaderConfig) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let path = self.path();
        let json = serde_json::to_string_pretty(cfg)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved reader config to '{}'", path.display());
        Ok(())
    }

    /// Load and validate the stored config.
    pub fn load(&self) -> Result<ReaderConfig> {
        let path = self.path();
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;

        let cfg: ReaderConfig = serde_json::from_str(&json)
            .with_context(|| format!("Invalid reader config in '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Stored config, or the defaults when none has been saved.
    pub fn load_or_default(&self) -> Result<ReaderConfig> {
        if self.path().exists() {
            self.load()
        } else {
            tracing::debug!("No reader config in '{}', using defaults", self.dir.display());
            Ok(ReaderConfig::default())
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::reader_config::QaType;

    #[test]
    fn test_save_then_load() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        let cfg   = ReaderConfig {
            qa_type:        QaType::SimpleAnswer,
            nbest:          3,
            null_threshold: -1.0,
            max_answer_len: Some(30),
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load().unwrap(), cfg);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ConfigStore::new(dir.path()).load_or_default().unwrap();
        assert_eq!(cfg, ReaderConfig::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir   = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path());
        fs::write(store.path(), r#"{"nbest": 0}"#).unwrap();
        assert!(store.load().is_err());
    }
}
