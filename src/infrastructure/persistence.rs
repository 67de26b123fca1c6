use crate::domain::{Employee, RegistryError, RegistryResult};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ROSTER_FILE: &str = "employees.json";
const ROSTER_FILE_VAR: &str = "STAFFDESK_ROSTER_FILE";

/// Durable mirror of the roster: one JSON file, fully overwritten on save.
///
/// Single writer; no locking. A present-but-malformed file is an error and
/// propagates rather than being sanitized away.
pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        let path = env::var(ROSTER_FILE_VAR).unwrap_or_else(|_| DEFAULT_ROSTER_FILE.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved roster, or an empty one when no file exists yet.
    pub fn load(&self) -> RegistryResult<Vec<Employee>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| RegistryError::Storage(e.to_string()))?;
        serde_json::from_str(&content)
            .map_err(|e| RegistryError::Storage(format!("invalid roster file - {}", e)))
    }

    /// Overwrites the stored roster with the given ordered sequence.
    pub fn save_all(&self, roster: &[Employee]) -> RegistryResult<()> {
        let json = serde_json::to_string_pretty(roster)
            .map_err(|e| RegistryError::Storage(format!("serialization failed: {}", e)))?;
        fs::write(&self.path, json).map_err(|e| RegistryError::Storage(e.to_string()))
    }
}
