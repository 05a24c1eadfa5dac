//! JSON file persistence for the registry

use crate::{DatasetRegistry, RegistryError};
use datascout_domain::traits::RegistrySink;
use datascout_domain::DatasetEntry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Registry persisted as a pretty-printed JSON array of entries
///
/// Saving always overwrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonRegistryFile {
    path: PathBuf,
}

impl JsonRegistryFile {
    /// Create a handle for a registry file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the registry file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the registry from the file
    pub fn load(&self) -> Result<DatasetRegistry, RegistryError> {
        let contents = fs::read_to_string(&self.path)?;
        let entries: Vec<DatasetEntry> = serde_json::from_str(&contents)?;
        info!(
            "Loaded {} registry entries from {}",
            entries.len(),
            self.path.display()
        );
        DatasetRegistry::from_entries(entries)
    }

    /// Load the registry, falling back to the built-in list when the file does not exist
    pub fn load_or_seed(&self) -> Result<DatasetRegistry, RegistryError> {
        if self.path.exists() {
            self.load()
        } else {
            warn!(
                "Registry file {} not found, starting from built-in datasets",
                self.path.display()
            );
            Ok(DatasetRegistry::seeded())
        }
    }

    /// Save a registry snapshot
    pub fn save_registry(&self, registry: &DatasetRegistry) -> Result<(), RegistryError> {
        self.save(registry.entries())
    }
}

impl RegistrySink for JsonRegistryFile {
    type Error = RegistryError;

    fn save(&self, entries: &[DatasetEntry]) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, contents)?;
        info!("Saved {} registry entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}
