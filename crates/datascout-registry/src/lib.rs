//! Datascout Dataset Registry
//!
//! Canonical, append-only store of known datasets, with the matching rule used
//! to reconcile dataset mentions extracted from papers.
//!
//! # Matching
//!
//! A candidate refers to an existing entry when the dataset names agree
//! case-insensitively and either the authors or the DOI/link agree
//! case-insensitively as well. The first such entry in registry order wins.
//!
//! # Examples
//!
//! ```
//! use datascout_domain::{DatasetCandidate, DatasetId};
//! use datascout_registry::DatasetRegistry;
//!
//! let mut registry = DatasetRegistry::seeded();
//! assert_eq!(registry.len(), 5);
//!
//! let known = DatasetCandidate::new("nsl-kdd", "GhulamMohi-ud-din", "");
//! assert_eq!(registry.find_match(&known), Some(DatasetId::new(2)));
//!
//! let fresh = DatasetCandidate::new("CIC-DDoS2019", "Sharafaldin et al.", "https://example.org/x");
//! assert_eq!(registry.find_match(&fresh), None);
//! assert_eq!(registry.register_new(&fresh), DatasetId::new(6));
//! assert_eq!(registry.len(), 6);
//! ```

#![warn(missing_docs)]

mod file;
mod seed;

pub use file::JsonRegistryFile;
pub use seed::builtin_entries;

use datascout_domain::{DatasetCandidate, DatasetEntry, DatasetId};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading or saving a registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Registry file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Registry file is not a valid entry array
    #[error("Invalid registry JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two loaded entries share an id
    #[error("Duplicate dataset id in registry: {0}")]
    DuplicateId(DatasetId),
}

/// Outcome of reconciling one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Candidate refers to an existing entry
    Matched(DatasetId),
    /// Candidate was appended as a new entry
    Registered(DatasetId),
}

impl Reconciliation {
    /// The id the candidate resolved to
    pub fn id(&self) -> DatasetId {
        match self {
            Reconciliation::Matched(id) | Reconciliation::Registered(id) => *id,
        }
    }

    /// Whether a new entry was created
    pub fn is_new(&self) -> bool {
        matches!(self, Reconciliation::Registered(_))
    }
}

/// In-memory registry of canonical datasets
///
/// Entries are only ever appended through [`DatasetRegistry::register_new`];
/// existing entries are never edited or removed.
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    entries: Vec<DatasetEntry>,
    next_id: DatasetId,
}

impl DatasetRegistry {
    /// Create an empty registry; the first issued id is 1
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: DatasetId::new(1),
        }
    }

    /// Create a registry holding the built-in dataset list
    pub fn seeded() -> Self {
        // Built-in ids are dense and unique
        Self::from_entries(builtin_entries()).unwrap_or_default()
    }

    /// Create a registry from pre-loaded entries
    ///
    /// The next id is one past the number of entries, or one past the
    /// largest loaded id when ids are sparse, so issued ids never collide.
    pub fn from_entries(entries: Vec<DatasetEntry>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.unique_id) {
                return Err(RegistryError::DuplicateId(entry.unique_id));
            }
        }

        let max_id = entries
            .iter()
            .map(|e| e.unique_id.value())
            .max()
            .unwrap_or(0);
        let next_id = DatasetId::new(max_id.max(entries.len() as u64) + 1);

        Ok(Self { entries, next_id })
    }

    /// Find the id of the first entry the candidate refers to
    ///
    /// Has no side effects.
    pub fn find_match(&self, candidate: &DatasetCandidate) -> Option<DatasetId> {
        self.entries
            .iter()
            .find(|entry| entry.matches(candidate))
            .map(|entry| entry.unique_id)
    }

    /// Append a candidate as a new entry and return its id
    ///
    /// Callers are expected to have checked [`DatasetRegistry::find_match`]
    /// first; use [`DatasetRegistry::reconcile`] to do both in one step.
    pub fn register_new(&mut self, candidate: &DatasetCandidate) -> DatasetId {
        let id = self.next_id;
        self.entries.push(DatasetEntry::from_candidate(id, candidate));
        self.next_id = id.next();
        debug!(
            "Registered dataset '{}' with id {}",
            candidate.dataset_name, id
        );
        id
    }

    /// Match a candidate, registering it when no entry refers to it
    pub fn reconcile(&mut self, candidate: &DatasetCandidate) -> Reconciliation {
        match self.find_match(candidate) {
            Some(id) => Reconciliation::Matched(id),
            None => Reconciliation::Registered(self.register_new(candidate)),
        }
    }

    /// First entry whose name equals `name` case-insensitively, ignoring authors and link
    pub fn find_by_name(&self, name: &str) -> Option<&DatasetEntry> {
        let wanted = name.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.dataset_name.to_lowercase() == wanted)
    }

    /// Look up an entry by id
    pub fn get(&self, id: DatasetId) -> Option<&DatasetEntry> {
        self.entries.iter().find(|e| e.unique_id == id)
    }

    /// All entries in registration order
    pub fn entries(&self) -> &[DatasetEntry] {
        &self.entries
    }

    /// Id the next registration will receive
    pub fn next_id(&self) -> DatasetId {
        self.next_id
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DatasetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
