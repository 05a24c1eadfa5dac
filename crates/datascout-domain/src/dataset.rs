//! Dataset module - canonical registry entries and extracted candidates

use serde::{Deserialize, Serialize};
use std::fmt;

/// Registry-assigned dataset identifier
///
/// Ids are issued sequentially by the registry and never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(u64);

impl DatasetId {
    /// Wrap a raw id value
    ///
    /// # Examples
    ///
    /// ```
    /// use datascout_domain::DatasetId;
    ///
    /// let id = DatasetId::new(6);
    /// assert_eq!(id.value(), 6);
    /// assert_eq!(id.next(), DatasetId::new(7));
    /// ```
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw value
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The id immediately following this one
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for DatasetId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// A canonical dataset known to the registry
///
/// Entries are immutable once stored; the registry only appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
    /// Stable registry id
    pub unique_id: DatasetId,

    /// Dataset name as first registered
    pub dataset_name: String,

    /// Author string as first registered
    #[serde(default)]
    pub authors: String,

    /// DOI or landing-page link
    #[serde(default, alias = "doi")]
    pub doi_or_link: String,
}

impl DatasetEntry {
    /// Build an entry from a candidate and the id it was issued
    pub fn from_candidate(unique_id: DatasetId, candidate: &DatasetCandidate) -> Self {
        Self {
            unique_id,
            dataset_name: candidate.dataset_name.clone(),
            authors: candidate.authors.clone(),
            doi_or_link: candidate.doi_or_link.clone(),
        }
    }

    /// Whether a candidate refers to this entry
    ///
    /// The names must agree case-insensitively, and at least one of the
    /// authors or the DOI/link must agree case-insensitively as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use datascout_domain::{DatasetCandidate, DatasetEntry, DatasetId};
    ///
    /// let entry = DatasetEntry {
    ///     unique_id: DatasetId::new(2),
    ///     dataset_name: "NSL-KDD".to_string(),
    ///     authors: "GhulamMohi-ud-din".to_string(),
    ///     doi_or_link: "https://dx.doi.org/10.21227/425a-3e55".to_string(),
    /// };
    ///
    /// assert!(entry.matches(&DatasetCandidate::new("nsl-kdd", "GhulamMohi-ud-din", "")));
    /// assert!(!entry.matches(&DatasetCandidate::new("nsl-kdd", "someone else", "")));
    /// ```
    pub fn matches(&self, candidate: &DatasetCandidate) -> bool {
        eq_ignore_case(&self.dataset_name, &candidate.dataset_name)
            && (eq_ignore_case(&self.authors, &candidate.authors)
                || eq_ignore_case(&self.doi_or_link, &candidate.doi_or_link))
    }
}

/// A dataset mention extracted from paper text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DatasetCandidate {
    /// Dataset name as written in the paper
    pub dataset_name: String,

    /// Author string, empty when unknown
    #[serde(default)]
    pub authors: String,

    /// DOI or link, empty when unknown
    #[serde(default, alias = "doi")]
    pub doi_or_link: String,
}

impl DatasetCandidate {
    /// Create a candidate from its three reconciliation fields
    pub fn new(
        dataset_name: impl Into<String>,
        authors: impl Into<String>,
        doi_or_link: impl Into<String>,
    ) -> Self {
        Self {
            dataset_name: dataset_name.into(),
            authors: authors.into(),
            doi_or_link: doi_or_link.into(),
        }
    }

    /// A candidate without a name cannot be reconciled
    pub fn is_well_formed(&self) -> bool {
        !self.dataset_name.trim().is_empty()
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
