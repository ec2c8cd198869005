//! Organization reference data: the curated well-known employer list and the
//! organization → funding-stage lookup.
//!
//! Built once at startup and shared read-only. Requests never mutate it.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Funding stage of an organization, as tagged by the parser or a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingStage {
    PreSeed,
    Seed,
    SeriesA,
    SeriesB,
    SeriesCPlus,
    Public,
}

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("could not read reference data at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid reference data at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Large, well-known, or well-funded employers. Matched after normalization.
const WELL_KNOWN_EMPLOYERS: &[&str] = &[
    "Accenture",
    "Adobe",
    "Airbnb",
    "Alphabet",
    "Amazon",
    "Apple",
    "Atlassian",
    "Bain & Company",
    "Boston Consulting Group",
    "Cisco",
    "Deloitte",
    "Dropbox",
    "Ernst & Young",
    "Facebook",
    "Goldman Sachs",
    "Google",
    "IBM",
    "Intel",
    "JPMorgan Chase",
    "KPMG",
    "LinkedIn",
    "McKinsey & Company",
    "Meta",
    "Microsoft",
    "Netflix",
    "Nvidia",
    "Oracle",
    "PwC",
    "Salesforce",
    "SAP",
    "Shopify",
    "Spotify",
    "Stripe",
    "Uber",
    "Workday",
];

/// Trailing tokens stripped from organization names before comparison.
const LEGAL_SUFFIXES: &[&str] = &[
    "inc",
    "incorporated",
    "llc",
    "ltd",
    "limited",
    "corp",
    "corporation",
    "co",
    "company",
    "plc",
    "gmbh",
    "ag",
    "sa",
    "bv",
    "pty",
];

/// Lowercases, turns punctuation into spaces, drops trailing legal-entity
/// suffixes and collapses whitespace. `"Stripe, Inc."` → `"stripe"`.
pub fn normalize_organization(name: &str) -> String {
    let lowered: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let mut words: Vec<&str> = lowered.split_whitespace().collect();
    while words.len() > 1 && words.last().is_some_and(|w| LEGAL_SUFFIXES.contains(w)) {
        words.pop();
    }
    words.join(" ")
}

/// On-disk shape of `REFERENCE_DATA_PATH`.
#[derive(Debug, Default, Deserialize)]
struct ReferenceDataFile {
    #[serde(default)]
    well_known_employers: Vec<String>,
    #[serde(default)]
    funding_stages: HashMap<String, FundingStage>,
}

#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    well_known: HashSet<String>,
    funding_stages: HashMap<String, FundingStage>,
}

impl ReferenceData {
    pub fn new<E, S>(employers: E, funding_stages: S) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        S: IntoIterator<Item = (String, FundingStage)>,
    {
        Self {
            well_known: employers
                .into_iter()
                .map(|e| normalize_organization(e.as_ref()))
                .filter(|e| !e.is_empty())
                .collect(),
            funding_stages: funding_stages
                .into_iter()
                .map(|(org, stage)| (normalize_organization(&org), stage))
                .collect(),
        }
    }

    /// The curated list compiled into the binary, with no funding lookup.
    pub fn builtin() -> Self {
        Self::new(WELL_KNOWN_EMPLOYERS.iter(), std::iter::empty())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let file: ReferenceDataFile = serde_json::from_str(json)?;
        Ok(Self::new(file.well_known_employers, file.funding_stages))
    }

    /// Reads a JSON reference file. Replaces the built-in list entirely.
    pub fn load(path: &Path) -> Result<Self, ReferenceDataError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ReferenceDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| ReferenceDataError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn is_well_known(&self, organization: &str) -> bool {
        self.well_known
            .contains(&normalize_organization(organization))
    }

    pub fn funding_stage(&self, organization: &str) -> Option<FundingStage> {
        self.funding_stages
            .get(&normalize_organization(organization))
            .copied()
    }

    pub fn employer_count(&self) -> usize {
        self.well_known.len()
    }
}
