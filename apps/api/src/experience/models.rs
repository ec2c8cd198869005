#![allow(dead_code)]

//! Employment record model and the value types that flow through the engine.
//!
//! Records arrive already segmented by the résumé parser. Nothing here parses
//! free text beyond splitting a title into words for pattern matching.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::experience::banding::Band;
use crate::experience::reference::FundingStage;

// ────────────────────────────────────────────────────────────────────────────
// Calendar month
// ────────────────────────────────────────────────────────────────────────────

/// A calendar month. Serialized as `YYYY-MM`; `YYYY-MM-DD` is accepted on
/// input and the day is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth(NaiveDate);

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    pub fn from_date(date: NaiveDate) -> Self {
        // Day 1 always exists for a month that `date` already lives in.
        Self(date.with_day(1).unwrap_or(date))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Months elapsed from `self` to `later`. Negative when `later` is earlier.
    pub fn months_until(&self, later: YearMonth) -> i32 {
        (later.year() - self.year()) * 12 + (later.month() as i32 - self.month() as i32)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = if s.len() == 7 {
            NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        } else {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
        };
        parsed
            .map(Self::from_date)
            .map_err(|e| format!("invalid month '{s}' (expected YYYY-MM): {e}"))
    }
}

impl TryFrom<String> for YearMonth {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// One job the candidate held, as produced by the résumé parser.
/// Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentRecord {
    pub title: String,
    pub organization: String,
    pub start: YearMonth,
    /// `None` means the role is current.
    #[serde(default)]
    pub end: Option<YearMonth>,
    /// Role families this job plausibly counts toward. The first tag is the
    /// primary one.
    #[serde(default)]
    pub domain_tags: Vec<String>,
    /// Funding stage, when the parser could tag it.
    #[serde(default)]
    pub funding_stage: Option<FundingStage>,
}

impl EmploymentRecord {
    pub fn primary_tag(&self) -> Option<&str> {
        self.domain_tags.first().map(String::as_str)
    }

    /// Tenure in fractional years up to `end`, or up to `as_of` for a current
    /// role. Never negative.
    pub fn duration_years(&self, as_of: YearMonth) -> f64 {
        let end = self.end.unwrap_or(as_of);
        f64::from(self.start.months_until(end).max(0)) / 12.0
    }

    pub fn has_any_tag(&self, tags: &[&str]) -> bool {
        self.domain_tags
            .iter()
            .any(|t| tags.iter().any(|family| family.eq_ignore_ascii_case(t)))
    }
}

/// The job's stated experience requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRequirement {
    pub role_family: String,
    pub required_years: f64,
    #[serde(default)]
    pub requires_leadership: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Credibility
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredibilityTier {
    High,
    Medium,
    Low,
    /// Reserved for detected title inflation.
    Zero,
}

impl CredibilityTier {
    pub const fn multiplier(self) -> f64 {
        match self {
            CredibilityTier::High => 1.0,
            CredibilityTier::Medium => 0.7,
            CredibilityTier::Low => 0.3,
            CredibilityTier::Zero => 0.0,
        }
    }
}

/// Credibility attached to one employment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredibilityAssessment {
    pub tier: CredibilityTier,
    pub multiplier: f64,
    pub reason: String,
}

impl CredibilityAssessment {
    /// The multiplier always follows from the tier.
    pub fn new(tier: CredibilityTier, reason: impl Into<String>) -> Self {
        Self {
            tier,
            multiplier: tier.multiplier(),
            reason: reason.into(),
        }
    }
}

/// A record paired with its credibility, as handed to a role year calculator.
#[derive(Debug, Clone)]
pub struct AssessedRecord<'a> {
    pub record: &'a EmploymentRecord,
    pub credibility: CredibilityAssessment,
}

// ────────────────────────────────────────────────────────────────────────────
// Audit trail and output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeniorityTier {
    Leadership,
    PartialLeadership,
    IndividualContributor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionStatus {
    Counted,
    DomainMismatch,
    UnsupportedFamily,
}

/// What one record contributed to relevant years, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub organization: String,
    pub title: String,
    pub duration_years: f64,
    pub tier: CredibilityTier,
    pub credibility_multiplier: f64,
    pub seniority: Option<SeniorityTier>,
    pub seniority_weight: f64,
    pub contributed_years: f64,
    pub status: ContributionStatus,
    pub note: String,
}

/// Final output of one scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub role_family: String,
    pub relevant_years: f64,
    pub required_years: f64,
    pub percentage_of_requirement: f64,
    pub raw_fit_score: u32,
    /// Upper bound the gate applied; 100 means no cap.
    pub applied_cap: u32,
    pub capped_fit_score: u32,
    pub band: Band,
    pub audit_trail: Vec<Contribution>,
}

// ────────────────────────────────────────────────────────────────────────────
// Title matching helpers
// ────────────────────────────────────────────────────────────────────────────

/// Lowercased alphanumeric words of a title.
pub(crate) fn title_words(title: &str) -> Vec<String> {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// True when `phrase` appears in `words` as consecutive whole words.
pub(crate) fn contains_phrase(words: &[String], phrase: &str) -> bool {
    let needle: Vec<&str> = phrase.split_whitespace().collect();
    if needle.is_empty() || needle.len() > words.len() {
        return false;
    }
    words
        .windows(needle.len())
        .any(|window| window.iter().zip(&needle).all(|(w, n)| w == n))
}
