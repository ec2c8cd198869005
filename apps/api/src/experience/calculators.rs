//! Role year calculators: reduce credibility-assessed records to a single
//! "relevant years" figure for one role family.
//!
//! Every family shares the same algorithm; only the recognized domain tags and
//! the seniority table differ. New families are added by registering another
//! `RoleYearCalculator` with the router.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::experience::models::{
    contains_phrase, title_words, AssessedRecord, Contribution, ContributionStatus,
    RoleRequirement, SeniorityTier, YearMonth,
};

/// Relevant years plus the per-record audit trail that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearsBreakdown {
    pub relevant_years: f64,
    pub contributions: Vec<Contribution>,
}

/// Reduces records + requirement to relevant years for one role family.
pub trait RoleYearCalculator: Send + Sync {
    fn family(&self) -> &str;

    fn calculate_years(
        &self,
        records: &[AssessedRecord<'_>],
        requirement: &RoleRequirement,
        as_of: YearMonth,
    ) -> YearsBreakdown;
}

// ────────────────────────────────────────────────────────────────────────────
// Seniority tables
// ────────────────────────────────────────────────────────────────────────────

/// Title patterns and weights used when a requirement asks for leadership.
#[derive(Debug, Clone, Copy)]
pub struct SeniorityTable {
    pub leadership_titles: &'static [&'static str],
    pub partial_leadership_titles: &'static [&'static str],
    pub leadership_weight: f64,
    pub partial_leadership_weight: f64,
    pub individual_contributor_weight: f64,
}

impl SeniorityTable {
    /// Leadership patterns are checked before partial-leadership ones.
    pub fn classify(&self, title: &str) -> SeniorityTier {
        let words = title_words(title);
        if self
            .leadership_titles
            .iter()
            .any(|p| contains_phrase(&words, p))
        {
            SeniorityTier::Leadership
        } else if self
            .partial_leadership_titles
            .iter()
            .any(|p| contains_phrase(&words, p))
        {
            SeniorityTier::PartialLeadership
        } else {
            SeniorityTier::IndividualContributor
        }
    }

    /// Without a leadership requirement every tier within the family counts fully.
    pub fn weight(&self, tier: SeniorityTier, requires_leadership: bool) -> f64 {
        if !requires_leadership {
            return 1.0;
        }
        match tier {
            SeniorityTier::Leadership => self.leadership_weight,
            SeniorityTier::PartialLeadership => self.partial_leadership_weight,
            SeniorityTier::IndividualContributor => self.individual_contributor_weight,
        }
    }
}

const LEADERSHIP_WEIGHT: f64 = 1.0;
const PARTIAL_LEADERSHIP_WEIGHT: f64 = 0.7;
const INDIVIDUAL_CONTRIBUTOR_WEIGHT: f64 = 0.0;

// ────────────────────────────────────────────────────────────────────────────
// Family calculator
// ────────────────────────────────────────────────────────────────────────────

/// Table-driven calculator for one role family.
#[derive(Debug, Clone, Copy)]
pub struct FamilyCalculator {
    pub family: &'static str,
    pub domain_tags: &'static [&'static str],
    pub seniority: SeniorityTable,
}

pub const RECRUITING: FamilyCalculator = FamilyCalculator {
    family: "recruiting",
    domain_tags: &["recruiting-leadership", "recruiting-ic"],
    seniority: SeniorityTable {
        leadership_titles: &["head of", "director", "vp", "vice president", "chief"],
        partial_leadership_titles: &["senior partner", "lead", "manager", "principal"],
        leadership_weight: LEADERSHIP_WEIGHT,
        partial_leadership_weight: PARTIAL_LEADERSHIP_WEIGHT,
        individual_contributor_weight: INDIVIDUAL_CONTRIBUTOR_WEIGHT,
    },
};

pub const PRODUCT_MANAGEMENT: FamilyCalculator = FamilyCalculator {
    family: "product-management",
    domain_tags: &["product-management"],
    seniority: SeniorityTable {
        leadership_titles: &[
            "director",
            "head of",
            "vp",
            "vice president",
            "chief product",
            "group product manager",
        ],
        partial_leadership_titles: &["senior product manager", "lead", "principal"],
        leadership_weight: LEADERSHIP_WEIGHT,
        partial_leadership_weight: PARTIAL_LEADERSHIP_WEIGHT,
        individual_contributor_weight: INDIVIDUAL_CONTRIBUTOR_WEIGHT,
    },
};

pub const ENGINEERING_LEADERSHIP: FamilyCalculator = FamilyCalculator {
    family: "engineering-leadership",
    domain_tags: &["engineering-leadership", "engineering-ic"],
    seniority: SeniorityTable {
        leadership_titles: &[
            "engineering manager",
            "director",
            "head of",
            "vp",
            "vice president",
            "cto",
        ],
        partial_leadership_titles: &["staff", "principal", "tech lead", "lead"],
        leadership_weight: LEADERSHIP_WEIGHT,
        partial_leadership_weight: PARTIAL_LEADERSHIP_WEIGHT,
        individual_contributor_weight: INDIVIDUAL_CONTRIBUTOR_WEIGHT,
    },
};

pub const SALES: FamilyCalculator = FamilyCalculator {
    family: "sales",
    domain_tags: &["sales-leadership", "sales-ic"],
    seniority: SeniorityTable {
        leadership_titles: &[
            "sales manager",
            "director",
            "head of",
            "vp",
            "vice president",
            "chief revenue",
        ],
        partial_leadership_titles: &["senior account executive", "team lead", "lead"],
        leadership_weight: LEADERSHIP_WEIGHT,
        partial_leadership_weight: PARTIAL_LEADERSHIP_WEIGHT,
        individual_contributor_weight: INDIVIDUAL_CONTRIBUTOR_WEIGHT,
    },
};

impl RoleYearCalculator for FamilyCalculator {
    fn family(&self) -> &str {
        self.family
    }

    fn calculate_years(
        &self,
        records: &[AssessedRecord<'_>],
        requirement: &RoleRequirement,
        as_of: YearMonth,
    ) -> YearsBreakdown {
        let mut contributions = Vec::with_capacity(records.len());
        let mut relevant_years = 0.0_f64;
        let mut matched = 0usize;

        for assessed in records {
            let record = assessed.record;
            let credibility = &assessed.credibility;
            let duration_years = record.duration_years(as_of);

            if !record.has_any_tag(self.domain_tags) {
                contributions.push(Contribution {
                    organization: record.organization.clone(),
                    title: record.title.clone(),
                    duration_years,
                    tier: credibility.tier,
                    credibility_multiplier: credibility.multiplier,
                    seniority: None,
                    seniority_weight: 0.0,
                    contributed_years: 0.0,
                    status: ContributionStatus::DomainMismatch,
                    note: "not counted: domain mismatch".to_string(),
                });
                continue;
            }

            matched += 1;
            let seniority = self.seniority.classify(&record.title);
            let seniority_weight = self
                .seniority
                .weight(seniority, requirement.requires_leadership);
            let contributed_years = duration_years * seniority_weight * credibility.multiplier;
            relevant_years += contributed_years;

            debug!(
                organization = %record.organization,
                role_family = self.family,
                seniority = ?seniority,
                weight = seniority_weight * credibility.multiplier,
                contributed_years,
                "role years contribution"
            );

            contributions.push(Contribution {
                organization: record.organization.clone(),
                title: record.title.clone(),
                duration_years,
                tier: credibility.tier,
                credibility_multiplier: credibility.multiplier,
                seniority: Some(seniority),
                seniority_weight,
                contributed_years,
                status: ContributionStatus::Counted,
                note: format!(
                    "counted at seniority weight {seniority_weight} x credibility {}",
                    credibility.multiplier
                ),
            });
        }

        if matched == 0 {
            relevant_years = 0.0;
        }

        YearsBreakdown {
            relevant_years,
            contributions,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Zero-credit fallback
// ────────────────────────────────────────────────────────────────────────────

/// Used for role families nobody registered. Grants nothing.
#[derive(Debug, Clone)]
pub struct ZeroCreditCalculator {
    family: String,
}

impl ZeroCreditCalculator {
    pub fn new(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
        }
    }
}

impl RoleYearCalculator for ZeroCreditCalculator {
    fn family(&self) -> &str {
        &self.family
    }

    fn calculate_years(
        &self,
        records: &[AssessedRecord<'_>],
        _requirement: &RoleRequirement,
        as_of: YearMonth,
    ) -> YearsBreakdown {
        let contributions = records
            .iter()
            .map(|assessed| Contribution {
                organization: assessed.record.organization.clone(),
                title: assessed.record.title.clone(),
                duration_years: assessed.record.duration_years(as_of),
                tier: assessed.credibility.tier,
                credibility_multiplier: assessed.credibility.multiplier,
                seniority: None,
                seniority_weight: 0.0,
                contributed_years: 0.0,
                status: ContributionStatus::UnsupportedFamily,
                note: format!("not counted: role family '{}' is not modeled", self.family),
            })
            .collect();

        YearsBreakdown {
            relevant_years: 0.0,
            contributions,
        }
    }
}
