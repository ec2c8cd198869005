//! Credibility classifier: assigns each employment record a tier and
//! multiplier from organization signals and title-inflation heuristics.
//!
//! Rules, first match wins:
//! 1. Title inflation (adjacent-function qualifier on a core title) → ZERO
//! 2. Curated well-known employer → HIGH
//! 3. Funding stage: Series A/B → MEDIUM, Series C+/public → HIGH
//! 4. Anything else → LOW
//!
//! Classification never fails. An unknown organization is LOW because the
//! gate only ever caps downward.

use tracing::{debug, info};

use crate::experience::models::{
    contains_phrase, title_words, CredibilityAssessment, CredibilityTier, EmploymentRecord,
};
use crate::experience::reference::{FundingStage, ReferenceData};

/// Qualifiers that mark a title as adjacent to, not part of, the core function.
const ADJACENT_QUALIFIERS: &[&str] = &["operations", "ops", "support", "enablement"];

/// Core functional titles for a primary domain tag.
fn core_titles(primary_tag: &str) -> &'static [&'static str] {
    match primary_tag {
        "product-management" => &["product manager", "product owner", "product lead"],
        "recruiting-leadership" | "recruiting-ic" => &[
            "recruiter",
            "recruiting",
            "talent acquisition",
            "talent partner",
        ],
        "engineering-leadership" | "engineering-ic" => &["engineer", "engineering", "developer"],
        "sales-leadership" | "sales-ic" => &["account executive", "sales"],
        _ => &[],
    }
}

/// Returns the qualifier that inflates the title, if any.
fn detect_title_inflation(record: &EmploymentRecord) -> Option<&'static str> {
    let primary = record.primary_tag()?.to_ascii_lowercase();
    let words = title_words(&record.title);

    let has_core_title = core_titles(&primary)
        .iter()
        .any(|core| contains_phrase(&words, core));
    if !has_core_title {
        return None;
    }

    ADJACENT_QUALIFIERS
        .iter()
        .copied()
        .find(|q| words.iter().any(|w| w == q))
}

/// Classifies one record against the shared reference data.
pub fn classify(record: &EmploymentRecord, reference: &ReferenceData) -> CredibilityAssessment {
    let assessment = assess(record, reference);

    match assessment.tier {
        CredibilityTier::Zero => info!(
            organization = %record.organization,
            title = %record.title,
            tier = ?assessment.tier,
            multiplier = assessment.multiplier,
            reason = %assessment.reason,
            "title inflation detected"
        ),
        _ => debug!(
            organization = %record.organization,
            title = %record.title,
            tier = ?assessment.tier,
            multiplier = assessment.multiplier,
            reason = %assessment.reason,
            "credibility assessed"
        ),
    }

    assessment
}

fn assess(record: &EmploymentRecord, reference: &ReferenceData) -> CredibilityAssessment {
    if let Some(qualifier) = detect_title_inflation(record) {
        return CredibilityAssessment::new(
            CredibilityTier::Zero,
            format!(
                "title inflation: '{}' carries adjacent-function qualifier '{qualifier}'",
                record.title
            ),
        );
    }

    if reference.is_well_known(&record.organization) {
        return CredibilityAssessment::new(CredibilityTier::High, "well-known employer");
    }

    let stage = record
        .funding_stage
        .or_else(|| reference.funding_stage(&record.organization));

    match stage {
        Some(FundingStage::SeriesA | FundingStage::SeriesB) => {
            CredibilityAssessment::new(CredibilityTier::Medium, "series A/B stage organization")
        }
        Some(FundingStage::SeriesCPlus | FundingStage::Public) => CredibilityAssessment::new(
            CredibilityTier::High,
            "late-stage or public organization",
        ),
        Some(FundingStage::PreSeed | FundingStage::Seed) => {
            CredibilityAssessment::new(CredibilityTier::Low, "very early-stage organization")
        }
        None => {
            info!(
                organization = %record.organization,
                "unrecognized organization, defaulting to LOW credibility"
            );
            CredibilityAssessment::new(CredibilityTier::Low, "unrecognized organization")
        }
    }
}
