//! Recommendation banding: maps the capped fit score to one of five ordered
//! bands and picks the guidance template the narrative composer phrases.
//!
//! The engine never writes the sentence. It hands the composer a
//! `NarrativeBrief` and the composer must not recompute years or bands.

use serde::{Deserialize, Serialize};

use crate::experience::models::{Contribution, ContributionStatus, ScoringResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Band {
    DoNotApply,
    LongShot,
    Consider,
    Apply,
    StrongApply,
}

impl Band {
    /// Lowest to highest.
    #[cfg_attr(not(test), allow(dead_code))]
    pub const ALL: [Band; 5] = [
        Band::DoNotApply,
        Band::LongShot,
        Band::Consider,
        Band::Apply,
        Band::StrongApply,
    ];

    /// Total over every score; anything above 100 is STRONG_APPLY.
    pub fn from_score(capped_fit_score: u32) -> Self {
        match capped_fit_score {
            85.. => Band::StrongApply,
            70..=84 => Band::Apply,
            50..=69 => Band::Consider,
            25..=49 => Band::LongShot,
            _ => Band::DoNotApply,
        }
    }

    pub fn guidance(self) -> GuidanceTemplate {
        match self {
            Band::StrongApply => GuidanceTemplate {
                template_id: "strong_apply_confident",
                tone: GuidanceTone::Confident,
                intent: "Apply immediately.",
            },
            Band::Apply => GuidanceTemplate {
                template_id: "apply_prepare_first",
                tone: GuidanceTone::Encouraging,
                intent: "Prepare first, then apply quickly.",
            },
            Band::Consider => GuidanceTemplate {
                template_id: "consider_disclose_gaps",
                tone: GuidanceTone::Candid,
                intent: "Disclose the experience gap honestly and list concrete prep steps.",
            },
            Band::LongShot => GuidanceTemplate {
                template_id: "long_shot_redirect",
                tone: GuidanceTone::Redirecting,
                intent: "Redirect toward a better-fitting target role.",
            },
            Band::DoNotApply => GuidanceTemplate {
                template_id: "do_not_apply_redirect",
                tone: GuidanceTone::Direct,
                intent: "Refuse directly and redirect to roles the experience supports.",
            },
        }
    }
}

pub fn band(capped_fit_score: u32) -> Band {
    Band::from_score(capped_fit_score)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceTone {
    Confident,
    Encouraging,
    Candid,
    Redirecting,
    Direct,
}

/// Template selector handed to the narrative composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GuidanceTemplate {
    pub template_id: &'static str,
    pub tone: GuidanceTone,
    pub intent: &'static str,
}

/// Structured input for the external narrative composer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrativeBrief {
    pub relevant_years: f64,
    pub required_years: f64,
    pub percentage_of_requirement: f64,
    pub band: Band,
    pub guidance: GuidanceTemplate,
    /// Largest positive contribution, for "your N years at X" phrasing.
    pub strongest_contribution: Option<Contribution>,
    /// Smallest contribution among domain-matched records.
    pub weakest_contribution: Option<Contribution>,
}

impl NarrativeBrief {
    pub fn from_result(result: &ScoringResult) -> Self {
        let counted = || {
            result
                .audit_trail
                .iter()
                .filter(|c| c.status == ContributionStatus::Counted)
        };

        // Ties keep the earliest record so the brief is stable.
        let strongest = counted()
            .filter(|c| c.contributed_years > 0.0)
            .fold(None::<&Contribution>, |best, c| match best {
                Some(b) if b.contributed_years >= c.contributed_years => Some(b),
                _ => Some(c),
            });

        let weakest = counted()
            .fold(None::<&Contribution>, |worst, c| match worst {
                Some(w) if w.contributed_years <= c.contributed_years => Some(w),
                _ => Some(c),
            })
            .or_else(|| result.audit_trail.first());

        Self {
            relevant_years: result.relevant_years,
            required_years: result.required_years,
            percentage_of_requirement: result.percentage_of_requirement,
            band: result.band,
            guidance: result.band.guidance(),
            strongest_contribution: strongest.cloned(),
            weakest_contribution: weakest.cloned(),
        }
    }
}
