// Experience & credibility scoring engine.
// Pipeline: records → credibility → domain router → role year calculator
//           → experience gate → recommendation band.
// Pure and synchronous. Shared state is limited to read-only reference data.

pub mod banding;
pub mod calculators;
pub mod credibility;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod reference;
pub mod router;

use tracing::{info, warn};

use crate::errors::ScoringError;
use crate::experience::banding::band;
use crate::experience::credibility::classify;
use crate::experience::gate::{apply_cap, check_required_years, MAX_FIT_SCORE};
use crate::experience::models::{
    AssessedRecord, EmploymentRecord, RoleRequirement, ScoringResult, YearMonth,
};
use crate::experience::reference::ReferenceData;
use crate::experience::router::DomainRouter;

/// Everything one scoring call needs. `as_of` stands in for "now" so that
/// identical requests always produce identical results.
#[derive(Debug, Clone)]
pub struct ScoringRequest {
    pub records: Vec<EmploymentRecord>,
    pub requirement: RoleRequirement,
    pub raw_fit_score: u32,
    pub as_of: YearMonth,
}

/// Reference data plus registered calculators. Built once at startup.
#[derive(Clone)]
pub struct ExperienceEngine {
    reference: ReferenceData,
    router: DomainRouter,
}

impl ExperienceEngine {
    pub fn new(reference: ReferenceData, router: DomainRouter) -> Self {
        Self { reference, router }
    }

    pub fn with_reference(reference: ReferenceData) -> Self {
        Self::new(reference, DomainRouter::with_default_families())
    }

    pub fn router(&self) -> &DomainRouter {
        &self.router
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn score(&self, request: &ScoringRequest) -> Result<ScoringResult, ScoringError> {
        let requirement = &request.requirement;
        check_required_years(requirement.required_years)?;

        let assessed: Vec<AssessedRecord<'_>> = request
            .records
            .iter()
            .map(|record| AssessedRecord {
                record,
                credibility: classify(record, &self.reference),
            })
            .collect();

        let calculator = self.router.select(requirement);
        let breakdown = calculator.calculate_years(&assessed, requirement, request.as_of);

        let raw_fit_score = if request.raw_fit_score > MAX_FIT_SCORE {
            warn!(
                raw_fit_score = request.raw_fit_score,
                "raw fit score above {MAX_FIT_SCORE}, clamping"
            );
            MAX_FIT_SCORE
        } else {
            request.raw_fit_score
        };

        let outcome = apply_cap(
            breakdown.relevant_years,
            requirement.required_years,
            raw_fit_score,
        )?;
        let band = band(outcome.capped_fit_score);

        info!(
            role_family = %requirement.role_family,
            relevant_years = breakdown.relevant_years,
            required_years = requirement.required_years,
            percentage = outcome.percentage,
            raw_fit_score,
            capped_fit_score = outcome.capped_fit_score,
            band = ?band,
            "experience scored"
        );

        Ok(ScoringResult {
            role_family: requirement.role_family.clone(),
            relevant_years: breakdown.relevant_years,
            required_years: requirement.required_years,
            percentage_of_requirement: outcome.percentage,
            raw_fit_score,
            applied_cap: outcome.cap,
            capped_fit_score: outcome.capped_fit_score,
            band,
            audit_trail: breakdown.contributions,
        })
    }
}

impl Default for ExperienceEngine {
    fn default() -> Self {
        Self::with_reference(ReferenceData::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experience::banding::Band;
    use crate::experience::models::{ContributionStatus, CredibilityTier};
    use crate::experience::reference::FundingStage;

    fn as_of() -> YearMonth {
        YearMonth::new(2026, 1).unwrap()
    }

    /// Record that ends at `as_of` after `months` months.
    fn make_record(title: &str, org: &str, months: i32, tags: &[&str]) -> EmploymentRecord {
        let end = as_of();
        let index = end.year() * 12 + end.month() as i32 - 1 - months;
        EmploymentRecord {
            title: title.to_string(),
            organization: org.to_string(),
            start: YearMonth::new(index.div_euclid(12), index.rem_euclid(12) as u32 + 1).unwrap(),
            end: Some(end),
            domain_tags: tags.iter().map(|t| t.to_string()).collect(),
            funding_stage: None,
        }
    }

    fn make_request(
        records: Vec<EmploymentRecord>,
        family: &str,
        years: f64,
        leadership: bool,
        raw: u32,
    ) -> ScoringRequest {
        ScoringRequest {
            records,
            requirement: RoleRequirement {
                role_family: family.to_string(),
                required_years: years,
                requires_leadership: leadership,
            },
            raw_fit_score: raw,
            as_of: as_of(),
        }
    }

    #[test]
    fn test_leadership_director_with_discounted_prior_roles() {
        let records = vec![
            make_record("Director of Recruiting", "Google", 28, &["recruiting-leadership"]),
            make_record("Senior Partner", "Amazon", 32, &["recruiting-leadership"]),
            make_record("Partner", "Microsoft", 60, &["recruiting-ic"]),
        ];
        let result = ExperienceEngine::default()
            .score(&make_request(records, "recruiting-leadership", 7.0, true, 82))
            .unwrap();

        assert!((result.relevant_years - 4.2).abs() < 1e-9);
        assert!((result.percentage_of_requirement - 0.6).abs() < 1e-9);
        assert_eq!(result.applied_cap, 55);
        assert_eq!(result.capped_fit_score, 55);
        assert_eq!(result.band, Band::Consider);
    }

    #[test]
    fn test_pure_pm_match_is_uncapped() {
        let records = vec![make_record(
            "Product Manager",
            "Stripe",
            96,
            &["product-management"],
        )];
        let result = ExperienceEngine::default()
            .score(&make_request(records, "product-management", 5.0, false, 88))
            .unwrap();

        assert!((result.relevant_years - 8.0).abs() < 1e-9);
        assert!((result.percentage_of_requirement - 1.6).abs() < 1e-9);
        assert_eq!(result.applied_cap, 100);
        assert_eq!(result.capped_fit_score, 88);
        assert_eq!(result.band, Band::StrongApply);
    }

    #[test]
    fn test_career_family_mismatch_scores_zero_years() {
        let records = vec![
            make_record("Senior Product Manager", "Google", 60, &["product-management"]),
            make_record("Product Manager", "Meta", 36, &["product-management"]),
        ];
        let result = ExperienceEngine::default()
            .score(&make_request(records, "recruiting", 3.0, false, 90))
            .unwrap();

        assert_eq!(result.relevant_years, 0.0);
        assert_eq!(result.percentage_of_requirement, 0.0);
        assert_eq!(result.applied_cap, 45);
        assert_eq!(result.capped_fit_score, 45);
        assert!(result
            .audit_trail
            .iter()
            .all(|c| c.status == ContributionStatus::DomainMismatch));
    }

    #[test]
    fn test_title_inflation_scores_zero_years() {
        let records = vec![make_record(
            "Operations Product Manager",
            "Google",
            24,
            &["product-management"],
        )];
        let result = ExperienceEngine::default()
            .score(&make_request(records, "product-management", 3.0, false, 70))
            .unwrap();

        assert_eq!(result.relevant_years, 0.0);
        assert_eq!(result.applied_cap, 45);
        assert_eq!(result.capped_fit_score, 45);
        assert_eq!(result.audit_trail[0].tier, CredibilityTier::Zero);
    }

    #[test]
    fn test_mixed_credibility_is_uncapped() {
        let mut series_b = make_record("Product Manager", "Hooli", 24, &["product-management"]);
        series_b.funding_stage = Some(FundingStage::SeriesB);
        let records = vec![
            make_record("Product Manager", "Netflix", 48, &["product-management"]),
            series_b,
            make_record("Product Manager", "Garage Labs", 12, &["product-management"]),
        ];
        let result = ExperienceEngine::default()
            .score(&make_request(records, "product-management", 5.0, false, 77))
            .unwrap();

        assert!((result.relevant_years - 5.7).abs() < 1e-9);
        assert!((result.percentage_of_requirement - 1.14).abs() < 1e-9);
        assert_eq!(result.capped_fit_score, 77);
        assert_eq!(result.band, Band::Apply);
        let tiers: Vec<_> = result.audit_trail.iter().map(|c| c.tier).collect();
        assert_eq!(
            tiers,
            vec![CredibilityTier::High, CredibilityTier::Medium, CredibilityTier::Low]
        );
    }

    fn with_stage(mut record: EmploymentRecord, stage: FundingStage) -> EmploymentRecord {
        record.funding_stage = Some(stage);
        record
    }

    #[test]
    fn test_partial_leadership_at_exactly_seventy_percent() {
        // 36 months at weight 0.7 against 3 years is exactly 70%.
        let records = vec![make_record("Senior Partner", "Google", 36, &["recruiting-leadership"])];
        let result = ExperienceEngine::default()
            .score(&make_request(records, "recruiting", 3.0, true, 90))
            .unwrap();

        assert_eq!(result.percentage_of_requirement, 0.7);
        assert_eq!(result.applied_cap, 70);
        assert_eq!(result.capped_fit_score, 70);
    }

    #[test]
    fn test_partial_leadership_at_exactly_ninety_percent() {
        let records = vec![make_record("Senior Partner", "Google", 162, &["recruiting-leadership"])];
        let result = ExperienceEngine::default()
            .score(&make_request(records, "recruiting", 10.5, true, 90))
            .unwrap();

        assert_eq!(result.percentage_of_requirement, 0.9);
        assert_eq!(result.applied_cap, 100);
        assert_eq!(result.capped_fit_score, 90);
    }

    #[test]
    fn test_medium_credibility_at_exactly_fifty_percent() {
        let records = vec![with_stage(
            make_record("Product Manager", "Hooli", 60, &["product-management"]),
            FundingStage::SeriesA,
        )];
        let result = ExperienceEngine::default()
            .score(&make_request(records, "product-management", 7.0, false, 90))
            .unwrap();

        assert_eq!(result.audit_trail[0].tier, CredibilityTier::Medium);
        assert_eq!(result.percentage_of_requirement, 0.5);
        assert_eq!(result.applied_cap, 55);
    }

    #[test]
    fn test_low_credibility_at_exactly_ninety_percent() {
        // 3 years at 0.3 is 0.8999999999999999 in f64.
        let records = vec![make_record("Sales Manager", "Garage Labs", 36, &["sales-leadership"])];
        let result = ExperienceEngine::default()
            .score(&make_request(records, "sales", 1.0, false, 88))
            .unwrap();

        assert_eq!(result.audit_trail[0].tier, CredibilityTier::Low);
        assert_eq!(result.percentage_of_requirement, 0.9);
        assert_eq!(result.applied_cap, 100);
        assert_eq!(result.capped_fit_score, 88);
    }

    #[test]
    fn test_cap_is_monotonic_across_computed_tenure() {
        for raw in [40, 60, 80, 100] {
            let mut previous = 0;
            for months in 1..=120 {
                let records =
                    vec![make_record("Senior Partner", "Google", months, &["recruiting-leadership"])];
                let capped = ExperienceEngine::default()
                    .score(&make_request(records, "recruiting", 5.0, true, raw))
                    .unwrap()
                    .capped_fit_score;
                assert!(capped >= previous, "raw {raw} dropped at {months} months");
                previous = capped;
            }
        }
    }

    #[test]
    fn test_unknown_family_grants_nothing() {
        let records = vec![make_record("Director", "Google", 120, &["recruiting-leadership"])];
        let result = ExperienceEngine::default()
            .score(&make_request(records, "astronaut", 2.0, false, 95))
            .unwrap();

        assert_eq!(result.relevant_years, 0.0);
        assert_eq!(result.capped_fit_score, 45);
        assert_eq!(result.band, Band::LongShot);
        assert_eq!(
            result.audit_trail[0].status,
            ContributionStatus::UnsupportedFamily
        );
    }

    #[test]
    fn test_invalid_requirement_is_rejected() {
        let records = vec![make_record("Recruiter", "Google", 24, &["recruiting-ic"])];
        let err = ExperienceEngine::default()
            .score(&make_request(records, "recruiting", 0.0, false, 80))
            .unwrap_err();
        assert_eq!(
            err,
            ScoringError::InvalidRequirement {
                required_years: 0.0
            }
        );
    }

    #[test]
    fn test_raw_score_above_100_is_clamped() {
        let records = vec![make_record("Recruiter", "Google", 60, &["recruiting-ic"])];
        let result = ExperienceEngine::default()
            .score(&make_request(records, "recruiting", 3.0, false, 250))
            .unwrap();
        assert_eq!(result.raw_fit_score, 100);
        assert_eq!(result.capped_fit_score, 100);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let records = vec![
            make_record("Head of Talent", "Garage Labs", 30, &["recruiting-leadership"]),
            make_record("Recruiter", "Stripe", 40, &["recruiting-ic"]),
        ];
        let request = make_request(records, "recruiting", 4.0, true, 73);
        let engine = ExperienceEngine::default();

        let first = engine.score(&request).unwrap();
        let second = engine.score(&request).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.relevant_years.to_bits(),
            second.relevant_years.to_bits()
        );
    }

    #[test]
    fn test_empty_records_score_zero_years() {
        let result = ExperienceEngine::default()
            .score(&make_request(vec![], "sales", 2.0, false, 60))
            .unwrap();
        assert_eq!(result.relevant_years, 0.0);
        assert!(result.audit_trail.is_empty());
        assert_eq!(result.capped_fit_score, 45);
    }
}
