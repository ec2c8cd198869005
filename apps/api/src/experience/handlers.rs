//! Axum route handlers for the Experience API.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::experience::banding::NarrativeBrief;
use crate::experience::models::{EmploymentRecord, RoleRequirement, ScoringResult, YearMonth};
use crate::experience::ScoringRequest;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreExperienceRequest {
    pub records: Vec<EmploymentRecord>,
    pub requirement: RoleRequirement,
    pub raw_fit_score: u32,
    /// Month treated as "now" for current roles. Defaults to the current UTC month.
    #[serde(default)]
    pub as_of: Option<YearMonth>,
}

#[derive(Debug, Serialize)]
pub struct ScoreExperienceResponse {
    pub result: ScoringResult,
    pub brief: NarrativeBrief,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/experience/score
///
/// Scores parsed employment records against a role requirement and an
/// externally computed raw fit score. Returns the capped score, band, audit
/// trail and the brief for the narrative composer.
pub async fn handle_score_experience(
    State(state): State<AppState>,
    Json(request): Json<ScoreExperienceRequest>,
) -> Result<Json<ScoreExperienceResponse>, AppError> {
    if request.requirement.role_family.trim().is_empty() {
        return Err(AppError::Validation(
            "requirement.role_family cannot be empty".to_string(),
        ));
    }

    let scoring_request = ScoringRequest {
        records: request.records,
        requirement: request.requirement,
        raw_fit_score: request.raw_fit_score,
        as_of: request
            .as_of
            .unwrap_or_else(|| YearMonth::from_date(Utc::now().date_naive())),
    };

    let result = state.engine.score(&scoring_request)?;
    let brief = NarrativeBrief::from_result(&result);

    Ok(Json(ScoreExperienceResponse { result, brief }))
}
