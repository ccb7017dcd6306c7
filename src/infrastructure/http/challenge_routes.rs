//! Challenge API routes
//!
//! Endpoints for generating and playing structured skill challenges.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::dto::{
    AdvanceTimeRequestDto, ChallengeSummaryDto, GenerateChallengeRequestDto, ThemeInfoDto,
};
use crate::application::services::{ChallengeService, ChallengeServiceError};
use crate::domain::entities::StructuredSkillChallenge;
use crate::domain::services::{
    CompletionReport, ProgressSnapshot, SkillAttemptInput, SkillAttemptResult, SkillSuggestion,
    SuggestionContext,
};
use crate::domain::value_objects::ChallengeId;
use crate::infrastructure::state::AppState;

type ApiError = (StatusCode, String);

fn parse_challenge_id(id: &str) -> Result<ChallengeId, ApiError> {
    let uuid = Uuid::parse_str(id)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid challenge ID".to_string()))?;
    Ok(ChallengeId::from_uuid(uuid))
}

fn service_error(error: anyhow::Error) -> ApiError {
    let status = match error.downcast_ref::<ChallengeServiceError>() {
        Some(ChallengeServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
        Some(ChallengeServiceError::InvalidRequest(_)) => StatusCode::BAD_REQUEST,
        Some(ChallengeServiceError::Generation(_)) | None => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, error.to_string())
}

/// List the themes the engine can generate
pub async fn list_themes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ThemeInfoDto>>, ApiError> {
    let themes = state
        .challenge_service
        .list_themes()
        .await
        .map_err(service_error)?;
    Ok(Json(themes))
}

/// Generate a new challenge
pub async fn generate_challenge(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateChallengeRequestDto>,
) -> Result<(StatusCode, Json<StructuredSkillChallenge>), ApiError> {
    let challenge = state
        .challenge_service
        .generate_challenge(req)
        .await
        .map_err(service_error)?;
    Ok((StatusCode::CREATED, Json(challenge)))
}

/// List running challenges
pub async fn list_challenges(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ChallengeSummaryDto>>, ApiError> {
    let challenges = state
        .challenge_service
        .list_challenges()
        .await
        .map_err(service_error)?;
    Ok(Json(challenges))
}

/// Get a single challenge with its progression
pub async fn get_challenge(
    State(state): State<Arc<AppState>>,
    Path(challenge_id): Path<String>,
) -> Result<Json<StructuredSkillChallenge>, ApiError> {
    let id = parse_challenge_id(&challenge_id)?;
    let challenge = state
        .challenge_service
        .get_challenge(id)
        .await
        .map_err(service_error)?;
    Ok(Json(challenge))
}

/// End a challenge session
pub async fn delete_challenge(
    State(state): State<Arc<AppState>>,
    Path(challenge_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_challenge_id(&challenge_id)?;
    state
        .challenge_service
        .end_challenge(id)
        .await
        .map_err(service_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Resolve a pre-rolled attempt. Rejections come back as data with 200.
pub async fn submit_attempt(
    State(state): State<Arc<AppState>>,
    Path(challenge_id): Path<String>,
    Json(req): Json<SkillAttemptInput>,
) -> Result<Json<SkillAttemptResult>, ApiError> {
    let id = parse_challenge_id(&challenge_id)?;
    let result = state
        .challenge_service
        .process_attempt(id, req)
        .await
        .map_err(service_error)?;
    Ok(Json(result))
}

pub async fn check_completion(
    State(state): State<Arc<AppState>>,
    Path(challenge_id): Path<String>,
) -> Result<Json<CompletionReport>, ApiError> {
    let id = parse_challenge_id(&challenge_id)?;
    let report = state
        .challenge_service
        .check_completion(id)
        .await
        .map_err(service_error)?;
    Ok(Json(report))
}

pub async fn suggest_skills(
    State(state): State<Arc<AppState>>,
    Path(challenge_id): Path<String>,
    Json(req): Json<SuggestionContext>,
) -> Result<Json<Vec<SkillSuggestion>>, ApiError> {
    let id = parse_challenge_id(&challenge_id)?;
    let suggestions = state
        .challenge_service
        .suggest_skills(id, req)
        .await
        .map_err(service_error)?;
    Ok(Json(suggestions))
}

/// Move the challenge clock forward
pub async fn advance_time(
    State(state): State<Arc<AppState>>,
    Path(challenge_id): Path<String>,
    Json(req): Json<AdvanceTimeRequestDto>,
) -> Result<Json<ProgressSnapshot>, ApiError> {
    let id = parse_challenge_id(&challenge_id)?;
    let snapshot = state
        .challenge_service
        .advance_time(id, req.minutes)
        .await
        .map_err(service_error)?;
    Ok(Json(snapshot))
}
