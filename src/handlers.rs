use crate::engine::{self, AttendanceState};
use crate::errors::AppError;
use crate::models::{AttendanceView, DecisionRequest, DecisionResponse, Subject};
use crate::state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use tracing::info;

pub async fn list_subjects(State(state): State<AppState>) -> Json<Vec<Subject>> {
    Json(state.catalog.as_ref().clone())
}

/// Session start: loads the user's history and installs the derived maps,
/// replacing any previous session for that user.
pub async fn start_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AttendanceView>, AppError> {
    let user = require_user(&headers)?;

    let attendance = engine::load_attendance(state.store.as_ref(), &state.catalog, &user).await?;
    let view = to_view(&attendance);

    let mut sessions = state.sessions.lock().await;
    sessions.insert(user.clone(), attendance);
    info!("session started for {user}");

    Ok(Json(view))
}

pub async fn end_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    let user = require_user(&headers)?;

    let mut sessions = state.sessions.lock().await;
    sessions.remove(&user);
    info!("session ended for {user}");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_attendance(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AttendanceView>, AppError> {
    let user = require_user(&headers)?;

    let sessions = state.sessions.lock().await;
    let attendance = sessions.get(&user).ok_or_else(no_session)?;
    Ok(Json(to_view(attendance)))
}

pub async fn record_decision(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<DecisionRequest>,
) -> Result<Json<DecisionResponse>, AppError> {
    let user = require_user(&headers)?;
    if !state.catalog.iter().any(|subject| subject.id == payload.subject) {
        return Err(AppError::bad_request(format!(
            "unknown subject '{}'",
            payload.subject
        )));
    }

    let mut sessions = state.sessions.lock().await;
    let attendance = sessions.get_mut(&user).ok_or_else(no_session)?;

    let outcome = engine::record_decision(
        state.store.as_ref(),
        attendance,
        &user,
        &payload.subject,
        payload.status,
    )
    .await?;

    let stats = attendance
        .stats
        .get(&payload.subject)
        .cloned()
        .unwrap_or_default();

    Ok(Json(DecisionResponse {
        subject: payload.subject,
        status: payload.status,
        outcome,
        stats,
    }))
}

fn require_user(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get("x-user-email")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::unauthorized("missing x-user-email header"))
}

fn no_session() -> AppError {
    AppError::conflict("no active session; start one with POST /api/session")
}

fn to_view(attendance: &AttendanceState) -> AttendanceView {
    AttendanceView {
        statuses: attendance.statuses.clone(),
        stats: attendance.stats.clone(),
    }
}
