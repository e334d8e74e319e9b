// src/handlers/officer.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::complaint::ComplaintListItem,
    services::lifecycle::summarize,
};

#[derive(Debug, Default, Deserialize)]
pub struct OfficerListQuery {
    pub search: Option<String>,
}

// GET /api/officer/complaints
// O oficial é o `sub` do token
pub async fn list_assigned(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Query(query): Query<OfficerListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let items: Vec<ComplaintListItem> = app_state
        .complaints
        .read()
        .await
        .complaints_assigned_to(&identity.user_id, query.search.as_deref())
        .into_iter()
        .map(ComplaintListItem::from)
        .collect();

    Ok((StatusCode::OK, Json(items)))
}

// GET /api/officer/complaints/summary
pub async fn assigned_summary(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Query(query): Query<OfficerListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let visible = app_state
        .complaints
        .read()
        .await
        .complaints_assigned_to(&identity.user_id, query.search.as_deref());

    Ok((StatusCode::OK, Json(summarize(&visible))))
}

// POST /api/officer/complaints/sync
pub async fn sync_assigned(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let items: Vec<ComplaintListItem> = app_state
        .officer_service
        .sync_assigned(&identity.user_id)
        .await?
        .into_iter()
        .map(ComplaintListItem::from)
        .collect();

    Ok((StatusCode::OK, Json(items)))
}

// GET /api/officer/complaints/{id}
pub async fn view_complaint(
    State(app_state): State<AppState>,
    AuthenticatedUser(_identity): AuthenticatedUser,
    Path(complaint_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let complaint = app_state.officer_service.view(&complaint_id).await?;
    Ok((StatusCode::OK, Json(ComplaintListItem::from(complaint))))
}

// POST /api/officer/complaints/{id}/advance
pub async fn advance_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(complaint_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let complaint = app_state.officer_service.advance_remote(&complaint_id).await?;
    tracing::debug!("Status de {} avançado por {}", complaint_id, identity.user_id);

    Ok((StatusCode::OK, Json(ComplaintListItem::from(complaint))))
}
