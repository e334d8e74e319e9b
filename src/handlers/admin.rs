// src/handlers/admin.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{AdminRole, RequireRole},
    models::{
        complaint::{ComplaintFilter, ComplaintListItem, Department},
        officer::OfficerDepartment,
    },
    services::lifecycle::summarize,
};

// =============================================================================
//  ÁREA 1: RECLAMAÇÕES
// =============================================================================

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Default, Deserialize)]
pub struct ComplaintListQuery {
    // "All" ou ausente = sem filtro
    pub department: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub order: SortOrder,
}

impl ComplaintListQuery {
    pub fn to_filter(&self) -> Result<ComplaintFilter, AppError> {
        let department = match self.department.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(d) if d.eq_ignore_ascii_case("All") => None,
            Some(d) => Some(d.parse::<Department>().map_err(|msg| {
                let mut err = ValidationError::new("department");
                err.message = Some(msg.into());
                let mut errors = ValidationErrors::new();
                errors.add("department", err);
                AppError::ValidationError(errors)
            })?),
        };

        Ok(ComplaintFilter {
            department,
            search_text: self.search.clone(),
        })
    }
}

// GET /api/admin/complaints
pub async fn list_complaints(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminRole>,
    Query(query): Query<ComplaintListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.to_filter()?;
    let descending = matches!(query.order, SortOrder::Desc);

    let items: Vec<ComplaintListItem> = app_state
        .complaints
        .read()
        .await
        .list_complaints(&filter, descending)
        .into_iter()
        .map(ComplaintListItem::from)
        .collect();

    Ok((StatusCode::OK, Json(items)))
}

// GET /api/admin/complaints/summary
pub async fn complaints_summary(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminRole>,
    Query(query): Query<ComplaintListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.to_filter()?;
    let visible = app_state.complaints.read().await.list_complaints(&filter, true);

    Ok((StatusCode::OK, Json(summarize(&visible))))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignOfficerPayload {
    #[validate(length(min = 1, message = "O campo 'officerId' é obrigatório."))]
    pub officer_id: String,

    // Campo vazio na tela vira 0: a atribuição segue, sem data estimada
    #[serde(default)]
    pub estimated_days: f64,
}

// PUT /api/admin/complaints/{id}/assignment
pub async fn assign_officer(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminRole>,
    Path(complaint_id): Path<String>,
    Json(payload): Json<AssignOfficerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let complaint = app_state
        .complaints
        .write()
        .await
        .assign_officer(&complaint_id, &payload.officer_id, payload.estimated_days)?;

    Ok((StatusCode::OK, Json(ComplaintListItem::from(complaint))))
}

// DELETE /api/admin/complaints/{id}
pub async fn delete_complaint(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminRole>,
    Path(complaint_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.complaints.write().await.delete_complaint(&complaint_id)?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: OFICIAIS
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfficerPayload {
    pub email: String,
    pub department: OfficerDepartment,
    #[validate(length(min = 1, message = "A senha é obrigatória."))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOfficerPayload {
    pub email: String,
    pub department: OfficerDepartment,
}

// GET /api/admin/officers
pub async fn list_officers(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminRole>,
) -> Result<impl IntoResponse, AppError> {
    let officers = app_state.complaints.read().await.list_officers();
    Ok((StatusCode::OK, Json(officers)))
}

// POST /api/admin/officers
pub async fn create_officer(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminRole>,
    Json(payload): Json<CreateOfficerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let officer = app_state
        .admin_service
        .create_officer(&payload.email, payload.department, &payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(officer)))
}

// PUT /api/admin/officers/{id}
pub async fn edit_officer(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminRole>,
    Path(officer_id): Path<String>,
    Json(payload): Json<EditOfficerPayload>,
) -> Result<impl IntoResponse, AppError> {
    let officer = app_state
        .admin_service
        .edit_officer(&officer_id, &payload.email, payload.department)
        .await?;

    Ok((StatusCode::OK, Json(officer)))
}

// DELETE /api/admin/officers/{id}
pub async fn delete_officer(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminRole>,
    Path(officer_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.admin_service.delete_officer(&officer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
