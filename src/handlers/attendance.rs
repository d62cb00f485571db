// src/handlers/attendance.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;
use uuid::Uuid;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TenantContext,
    models::reconciliation::{AttendanceConfirmation, ConfirmationStatus},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPayload {
    pub assignment_id: Uuid,

    pub status: ConfirmationStatus,

    #[validate(length(min = 1, message = "Informe quem está confirmando"))]
    #[schema(example = "gestor@empresa.com")]
    pub confirmed_by: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmAllPayload {
    #[validate(length(min = 1, message = "Informe quem está confirmando"))]
    #[schema(example = "gestor@empresa.com")]
    pub confirmed_by: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmAllResponse {
    /// Quantas escalações ainda sem confirmação foram marcadas.
    #[schema(example = 3)]
    pub confirmed: u64,
}

// POST /api/attendance/confirmations
#[utoipa::path(
    post,
    path = "/api/attendance/confirmations",
    tag = "Presença",
    request_body = ConfirmPayload,
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa")
    ),
    responses(
        (status = 200, description = "Confirmação gravada (upsert: reconfirmação regrava)", body = AttendanceConfirmation),
        (status = 404, description = "Escalação não encontrada"),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn confirm_attendance(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<ConfirmPayload>,
) -> Result<impl IntoResponse, AppError> {

    payload.validate()?;

    let confirmation = app_state
        .confirmation_service
        .confirm(
            &app_state.db_pool,
            tenant.0,
            payload.assignment_id,
            payload.status,
            &payload.confirmed_by,
        )
        .await?;

    Ok((StatusCode::OK, Json(confirmation)))
}

// POST /api/attendance/shifts/{shift_id}/confirm-all
#[utoipa::path(
    post,
    path = "/api/attendance/shifts/{shift_id}/confirm-all",
    tag = "Presença",
    request_body = ConfirmAllPayload,
    params(
        ("shift_id" = Uuid, Path, description = "ID do turno"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa")
    ),
    responses(
        (status = 200, description = "Escalações pendentes marcadas como presentes", body = ConfirmAllResponse),
        (status = 404, description = "Turno não encontrado"),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn confirm_all(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(shift_id): Path<Uuid>,
    Json(payload): Json<ConfirmAllPayload>,
) -> Result<impl IntoResponse, AppError> {

    payload.validate()?;

    let confirmed = app_state
        .confirmation_service
        .confirm_all(&app_state.db_pool, tenant.0, shift_id, &payload.confirmed_by)
        .await?;

    Ok((StatusCode::OK, Json(ConfirmAllResponse { confirmed })))
}

// GET /api/attendance/shifts/{shift_id}/confirmations
#[utoipa::path(
    get,
    path = "/api/attendance/shifts/{shift_id}/confirmations",
    tag = "Presença",
    params(
        ("shift_id" = Uuid, Path, description = "ID do turno"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa")
    ),
    responses(
        (status = 200, description = "Confirmações manuais do turno", body = Vec<AttendanceConfirmation>)
    )
)]
pub async fn list_confirmations(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(shift_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {

    let confirmations = app_state
        .confirmation_service
        .list_for_shift(&app_state.db_pool, tenant.0, shift_id)
        .await?;

    Ok((StatusCode::OK, Json(confirmations)))
}
