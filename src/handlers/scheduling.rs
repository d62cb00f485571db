// src/handlers/scheduling.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TenantContext,
    models::reconciliation::ConflictInfo,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConflictCheckPayload {
    pub employee_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2025-03-10")]
    pub date: NaiveDate,

    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,

    #[schema(value_type = String, example = "17:00:00")]
    pub end_time: NaiveTime,

    /// Fluxos de edição passam o turno sendo editado para ele não
    /// conflitar consigo mesmo.
    pub exclude_shift_id: Option<Uuid>,
}

// POST /api/scheduling/conflicts
#[utoipa::path(
    post,
    path = "/api/scheduling/conflicts",
    tag = "Escala",
    request_body = ConflictCheckPayload,
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa")
    ),
    responses(
        (status = 200, description = "Turnos sobrepostos do funcionário na data (lista vazia = livre)", body = Vec<ConflictInfo>),
        (status = 400, description = "Cabeçalho ou corpo inválidos")
    )
)]
pub async fn check_conflicts(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<ConflictCheckPayload>,
) -> Result<impl IntoResponse, AppError> {

    let conflicts = app_state
        .scheduling_service
        .find_conflicts(
            &app_state.db_pool,
            tenant.0,
            payload.employee_id,
            payload.date,
            payload.start_time,
            payload.end_time,
            payload.exclude_shift_id,
        )
        .await?;

    Ok((StatusCode::OK, Json(conflicts)))
}
