// src/handlers/availability.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TenantContext,
    models::availability::AvailabilityDecision,
};

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
}

// GET /api/availability/employees/{employee_id}
#[utoipa::path(
    get,
    path = "/api/availability/employees/{employee_id}",
    tag = "Disponibilidade",
    params(
        ("employee_id" = Uuid, Path, description = "ID do funcionário"),
        ("date" = String, Query, description = "Data a resolver (YYYY-MM-DD)"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa")
    ),
    responses(
        (status = 200, description = "Decisão de disponibilidade (e o motivo, se indisponível)", body = AvailabilityDecision),
        (status = 400, description = "Cabeçalho ou parâmetros inválidos")
    )
)]
pub async fn resolve_availability(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(employee_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {

    let decision = app_state
        .availability_service
        .resolve(&app_state.db_pool, tenant.0, employee_id, query.date)
        .await?;

    Ok((StatusCode::OK, Json(decision)))
}
