// src/handlers/reconciliation.rs

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use uuid::Uuid;
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::tenancy::TenantContext,
    models::reconciliation::{CoverageSummary, ReconciliationReport, ShiftCoverage},
    services::export_service,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,

    /// Quando true, poda itens "ok" e turnos "full" das listas
    /// (o resumo continua cobrindo o período inteiro).
    #[serde(default)]
    pub only_issues: bool,
}

#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverageResponse {
    pub summary: CoverageSummary,
    pub coverages: Vec<ShiftCoverage>,
}

// GET /api/reconciliation/report
#[utoipa::path(
    get,
    path = "/api/reconciliation/report",
    tag = "Reconciliação",
    params(
        ("from" = String, Query, description = "Início do período (YYYY-MM-DD)"),
        ("to" = String, Query, description = "Fim do período (YYYY-MM-DD)"),
        ("onlyIssues" = Option<bool>, Query, description = "Retornar só os desvios"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa")
    ),
    responses(
        (status = 200, description = "Relatório planejado × realizado do período", body = ReconciliationReport),
        (status = 400, description = "Intervalo de datas inválido")
    )
)]
pub async fn get_report(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, AppError> {

    let report = app_state
        .reconciliation_service
        .report(
            &app_state.db_pool,
            tenant.0,
            query.from,
            query.to,
            query.only_issues,
        )
        .await?;

    Ok((StatusCode::OK, Json(report)))
}

// GET /api/reconciliation/coverage
#[utoipa::path(
    get,
    path = "/api/reconciliation/coverage",
    tag = "Reconciliação",
    params(
        ("from" = String, Query, description = "Início do período (YYYY-MM-DD)"),
        ("to" = String, Query, description = "Fim do período (YYYY-MM-DD)"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa")
    ),
    responses(
        (status = 200, description = "Resumo do período e cobertura por turno", body = CoverageResponse),
        (status = 400, description = "Intervalo de datas inválido")
    )
)]
pub async fn get_coverage(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {

    let (summary, coverages) = app_state
        .reconciliation_service
        .coverage(&app_state.db_pool, tenant.0, query.from, query.to)
        .await?;

    Ok((StatusCode::OK, Json(CoverageResponse { summary, coverages })))
}

// GET /api/reconciliation/export
#[utoipa::path(
    get,
    path = "/api/reconciliation/export",
    tag = "Reconciliação",
    params(
        ("from" = String, Query, description = "Início do período (YYYY-MM-DD)"),
        ("to" = String, Query, description = "Fim do período (YYYY-MM-DD)"),
        ("x-tenant-id" = Uuid, Header, description = "ID da Empresa")
    ),
    responses(
        (status = 200, description = "Planilha CSV linha-por-(turno, funcionário)", content_type = "text/csv"),
        (status = 400, description = "Intervalo de datas inválido")
    )
)]
pub async fn export_report(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {

    // A exportação sempre parte do relatório completo, não do filtrado.
    let report = app_state
        .reconciliation_service
        .report(&app_state.db_pool, tenant.0, query.from, query.to, false)
        .await?;

    let csv_bytes = export_service::report_to_csv(&report)?;

    let filename = format!("reconciliacao_{}_{}.csv", query.from, query.to);
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    Ok((StatusCode::OK, headers, csv_bytes))
}
