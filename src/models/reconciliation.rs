// src/models/reconciliation.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use utoipa::ToSchema;

// =============================================================================
//  CLASSIFICAÇÃO (derivado, nunca persistido)
// =============================================================================

/// Rótulos do classificador; fazem parte do contrato externo do relatório,
/// por isso serializam exatamente como "no_show", "late_arrival" etc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    NoShow,
    LateArrival,
    EarlyDeparture,
    ExtraClock,
    Ok,
}

impl DiscrepancyKind {
    /// Ordem de gravidade do relatório: faltas primeiro, "ok" por último.
    pub fn rank(&self) -> u8 {
        match self {
            DiscrepancyKind::NoShow => 0,
            DiscrepancyKind::LateArrival => 1,
            DiscrepancyKind::EarlyDeparture => 2,
            DiscrepancyKind::ExtraClock => 3,
            DiscrepancyKind::Ok => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscrepancyKind::NoShow => "no_show",
            DiscrepancyKind::LateArrival => "late_arrival",
            DiscrepancyKind::EarlyDeparture => "early_departure",
            DiscrepancyKind::ExtraClock => "extra_clock",
            DiscrepancyKind::Ok => "ok",
        }
    }
}

/// Um item por par (turno, funcionário). `shift_id` nulo agrupa as batidas
/// sem turno vinculado no balde sintético "Sem turno".
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiscrepancyItem {
    pub kind: DiscrepancyKind,

    pub shift_id: Option<Uuid>,

    #[schema(example = "Recepção - Manhã")]
    pub shift_title: String,

    #[schema(value_type = String, format = Date, example = "2025-03-10")]
    pub date: NaiveDate,

    pub employee_id: Uuid,

    #[schema(example = "Maria da Silva")]
    pub employee_name: String,

    #[schema(value_type = Option<String>, example = "2025-03-10T09:07:00")]
    pub clock_in: Option<NaiveDateTime>,

    #[schema(value_type = Option<String>, example = "2025-03-10T17:00:00")]
    pub clock_out: Option<NaiveDateTime>,

    /// Minutos de atraso (late_arrival) ou de saída antecipada (early_departure).
    #[schema(example = 7)]
    pub minutes_diff: Option<i64>,

    #[schema(example = 7.88)]
    pub hours_worked: f64,
}

// =============================================================================
//  COBERTURA (agregação por turno e por período)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    Full,
    Partial,
    Uncovered,
    Over,
}

impl CoverageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageStatus::Full => "full",
            CoverageStatus::Partial => "partial",
            CoverageStatus::Uncovered => "uncovered",
            CoverageStatus::Over => "over",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRef {
    pub id: Uuid,

    #[schema(example = "João Pereira")]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShiftCoverage {
    pub shift_id: Uuid,

    #[schema(example = "Recepção - Manhã")]
    pub title: String,

    #[schema(value_type = String, format = Date, example = "2025-03-10")]
    pub date: NaiveDate,

    #[schema(example = "09:00 - 17:00")]
    pub time_range: String,

    pub client_id: Option<Uuid>,

    #[schema(example = 2)]
    pub slots: i32,

    pub status: CoverageStatus,

    #[schema(example = 2)]
    pub total_assigned: i64,

    #[schema(example = 1)]
    pub total_clocked: i64,

    /// Escalados que nunca bateram ponto neste turno.
    pub missing: Vec<EmployeeRef>,

    /// Bateram ponto no turno sem estar escalados.
    pub extra: Vec<EmployeeRef>,

    /// Duração prevista de um slot, com virada de meia-noite tratada.
    #[schema(example = 8.0)]
    pub scheduled_hours: f64,

    /// Trabalho planejado total: scheduled_hours × slots.
    #[schema(example = 16.0)]
    pub planned_hours: f64,

    /// Soma das horas efetivamente trabalhadas nos itens do turno.
    #[schema(example = 7.5)]
    pub worked_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSummary {
    #[schema(example = 12)]
    pub total_shifts: i64,

    pub full: i64,
    pub partial: i64,
    pub uncovered: i64,
    pub over: i64,

    /// round(Σ clocked / Σ slots × 100), travado em [0, 100].
    #[schema(example = 83)]
    pub overall_percent: i32,

    #[schema(example = 96.0)]
    pub planned_hours: f64,

    #[schema(example = 80.5)]
    pub worked_hours: f64,
}

/// Turno com dados malformados: sai do lote com uma nota de diagnóstico
/// em vez de derrubar o relatório inteiro.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShiftDiagnostic {
    pub shift_id: Uuid,

    pub title: String,

    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,

    #[schema(example = "Capacidade inválida (slots = 0)")]
    pub note: String,
}

// =============================================================================
//  CONFIRMAÇÃO MANUAL (persistido)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "confirmation_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationStatus {
    Present,
    Absent,
}

/// Registro do gestor por escalação. É uma camada de exibição: nunca altera
/// a saída do classificador ("sistema diz no_show, gestor marcou presente"
/// é um estado legítimo do relatório).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceConfirmation {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub shift_id: Uuid,
    pub assignment_id: Uuid,
    pub employee_id: Uuid,

    pub status: ConfirmationStatus,

    #[schema(example = "gestor@empresa.com")]
    pub confirmed_by: String,

    pub confirmed_at: DateTime<Utc>,
}

// =============================================================================
//  RELATÓRIO (entregável dos endpoints de reconciliação)
// =============================================================================

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationReport {
    #[schema(value_type = String, format = Date, example = "2025-03-01")]
    pub from: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2025-03-31")]
    pub to: NaiveDate,

    /// Saída do classificador, já na ordem global do relatório
    /// (gravidade, depois data).
    pub items: Vec<DiscrepancyItem>,

    /// Agregação por turno; inclui turnos vazios (visão "todos os turnos").
    pub coverages: Vec<ShiftCoverage>,

    pub summary: CoverageSummary,

    pub diagnostics: Vec<ShiftDiagnostic>,

    /// Camada manual do gestor, exibida lado a lado com o automático.
    pub confirmations: Vec<AttendanceConfirmation>,
}

// =============================================================================
//  CONFLITOS DE ESCALAÇÃO (checagem no momento de escalar)
// =============================================================================

/// Resultado consultivo: quem decide entre bloquear ou só avisar é a tela.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConflictInfo {
    pub shift_id: Uuid,

    #[schema(example = "Cozinha - Noite")]
    pub title: String,

    #[schema(example = "18:00 - 23:00")]
    pub time_range: String,
}
