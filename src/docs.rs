// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Disponibilidade ---
        handlers::availability::resolve_availability,

        // --- Escala ---
        handlers::scheduling::check_conflicts,

        // --- Reconciliação ---
        handlers::reconciliation::get_report,
        handlers::reconciliation::get_coverage,
        handlers::reconciliation::export_report,

        // --- Presença ---
        handlers::attendance::confirm_attendance,
        handlers::attendance::confirm_all,
        handlers::attendance::list_confirmations,
    ),
    components(
        schemas(
            // --- Escala ---
            models::scheduling::PayType,
            models::scheduling::ShiftStatus,
            models::scheduling::AssignmentStatus,
            models::scheduling::Shift,
            models::scheduling::Assignment,
            models::scheduling::Employee,

            // --- Ponto ---
            models::timesheet::TimeEntryStatus,
            models::timesheet::TimeEntry,

            // --- Disponibilidade ---
            models::availability::AvailabilityConfig,
            models::availability::AvailabilityOverride,
            models::availability::AvailabilityDecision,

            // --- Reconciliação ---
            models::reconciliation::DiscrepancyKind,
            models::reconciliation::DiscrepancyItem,
            models::reconciliation::CoverageStatus,
            models::reconciliation::EmployeeRef,
            models::reconciliation::ShiftCoverage,
            models::reconciliation::CoverageSummary,
            models::reconciliation::ShiftDiagnostic,
            models::reconciliation::ReconciliationReport,
            models::reconciliation::ConfirmationStatus,
            models::reconciliation::AttendanceConfirmation,
            models::reconciliation::ConflictInfo,

            // --- Payloads ---
            handlers::scheduling::ConflictCheckPayload,
            handlers::reconciliation::CoverageResponse,
            handlers::attendance::ConfirmPayload,
            handlers::attendance::ConfirmAllPayload,
            handlers::attendance::ConfirmAllResponse,
        )
    ),
    tags(
        (name = "Disponibilidade", description = "Resolução de disponibilidade no momento de escalar"),
        (name = "Escala", description = "Detecção de conflitos de janela entre turnos"),
        (name = "Reconciliação", description = "Relatório planejado × realizado e exportação"),
        (name = "Presença", description = "Confirmação manual de presença pelo gestor")
    )
)]
pub struct ApiDoc;
