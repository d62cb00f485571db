// src/services/reconciliation_service.rs
//
// O coração do serviço: compara o planejado (turnos + escalações) com o
// realizado (batidas de ponto) e produz o relatório classificado/agregado.
// O cálculo inteiro é puro sobre um snapshot em memória; o banco só aparece
// na orquestração do ReconciliationService.

use std::collections::{BTreeSet, HashMap};

use sqlx::{Postgres, Executor, Acquire};
use uuid::Uuid;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    common::error::AppError,
    db::{ConfirmationRepository, SchedulingRepository, TimesheetRepository},
    models::reconciliation::{
        CoverageStatus, CoverageSummary, DiscrepancyItem, DiscrepancyKind, EmployeeRef,
        ReconciliationReport, ShiftCoverage, ShiftDiagnostic,
    },
    models::scheduling::{Assignment, Employee, PayType, Shift},
    models::timesheet::{TimeEntry, TimeEntryStatus},
};

/// Tolerância em minutos antes de marcar atraso ou saída antecipada.
/// Exatamente 5 minutos ainda passa; 6 já é desvio.
pub const LATE_THRESHOLD_MINUTES: i64 = 5;

/// Rótulo do balde sintético das batidas sem turno vinculado.
pub const UNPLANNED_BUCKET: &str = "Sem turno";

// =============================================================================
//  SNAPSHOT E RESULTADO
// =============================================================================

/// Tudo que o motor lê, já buscado. Reexecutar `reconcile` sobre o mesmo
/// snapshot produz exatamente a mesma saída, na mesma ordem.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationSnapshot {
    pub shifts: Vec<Shift>,
    pub assignments: Vec<Assignment>,
    /// Batidas vinculadas aos turnos do snapshot.
    pub entries: Vec<TimeEntry>,
    /// Batidas sem turno vinculado no intervalo do relatório.
    pub unplanned: Vec<TimeEntry>,
    pub employees: Vec<Employee>,
}

#[derive(Debug, Clone)]
pub struct ReconciliationOutcome {
    pub items: Vec<DiscrepancyItem>,
    pub coverages: Vec<ShiftCoverage>,
    pub summary: CoverageSummary,
    pub diagnostics: Vec<ShiftDiagnostic>,
}

// =============================================================================
//  NÚCLEO PURO
// =============================================================================

/// Classifica e agrega o snapshot inteiro.
pub fn reconcile(snapshot: &ReconciliationSnapshot) -> ReconciliationOutcome {
    let names: HashMap<Uuid, String> = snapshot
        .employees
        .iter()
        .map(|e| (e.id, e.full_name()))
        .collect();

    // Agrupamento por turno. Os filtros de status são reaplicados aqui para
    // o núcleo não depender do que o repositório já descartou.
    let mut assignments_by_shift: HashMap<Uuid, Vec<&Assignment>> = HashMap::new();
    for a in snapshot.assignments.iter().filter(|a| a.status.is_counted()) {
        assignments_by_shift.entry(a.shift_id).or_default().push(a);
    }

    let mut entries_by_shift: HashMap<Uuid, Vec<&TimeEntry>> = HashMap::new();
    for e in snapshot
        .entries
        .iter()
        .filter(|e| e.status != TimeEntryStatus::Rejected)
    {
        if let Some(shift_id) = e.shift_id {
            entries_by_shift.entry(shift_id).or_default().push(e);
        }
    }

    let mut items = Vec::new();
    let mut coverages = Vec::new();
    let mut diagnostics = Vec::new();

    for shift in &snapshot.shifts {
        // Linha malformada no banco (invariante slots >= 1 violada): o turno
        // sai do lote com uma nota, sem derrubar o resto do relatório.
        if shift.slots < 1 {
            diagnostics.push(ShiftDiagnostic {
                shift_id: shift.id,
                title: shift.title.clone(),
                date: shift.date,
                note: format!("Capacidade inválida (slots = {})", shift.slots),
            });
            continue;
        }

        let assignments = assignments_by_shift
            .get(&shift.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        let entries = entries_by_shift
            .get(&shift.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let (mut shift_items, coverage) = classify_shift(shift, assignments, entries, &names);
        items.append(&mut shift_items);
        coverages.push(coverage);
    }

    // Batidas sem turno: cada uma vira um extra_clock no balde "Sem turno",
    // fora da cobertura de qualquer turno.
    for entry in snapshot
        .unplanned
        .iter()
        .filter(|e| e.shift_id.is_none() && e.status != TimeEntryStatus::Rejected)
    {
        items.push(unplanned_item(entry, &names));
    }

    sort_items(&mut items);
    let summary = summarize(&coverages);

    ReconciliationOutcome {
        items,
        coverages,
        summary,
        diagnostics,
    }
}

/// Classifica um turno: um item por funcionário escalado (no_show / atraso /
/// saída antecipada / ok) mais um extra_clock por quem bateu ponto sem estar
/// escalado, e a cobertura do turno.
fn classify_shift(
    shift: &Shift,
    assignments: &[&Assignment],
    entries: &[&TimeEntry],
    names: &HashMap<Uuid, String>,
) -> (Vec<DiscrepancyItem>, ShiftCoverage) {
    let assigned: BTreeSet<Uuid> = assignments.iter().map(|a| a.employee_id).collect();
    let clocked: BTreeSet<Uuid> = entries.iter().map(|e| e.employee_id).collect();

    let mut items = Vec::new();

    for &employee_id in &assigned {
        match pick_entry(entries, employee_id) {
            // Escalado que nunca bateu ponto neste turno.
            None => items.push(DiscrepancyItem {
                kind: DiscrepancyKind::NoShow,
                shift_id: Some(shift.id),
                shift_title: shift.title.clone(),
                date: shift.date,
                employee_id,
                employee_name: employee_name(names, employee_id),
                clock_in: None,
                clock_out: None,
                minutes_diff: None,
                hours_worked: 0.0,
            }),
            Some(entry) => items.push(classify_clocked(shift, entry, names)),
        }
    }

    for &employee_id in clocked.difference(&assigned) {
        if let Some(entry) = pick_entry(entries, employee_id) {
            items.push(DiscrepancyItem {
                kind: DiscrepancyKind::ExtraClock,
                shift_id: Some(shift.id),
                shift_title: shift.title.clone(),
                date: shift.date,
                employee_id,
                employee_name: employee_name(names, employee_id),
                clock_in: Some(entry.clock_in),
                clock_out: entry.clock_out,
                minutes_diff: None,
                hours_worked: entry.worked_hours(),
            });
        }
    }

    let missing: Vec<EmployeeRef> = assigned
        .difference(&clocked)
        .map(|&id| EmployeeRef { id, name: employee_name(names, id) })
        .collect();
    let extra: Vec<EmployeeRef> = clocked
        .difference(&assigned)
        .map(|&id| EmployeeRef { id, name: employee_name(names, id) })
        .collect();

    let total_assigned = assigned.len() as i64;
    let total_clocked = clocked.len() as i64;

    // Precedência fixa: descoberto > parcial > excedente > completo.
    let status = if total_assigned > 0 && total_clocked == 0 {
        CoverageStatus::Uncovered
    } else if !missing.is_empty() {
        CoverageStatus::Partial
    } else if !extra.is_empty() {
        CoverageStatus::Over
    } else {
        CoverageStatus::Full
    };

    let per_slot_hours = scheduled_hours(shift.start_time, shift.end_time);
    let worked_hours = items.iter().map(|i| i.hours_worked).sum();

    let coverage = ShiftCoverage {
        shift_id: shift.id,
        title: shift.title.clone(),
        date: shift.date,
        time_range: shift.time_range(),
        client_id: shift.client_id,
        slots: shift.slots,
        status,
        total_assigned,
        total_clocked,
        missing,
        extra,
        scheduled_hours: per_slot_hours,
        // O fator × slots só entra na estimativa de trabalho planejado,
        // nunca nas horas individuais.
        planned_hours: per_slot_hours * f64::from(shift.slots),
        worked_hours,
    };

    (items, coverage)
}

/// Classifica um escalado que bateu ponto. Turnos de diária fechada não são
/// policiados por horário; nos horistas, atraso é checado antes da saída
/// antecipada e ambos usam a tolerância estrita (> limiar).
fn classify_clocked(
    shift: &Shift,
    entry: &TimeEntry,
    names: &HashMap<Uuid, String>,
) -> DiscrepancyItem {
    let hours_worked = entry.worked_hours();

    let (kind, minutes_diff) = if shift.pay_type == PayType::Daily {
        (DiscrepancyKind::Ok, None)
    } else {
        let scheduled_start = shift.date.and_time(shift.start_time);
        let late_minutes = (entry.clock_in - scheduled_start).num_minutes();

        if late_minutes > LATE_THRESHOLD_MINUTES {
            (DiscrepancyKind::LateArrival, Some(late_minutes))
        } else if let Some(clock_out) = entry.clock_out {
            let early_minutes = (scheduled_end(shift) - clock_out).num_minutes();
            if early_minutes > LATE_THRESHOLD_MINUTES {
                (DiscrepancyKind::EarlyDeparture, Some(early_minutes))
            } else {
                (DiscrepancyKind::Ok, None)
            }
        } else {
            // Registro ainda em aberto e sem atraso: nada a apontar.
            (DiscrepancyKind::Ok, None)
        }
    };

    DiscrepancyItem {
        kind,
        shift_id: Some(shift.id),
        shift_title: shift.title.clone(),
        date: shift.date,
        employee_id: entry.employee_id,
        employee_name: employee_name(names, entry.employee_id),
        clock_in: Some(entry.clock_in),
        clock_out: entry.clock_out,
        minutes_diff,
        hours_worked,
    }
}

fn unplanned_item(entry: &TimeEntry, names: &HashMap<Uuid, String>) -> DiscrepancyItem {
    DiscrepancyItem {
        kind: DiscrepancyKind::ExtraClock,
        shift_id: None,
        shift_title: UNPLANNED_BUCKET.to_string(),
        date: entry.clock_in.date(),
        employee_id: entry.employee_id,
        employee_name: employee_name(names, entry.employee_id),
        clock_in: Some(entry.clock_in),
        clock_out: entry.clock_out,
        minutes_diff: None,
        hours_worked: entry.worked_hours(),
    }
}

/// Desempate quando um funcionário tem mais de uma batida no mesmo turno:
/// vence a de clock_in mais cedo; persistindo o empate, o menor id.
/// A regra é estável sob reordenação do vetor de entrada.
fn pick_entry<'a>(entries: &[&'a TimeEntry], employee_id: Uuid) -> Option<&'a TimeEntry> {
    entries
        .iter()
        .filter(|e| e.employee_id == employee_id)
        .copied()
        .min_by_key(|e| (e.clock_in, e.id))
}

/// Duração prevista de um slot em horas. Diferença bruta negativa significa
/// virada de meia-noite: soma-se 24h (22:00 → 06:00 são 8h, nunca -16h).
pub fn scheduled_hours(start: NaiveTime, end: NaiveTime) -> f64 {
    let mut minutes = (end - start).num_minutes();
    if minutes < 0 {
        minutes += 24 * 60;
    }
    minutes as f64 / 60.0
}

/// Fim previsto como instante: cai no dia seguinte quando a janela vira a
/// meia-noite, para a conta de saída antecipada fazer sentido.
fn scheduled_end(shift: &Shift) -> NaiveDateTime {
    let mut end = shift.date.and_time(shift.end_time);
    if shift.end_time < shift.start_time {
        end += Duration::days(1);
    }
    end
}

/// Ordem global do relatório: gravidade, depois data, turno e funcionário.
/// É uma ordem total, então a lista é estável entre execuções.
fn sort_items(items: &mut [DiscrepancyItem]) {
    items.sort_by(|a, b| {
        (a.kind.rank(), a.date, a.shift_id, a.employee_id)
            .cmp(&(b.kind.rank(), b.date, b.shift_id, b.employee_id))
    });
}

/// Resumo do período a partir das coberturas por turno.
pub fn summarize(coverages: &[ShiftCoverage]) -> CoverageSummary {
    let mut full = 0;
    let mut partial = 0;
    let mut uncovered = 0;
    let mut over = 0;

    for coverage in coverages {
        match coverage.status {
            CoverageStatus::Full => full += 1,
            CoverageStatus::Partial => partial += 1,
            CoverageStatus::Uncovered => uncovered += 1,
            CoverageStatus::Over => over += 1,
        }
    }

    let total_slots: i64 = coverages.iter().map(|c| i64::from(c.slots)).sum();
    let total_clocked: i64 = coverages.iter().map(|c| c.total_clocked).sum();

    let overall_percent = if total_slots == 0 {
        0
    } else {
        (((total_clocked as f64 / total_slots as f64) * 100.0).round() as i32).clamp(0, 100)
    };

    CoverageSummary {
        total_shifts: coverages.len() as i64,
        full,
        partial,
        uncovered,
        over,
        overall_percent,
        planned_hours: coverages.iter().map(|c| c.planned_hours).sum(),
        worked_hours: coverages.iter().map(|c| c.worked_hours).sum(),
    }
}

fn employee_name(names: &HashMap<Uuid, String>, id: Uuid) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| format!("Funcionário {}", id))
}

// =============================================================================
//  ORQUESTRAÇÃO (busca o snapshot e entrega o relatório)
// =============================================================================

#[derive(Clone)]
pub struct ReconciliationService {
    scheduling_repo: SchedulingRepository,
    timesheet_repo: TimesheetRepository,
    confirmation_repo: ConfirmationRepository,
}

impl ReconciliationService {
    pub fn new(
        scheduling_repo: SchedulingRepository,
        timesheet_repo: TimesheetRepository,
        confirmation_repo: ConfirmationRepository,
    ) -> Self {
        Self {
            scheduling_repo,
            timesheet_repo,
            confirmation_repo,
        }
    }

    /// Monta o relatório do período. `only_issues` poda itens "ok" e turnos
    /// "full" das listas; o resumo continua cobrindo o período inteiro.
    pub async fn report<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
        only_issues: bool,
    ) -> Result<ReconciliationReport, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        if from > to {
            return Err(AppError::InvalidDateRange);
        }

        // Iniciamos uma transação (Snapshot consistente dos dados)
        let mut tx = executor.begin().await?;

        let shifts = self
            .scheduling_repo
            .shifts_in_range(&mut *tx, tenant_id, from, to)
            .await?;
        let shift_ids: Vec<Uuid> = shifts.iter().map(|s| s.id).collect();

        let assignments = self
            .scheduling_repo
            .counted_assignments_for_shifts(&mut *tx, tenant_id, &shift_ids)
            .await?;
        let entries = self
            .timesheet_repo
            .entries_for_shifts(&mut *tx, tenant_id, &shift_ids)
            .await?;
        let unplanned = self
            .timesheet_repo
            .unplanned_entries_in_range(&mut *tx, tenant_id, from, to)
            .await?;

        let employee_ids: BTreeSet<Uuid> = assignments
            .iter()
            .map(|a| a.employee_id)
            .chain(entries.iter().map(|e| e.employee_id))
            .chain(unplanned.iter().map(|e| e.employee_id))
            .collect();
        let employee_ids: Vec<Uuid> = employee_ids.into_iter().collect();

        let employees = self
            .scheduling_repo
            .employees_by_ids(&mut *tx, tenant_id, &employee_ids)
            .await?;
        let confirmations = self
            .confirmation_repo
            .confirmations_for_shifts(&mut *tx, tenant_id, &shift_ids)
            .await?;

        tx.commit().await?;

        let snapshot = ReconciliationSnapshot {
            shifts,
            assignments,
            entries,
            unplanned,
            employees,
        };

        let ReconciliationOutcome {
            mut items,
            mut coverages,
            summary,
            diagnostics,
        } = reconcile(&snapshot);

        if only_issues {
            items.retain(|i| i.kind != DiscrepancyKind::Ok);
            coverages.retain(|c| c.status != CoverageStatus::Full);
        }

        Ok(ReconciliationReport {
            from,
            to,
            items,
            coverages,
            summary,
            diagnostics,
            // A camada manual só acompanha o relatório; nunca altera os itens.
            confirmations,
        })
    }

    /// Visão de cobertura: o resumo do período e a agregação por turno.
    pub async fn coverage<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<(CoverageSummary, Vec<ShiftCoverage>), AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let report = self.report(executor, tenant_id, from, to, false).await?;
        Ok((report.summary, report.coverages))
    }
}
