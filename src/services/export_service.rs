// src/services/export_service.rs
//
// Achata o relatório de reconciliação numa tabela linha-por-(turno,
// funcionário) e a serializa em CSV (separador ';'). A ordem e os rótulos
// das colunas são contrato externo de planilha: mudar qualquer um quebra
// quem importa o arquivo.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::reconciliation::{EmployeeRef, ReconciliationReport, ShiftCoverage},
};

/// Cabeçalho fixo da planilha.
pub fn headers() -> [&'static str; 15] {
    [
        "data",
        "turno",
        "cliente",
        "horario",
        "funcionario",
        "status",
        "entrada",
        "saida",
        "horas",
        "diferenca_min",
        "escalados",
        "presentes",
        "faltas",
        "extras",
        "cobertura",
    ]
}

/// Uma linha por item do relatório, já na ordem global (gravidade, data).
/// Batidas sem turno saem sob o rótulo sintético "Sem turno", com as colunas
/// de cobertura vazias.
pub fn flatten_rows(report: &ReconciliationReport) -> Vec<Vec<String>> {
    let coverage_by_shift: HashMap<Uuid, &ShiftCoverage> = report
        .coverages
        .iter()
        .map(|c| (c.shift_id, c))
        .collect();

    report
        .items
        .iter()
        .map(|item| {
            let coverage = item.shift_id.and_then(|id| coverage_by_shift.get(&id).copied());

            vec![
                item.date.format("%Y-%m-%d").to_string(),
                item.shift_title.clone(),
                coverage
                    .and_then(|c| c.client_id)
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
                coverage.map(|c| c.time_range.clone()).unwrap_or_default(),
                item.employee_name.clone(),
                item.kind.as_str().to_string(),
                item.clock_in
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_default(),
                item.clock_out
                    .map(|t| t.format("%H:%M").to_string())
                    .unwrap_or_default(),
                format!("{:.2}", item.hours_worked),
                item.minutes_diff.map(|m| m.to_string()).unwrap_or_default(),
                coverage
                    .map(|c| c.total_assigned.to_string())
                    .unwrap_or_default(),
                coverage
                    .map(|c| c.total_clocked.to_string())
                    .unwrap_or_default(),
                coverage.map(|c| join_names(&c.missing)).unwrap_or_default(),
                coverage.map(|c| join_names(&c.extra)).unwrap_or_default(),
                coverage
                    .map(|c| c.status.as_str().to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect()
}

/// Serializa o relatório num buffer CSV em memória.
pub fn report_to_csv(report: &ReconciliationReport) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    writer.write_record(headers())?;
    for row in flatten_rows(report) {
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Falha ao finalizar o buffer CSV: {e}"))?;

    Ok(bytes)
}

fn join_names(refs: &[EmployeeRef]) -> String {
    refs.iter()
        .map(|r| r.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
