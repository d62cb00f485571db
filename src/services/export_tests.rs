// src/services/export_tests.rs

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use uuid::Uuid;

    use crate::models::reconciliation::ReconciliationReport;
    use crate::models::scheduling::{
        Assignment, AssignmentStatus, Employee, PayType, Shift, ShiftStatus,
    };
    use crate::models::timesheet::{TimeEntry, TimeEntryStatus};
    use crate::services::export_service::{flatten_rows, headers, report_to_csv};
    use crate::services::reconciliation_service::{reconcile, ReconciliationSnapshot};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        date().and_time(t(h, m))
    }

    fn employee(first_name: &str) -> Employee {
        Employee {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            first_name: first_name.to_string(),
            last_name: "Silva".to_string(),
            created_at: None,
        }
    }

    /// Turno 09:00-17:00 com Maria presente, João faltando e uma batida
    /// sem turno do Igor: cobre linha normal, falta e balde sintético.
    fn sample_report() -> ReconciliationReport {
        let shift = Shift {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            title: "Recepção - Manhã".to_string(),
            date: date(),
            start_time: t(9, 0),
            end_time: t(17, 0),
            slots: 2,
            pay_type: PayType::Hourly,
            status: ShiftStatus::Published,
            client_id: Some(Uuid::new_v4()),
            location_id: None,
            created_at: None,
            updated_at: None,
        };
        let maria = employee("Maria");
        let joao = employee("João");
        let igor = employee("Igor");

        let assign = |e: &Employee| Assignment {
            id: Uuid::new_v4(),
            tenant_id: shift.tenant_id,
            shift_id: shift.id,
            employee_id: e.id,
            status: AssignmentStatus::Accepted,
            created_at: None,
        };

        let snapshot = ReconciliationSnapshot {
            shifts: vec![shift.clone()],
            assignments: vec![assign(&maria), assign(&joao)],
            entries: vec![TimeEntry {
                id: Uuid::new_v4(),
                tenant_id: shift.tenant_id,
                shift_id: Some(shift.id),
                employee_id: maria.id,
                clock_in: dt(9, 0),
                clock_out: Some(dt(17, 0)),
                break_minutes: 0,
                status: TimeEntryStatus::Approved,
                created_at: None,
            }],
            unplanned: vec![TimeEntry {
                id: Uuid::new_v4(),
                tenant_id: shift.tenant_id,
                shift_id: None,
                employee_id: igor.id,
                clock_in: dt(10, 0),
                clock_out: Some(dt(14, 0)),
                break_minutes: 0,
                status: TimeEntryStatus::Approved,
                created_at: None,
            }],
            employees: vec![maria, joao, igor],
        };

        let outcome = reconcile(&snapshot);
        ReconciliationReport {
            from: date(),
            to: date(),
            items: outcome.items,
            coverages: outcome.coverages,
            summary: outcome.summary,
            diagnostics: outcome.diagnostics,
            confirmations: vec![],
        }
    }

    #[test]
    fn header_order_and_labels_are_the_external_contract() {
        let report = sample_report();
        let text = String::from_utf8(report_to_csv(&report).unwrap()).unwrap();
        let first_line = text.lines().next().unwrap();

        assert_eq!(
            first_line,
            "data;turno;cliente;horario;funcionario;status;entrada;saida;horas;\
             diferenca_min;escalados;presentes;faltas;extras;cobertura"
        );
        assert_eq!(headers().len(), 15);
    }

    #[test]
    fn one_row_per_report_item_with_shift_columns_filled() {
        let report = sample_report();
        let rows = flatten_rows(&report);

        // no_show do João, ok da Maria e o extra sem turno do Igor.
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.len(), report.items.len());

        let no_show = &rows[0];
        assert_eq!(no_show[0], "2025-03-10");
        assert_eq!(no_show[1], "Recepção - Manhã");
        assert_eq!(no_show[3], "09:00 - 17:00");
        assert_eq!(no_show[4], "João Silva");
        assert_eq!(no_show[5], "no_show");
        assert_eq!(no_show[6], ""); // sem entrada
        assert_eq!(no_show[8], "0.00");
        assert_eq!(no_show[10], "2"); // escalados
        assert_eq!(no_show[11], "1"); // presentes
        assert_eq!(no_show[12], "João Silva"); // faltas
        assert_eq!(no_show[14], "partial");

        let ok_row = rows
            .iter()
            .find(|r| r[5] == "ok")
            .expect("a linha da presença deveria existir");
        assert_eq!(ok_row[4], "Maria Silva");
        assert_eq!(ok_row[6], "09:00");
        assert_eq!(ok_row[7], "17:00");
        assert_eq!(ok_row[8], "8.00");
    }

    #[test]
    fn unplanned_rows_use_the_synthetic_label_with_empty_coverage_columns() {
        let report = sample_report();
        let rows = flatten_rows(&report);

        let unplanned = rows
            .iter()
            .find(|r| r[1] == "Sem turno")
            .expect("a batida sem turno deveria virar linha");

        assert_eq!(unplanned[4], "Igor Silva");
        assert_eq!(unplanned[5], "extra_clock");
        assert_eq!(unplanned[3], ""); // sem horário de turno
        assert_eq!(unplanned[10], ""); // sem escalados
        assert_eq!(unplanned[14], ""); // sem cobertura
        assert_eq!(unplanned[8], "4.00");
    }

    #[test]
    fn csv_body_has_one_line_per_row() {
        let report = sample_report();
        let text = String::from_utf8(report_to_csv(&report).unwrap()).unwrap();

        // Cabeçalho + três linhas de dados.
        assert_eq!(text.lines().count(), 4);
    }
}
