// src/services/reconciliation_tests.rs

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use uuid::Uuid;

    use crate::models::reconciliation::{CoverageStatus, DiscrepancyKind};
    use crate::models::scheduling::{
        Assignment, AssignmentStatus, Employee, PayType, Shift, ShiftStatus,
    };
    use crate::models::timesheet::{TimeEntry, TimeEntryStatus};
    use crate::services::reconciliation_service::{
        reconcile, scheduled_hours, ReconciliationSnapshot, UNPLANNED_BUCKET,
    };

    // --- Fixtures ---

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        date().and_time(t(h, m))
    }

    fn dt_next_day(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 11).unwrap().and_time(t(h, m))
    }

    fn shift(start: NaiveTime, end: NaiveTime, slots: i32, pay_type: PayType) -> Shift {
        Shift {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            title: "Recepção - Manhã".to_string(),
            date: date(),
            start_time: start,
            end_time: end,
            slots,
            pay_type,
            status: ShiftStatus::Published,
            client_id: None,
            location_id: None,
            created_at: None,
            updated_at: None,
        }
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

    fn assign(shift: &Shift, employee: &Employee) -> Assignment {
        assign_with_status(shift, employee, AssignmentStatus::Accepted)
    }

    fn assign_with_status(shift: &Shift, employee: &Employee, status: AssignmentStatus) -> Assignment {
        Assignment {
            id: Uuid::new_v4(),
            tenant_id: shift.tenant_id,
            shift_id: shift.id,
            employee_id: employee.id,
            status,
            created_at: None,
        }
    }

    fn entry(
        shift: &Shift,
        employee: &Employee,
        clock_in: NaiveDateTime,
        clock_out: Option<NaiveDateTime>,
    ) -> TimeEntry {
        TimeEntry {
            id: Uuid::new_v4(),
            tenant_id: shift.tenant_id,
            shift_id: Some(shift.id),
            employee_id: employee.id,
            clock_in,
            clock_out,
            break_minutes: 0,
            status: TimeEntryStatus::Approved,
            created_at: None,
        }
    }

    fn unplanned(employee: &Employee, clock_in: NaiveDateTime, clock_out: Option<NaiveDateTime>) -> TimeEntry {
        TimeEntry {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            shift_id: None,
            employee_id: employee.id,
            clock_in,
            clock_out,
            break_minutes: 0,
            status: TimeEntryStatus::Approved,
            created_at: None,
        }
    }

    fn snapshot(
        shifts: Vec<Shift>,
        assignments: Vec<Assignment>,
        entries: Vec<TimeEntry>,
        unplanned: Vec<TimeEntry>,
        employees: Vec<Employee>,
    ) -> ReconciliationSnapshot {
        ReconciliationSnapshot {
            shifts,
            assignments,
            entries,
            unplanned,
            employees,
        }
    }

    // --- Cenários do classificador ---

    #[test]
    fn assigned_without_entry_is_no_show_and_coverage_partial() {
        let s = shift(t(9, 0), t(17, 0), 2, PayType::Hourly);
        let e1 = employee("Maria");
        let e2 = employee("João");

        let out = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign(&s, &e1), assign(&s, &e2)],
            vec![entry(&s, &e1, dt(9, 0), Some(dt(17, 0)))],
            vec![],
            vec![e1.clone(), e2.clone()],
        ));

        assert_eq!(out.items.len(), 2);
        // Faltas vêm antes dos "ok" na ordem global.
        assert_eq!(out.items[0].kind, DiscrepancyKind::NoShow);
        assert_eq!(out.items[0].employee_id, e2.id);
        assert_eq!(out.items[0].hours_worked, 0.0);
        assert!(out.items[0].clock_in.is_none());

        assert_eq!(out.items[1].kind, DiscrepancyKind::Ok);
        assert_eq!(out.items[1].employee_id, e1.id);
        assert_eq!(out.items[1].hours_worked, 8.0);

        let coverage = &out.coverages[0];
        assert_eq!(coverage.status, CoverageStatus::Partial);
        assert_eq!(coverage.total_assigned, 2);
        assert_eq!(coverage.total_clocked, 1);
        assert_eq!(coverage.missing.len(), 1);
        assert_eq!(coverage.missing[0].id, e2.id);
        assert_eq!(coverage.missing[0].name, "João Silva");
        assert!(coverage.extra.is_empty());
    }

    #[test]
    fn seven_minutes_late_is_flagged_with_the_difference() {
        let s = shift(t(8, 0), t(16, 0), 1, PayType::Hourly);
        let e = employee("Ana");

        let out = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign(&s, &e)],
            vec![entry(&s, &e, dt(8, 7), Some(dt(16, 0)))],
            vec![],
            vec![e],
        ));

        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].kind, DiscrepancyKind::LateArrival);
        assert_eq!(out.items[0].minutes_diff, Some(7));
    }

    #[test]
    fn threshold_is_strict_five_passes_six_flags() {
        let e = employee("Pedro");

        for (minute, expected_kind, expected_diff) in [
            (5, DiscrepancyKind::Ok, None),
            (6, DiscrepancyKind::LateArrival, Some(6)),
        ] {
            let s = shift(t(9, 0), t(17, 0), 1, PayType::Hourly);
            let out = reconcile(&snapshot(
                vec![s.clone()],
                vec![assign(&s, &e)],
                vec![entry(&s, &e, dt(9, minute), Some(dt(17, 0)))],
                vec![],
                vec![e.clone()],
            ));

            assert_eq!(out.items[0].kind, expected_kind, "minuto {}", minute);
            assert_eq!(out.items[0].minutes_diff, expected_diff);
        }
    }

    #[test]
    fn leaving_early_beyond_threshold_is_early_departure() {
        let s = shift(t(9, 0), t(17, 0), 1, PayType::Hourly);
        let e = employee("Carla");

        let out = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign(&s, &e)],
            vec![entry(&s, &e, dt(9, 0), Some(dt(16, 30)))],
            vec![],
            vec![e.clone()],
        ));

        assert_eq!(out.items[0].kind, DiscrepancyKind::EarlyDeparture);
        assert_eq!(out.items[0].minutes_diff, Some(30));

        // Cinco minutos mais cedo ainda está dentro da tolerância.
        let s2 = shift(t(9, 0), t(17, 0), 1, PayType::Hourly);
        let out2 = reconcile(&snapshot(
            vec![s2.clone()],
            vec![assign(&s2, &e)],
            vec![entry(&s2, &e, dt(9, 0), Some(dt(16, 55)))],
            vec![],
            vec![e],
        ));
        assert_eq!(out2.items[0].kind, DiscrepancyKind::Ok);
    }

    #[test]
    fn open_entry_counts_zero_hours_but_is_not_early_departure() {
        let s = shift(t(9, 0), t(17, 0), 1, PayType::Hourly);
        let e = employee("Rui");

        let out = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign(&s, &e)],
            vec![entry(&s, &e, dt(9, 0), None)],
            vec![],
            vec![e],
        ));

        assert_eq!(out.items[0].kind, DiscrepancyKind::Ok);
        assert_eq!(out.items[0].hours_worked, 0.0);
    }

    #[test]
    fn daily_rate_shifts_are_not_time_policed() {
        let s = shift(t(8, 0), t(18, 0), 1, PayType::Daily);
        let e = employee("Bruno");

        // Duas horas atrasado e saindo cedo: diária fechada continua ok.
        let out = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign(&s, &e)],
            vec![entry(&s, &e, dt(10, 0), Some(dt(15, 0)))],
            vec![],
            vec![e],
        ));

        assert_eq!(out.items[0].kind, DiscrepancyKind::Ok);
        assert_eq!(out.items[0].minutes_diff, None);
    }

    // --- Virada de meia-noite ---

    #[test]
    fn overnight_window_is_eight_hours_never_negative() {
        assert_eq!(scheduled_hours(t(22, 0), t(6, 0)), 8.0);
        assert_eq!(scheduled_hours(t(9, 0), t(17, 0)), 8.0);
        assert!(scheduled_hours(t(23, 59), t(0, 0)) >= 0.0);
        assert!(scheduled_hours(t(0, 0), t(0, 0)) >= 0.0);
    }

    #[test]
    fn overnight_shift_clocked_full_range_is_ok_and_full() {
        let s = shift(t(22, 0), t(6, 0), 1, PayType::Hourly);
        let e = employee("Vitor");

        let out = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign(&s, &e)],
            vec![entry(&s, &e, dt(22, 0), Some(dt_next_day(6, 0)))],
            vec![],
            vec![e],
        ));

        assert_eq!(out.items[0].kind, DiscrepancyKind::Ok);
        assert_eq!(out.items[0].hours_worked, 8.0);
        assert_eq!(out.coverages[0].status, CoverageStatus::Full);
        assert_eq!(out.coverages[0].scheduled_hours, 8.0);
        assert_eq!(out.coverages[0].planned_hours, 8.0);
    }

    // --- Extras e batidas sem turno ---

    #[test]
    fn clocked_without_assignment_is_extra_and_coverage_over() {
        let s = shift(t(9, 0), t(17, 0), 1, PayType::Hourly);
        let assigned = employee("Lia");
        let intruder = employee("Caio");

        let out = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign(&s, &assigned)],
            vec![
                entry(&s, &assigned, dt(9, 0), Some(dt(17, 0))),
                entry(&s, &intruder, dt(9, 0), Some(dt(17, 0))),
            ],
            vec![],
            vec![assigned, intruder.clone()],
        ));

        let extra_item = out
            .items
            .iter()
            .find(|i| i.kind == DiscrepancyKind::ExtraClock)
            .expect("deveria haver um extra_clock");
        assert_eq!(extra_item.employee_id, intruder.id);

        let coverage = &out.coverages[0];
        assert_eq!(coverage.status, CoverageStatus::Over);
        assert_eq!(coverage.extra.len(), 1);
        assert_eq!(coverage.extra[0].id, intruder.id);
    }

    #[test]
    fn rejected_or_removed_assignments_do_not_count_as_scheduled() {
        let s = shift(t(9, 0), t(17, 0), 1, PayType::Hourly);
        let e = employee("Nina");

        // Escalação REMOVED + batida: para o motor ela trabalhou sem escala.
        let out = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign_with_status(&s, &e, AssignmentStatus::Removed)],
            vec![entry(&s, &e, dt(9, 0), Some(dt(17, 0)))],
            vec![],
            vec![e],
        ));

        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].kind, DiscrepancyKind::ExtraClock);
        assert_eq!(out.coverages[0].total_assigned, 0);
        assert_eq!(out.coverages[0].status, CoverageStatus::Over);
    }

    #[test]
    fn rejected_entries_are_invisible_to_the_engine() {
        let s = shift(t(9, 0), t(17, 0), 1, PayType::Hourly);
        let e = employee("Tiago");

        let mut rejected = entry(&s, &e, dt(9, 0), Some(dt(17, 0)));
        rejected.status = TimeEntryStatus::Rejected;

        let out = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign(&s, &e)],
            vec![rejected],
            vec![],
            vec![e],
        ));

        assert_eq!(out.items[0].kind, DiscrepancyKind::NoShow);
        assert_eq!(out.coverages[0].status, CoverageStatus::Uncovered);
    }

    #[test]
    fn unplanned_entry_goes_only_to_the_synthetic_bucket() {
        let s = shift(t(9, 0), t(17, 0), 1, PayType::Hourly);
        let assigned = employee("Duda");
        let wanderer = employee("Igor");

        let out = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign(&s, &assigned)],
            vec![entry(&s, &assigned, dt(9, 0), Some(dt(17, 0)))],
            vec![unplanned(&wanderer, dt(10, 0), Some(dt(14, 0)))],
            vec![assigned, wanderer.clone()],
        ));

        let bucket_item = out
            .items
            .iter()
            .find(|i| i.shift_id.is_none())
            .expect("a batida sem turno deveria virar um item");
        assert_eq!(bucket_item.kind, DiscrepancyKind::ExtraClock);
        assert_eq!(bucket_item.shift_title, UNPLANNED_BUCKET);
        assert_eq!(bucket_item.employee_id, wanderer.id);
        assert_eq!(bucket_item.hours_worked, 4.0);

        // A cobertura do turno real não é afetada pelo balde sintético.
        assert_eq!(out.coverages.len(), 1);
        assert_eq!(out.coverages[0].status, CoverageStatus::Full);
        assert!(out.coverages[0].extra.is_empty());
    }

    // --- Leis de partição e agregação ---

    #[test]
    fn partition_and_extra_laws_hold() {
        let s = shift(t(9, 0), t(17, 0), 3, PayType::Hourly);
        let both = employee("Ana");
        let only_assigned = employee("Bia");
        let only_clocked = employee("Cid");

        let out = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign(&s, &both), assign(&s, &only_assigned)],
            vec![
                entry(&s, &both, dt(9, 0), Some(dt(17, 0))),
                entry(&s, &only_clocked, dt(9, 0), Some(dt(17, 0))),
            ],
            vec![],
            vec![both.clone(), only_assigned.clone(), only_clocked.clone()],
        ));

        let coverage = &out.coverages[0];

        // assignedSet = (clocked ∩ assigned) ∪ missing, disjuntos.
        let missing_ids: Vec<Uuid> = coverage.missing.iter().map(|r| r.id).collect();
        let extra_ids: Vec<Uuid> = coverage.extra.iter().map(|r| r.id).collect();
        assert_eq!(missing_ids, vec![only_assigned.id]);
        assert_eq!(extra_ids, vec![only_clocked.id]);
        assert!(!missing_ids.contains(&both.id));
        assert!(!extra_ids.contains(&both.id));
        assert_eq!(coverage.total_assigned, 2);
        assert_eq!(coverage.total_clocked, 2);

        // missing > 0 vence extra > 0 na precedência de status.
        assert_eq!(coverage.status, CoverageStatus::Partial);
    }

    #[test]
    fn uncovered_takes_precedence_when_nobody_clocked() {
        let s = shift(t(9, 0), t(17, 0), 2, PayType::Hourly);
        let e1 = employee("Gil");
        let e2 = employee("Hugo");

        let out = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign(&s, &e1), assign(&s, &e2)],
            vec![],
            vec![],
            vec![e1, e2],
        ));

        assert_eq!(out.coverages[0].status, CoverageStatus::Uncovered);
        assert_eq!(out.summary.uncovered, 1);
        assert_eq!(out.summary.overall_percent, 0);
    }

    #[test]
    fn empty_shift_emits_no_items_and_stays_neutral() {
        let s = shift(t(9, 0), t(17, 0), 1, PayType::Hourly);

        let out = reconcile(&snapshot(vec![s], vec![], vec![], vec![], vec![]));

        assert!(out.items.is_empty());
        assert_eq!(out.coverages.len(), 1);
        assert_eq!(out.coverages[0].status, CoverageStatus::Full);
        assert_eq!(out.coverages[0].total_assigned, 0);
        assert_eq!(out.coverages[0].total_clocked, 0);
    }

    #[test]
    fn overall_percent_is_clamped_to_one_hundred() {
        let s = shift(t(9, 0), t(17, 0), 1, PayType::Hourly);
        let assigned = employee("Eva");
        let extra1 = employee("Fabio");
        let extra2 = employee("Gabi");

        let out = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign(&s, &assigned)],
            vec![
                entry(&s, &assigned, dt(9, 0), Some(dt(17, 0))),
                entry(&s, &extra1, dt(9, 0), Some(dt(17, 0))),
                entry(&s, &extra2, dt(9, 0), Some(dt(17, 0))),
            ],
            vec![],
            vec![assigned, extra1, extra2],
        ));

        // 3 presentes para 1 slot seria 300%.
        assert_eq!(out.summary.overall_percent, 100);
        assert_eq!(out.summary.over, 1);
    }

    // --- Determinismo e ordenação ---

    #[test]
    fn duplicate_entries_resolve_to_earliest_clock_in_under_any_input_order() {
        let s = shift(t(9, 0), t(17, 0), 1, PayType::Hourly);
        let e = employee("Leo");

        let early = entry(&s, &e, dt(9, 0), Some(dt(13, 0)));
        let late = entry(&s, &e, dt(10, 30), Some(dt(17, 0)));

        let forward = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign(&s, &e)],
            vec![early.clone(), late.clone()],
            vec![],
            vec![e.clone()],
        ));
        let backward = reconcile(&snapshot(
            vec![s.clone()],
            vec![assign(&s, &e)],
            vec![late, early],
            vec![],
            vec![e],
        ));

        assert_eq!(forward.items[0].clock_in, Some(dt(9, 0)));
        assert_eq!(
            serde_json::to_value(&forward.items).unwrap(),
            serde_json::to_value(&backward.items).unwrap()
        );
    }

    #[test]
    fn rerunning_on_the_same_snapshot_is_byte_stable() {
        let s1 = shift(t(9, 0), t(17, 0), 2, PayType::Hourly);
        let mut s2 = shift(t(14, 0), t(22, 0), 1, PayType::Hourly);
        s2.date = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
        let e1 = employee("Mia");
        let e2 = employee("Noa");

        let snap = snapshot(
            vec![s1.clone(), s2.clone()],
            vec![assign(&s1, &e1), assign(&s1, &e2), assign(&s2, &e1)],
            vec![entry(&s1, &e1, dt(9, 10), Some(dt(17, 0)))],
            vec![],
            vec![e1, e2],
        );

        let first = reconcile(&snap);
        let second = reconcile(&snap);

        assert_eq!(
            serde_json::to_value(&first.items).unwrap(),
            serde_json::to_value(&second.items).unwrap()
        );
        assert_eq!(
            serde_json::to_value(&first.coverages).unwrap(),
            serde_json::to_value(&second.coverages).unwrap()
        );
    }

    #[test]
    fn items_are_sorted_by_severity_then_date() {
        let early_shift = shift(t(9, 0), t(17, 0), 1, PayType::Hourly);
        let mut later_shift = shift(t(9, 0), t(17, 0), 1, PayType::Hourly);
        later_shift.date = NaiveDate::from_ymd_opt(2025, 3, 12).unwrap();

        let worker = employee("Old");
        let absent = employee("Paz");

        let out = reconcile(&snapshot(
            vec![early_shift.clone(), later_shift.clone()],
            vec![assign(&early_shift, &worker), assign(&later_shift, &absent)],
            vec![entry(&early_shift, &worker, dt(9, 0), Some(dt(17, 0)))],
            vec![],
            vec![worker, absent],
        ));

        // O no_show de 12/03 vem antes do ok de 10/03: gravidade primeiro.
        assert_eq!(out.items[0].kind, DiscrepancyKind::NoShow);
        assert_eq!(out.items[0].date, later_shift.date);
        assert_eq!(out.items[1].kind, DiscrepancyKind::Ok);
        assert_eq!(out.items[1].date, early_shift.date);
    }

    // --- Linhas malformadas ---

    #[test]
    fn malformed_shift_yields_diagnostic_without_aborting_the_batch() {
        let good = shift(t(9, 0), t(17, 0), 1, PayType::Hourly);
        let bad = shift(t(8, 0), t(12, 0), 0, PayType::Hourly);
        let e = employee("Zoe");

        let out = reconcile(&snapshot(
            vec![good.clone(), bad.clone()],
            vec![assign(&good, &e), assign(&bad, &e)],
            vec![entry(&good, &e, dt(9, 0), Some(dt(17, 0)))],
            vec![],
            vec![e],
        ));

        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].shift_id, bad.id);
        assert!(out.diagnostics[0].note.contains("slots"));

        // O turno bom segue classificado normalmente.
        assert_eq!(out.coverages.len(), 1);
        assert_eq!(out.coverages[0].shift_id, good.id);
        assert_eq!(out.items.len(), 1);
        assert_eq!(out.items[0].kind, DiscrepancyKind::Ok);
    }

    #[test]
    fn empty_snapshot_degrades_to_an_empty_report() {
        let out = reconcile(&ReconciliationSnapshot::default());

        assert!(out.items.is_empty());
        assert!(out.coverages.is_empty());
        assert!(out.diagnostics.is_empty());
        assert_eq!(out.summary.total_shifts, 0);
        assert_eq!(out.summary.overall_percent, 0);
    }
}
