// src/services/scheduling_service.rs

use sqlx::{Postgres, Executor};
use uuid::Uuid;
use chrono::{NaiveDate, NaiveTime};

use crate::{
    common::error::AppError,
    db::SchedulingRepository,
    models::reconciliation::ConflictInfo,
    models::scheduling::Shift,
};

#[derive(Clone)]
pub struct SchedulingService {
    repo: SchedulingRepository,
}

impl SchedulingService {
    pub fn new(repo: SchedulingRepository) -> Self {
        Self { repo }
    }

    /// Turnos já escalados do funcionário na data cuja janela sobrepõe a
    /// janela candidata. O resultado é consultivo: bloquear ou só avisar é
    /// decisão de quem chama. `exclude_shift_id` serve aos fluxos de edição
    /// (o turno sendo editado não conflita consigo mesmo).
    pub async fn find_conflicts<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        employee_id: Uuid,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        exclude_shift_id: Option<Uuid>,
    ) -> Result<Vec<ConflictInfo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assigned = self
            .repo
            .assigned_shifts_on_date(executor, tenant_id, employee_id, date)
            .await?;

        Ok(conflicts_among(&assigned, start, end, exclude_shift_id))
    }
}

/// Filtro puro de sobreposição sobre os turnos já escalados.
pub fn conflicts_among(
    assigned: &[Shift],
    start: NaiveTime,
    end: NaiveTime,
    exclude_shift_id: Option<Uuid>,
) -> Vec<ConflictInfo> {
    assigned
        .iter()
        .filter(|s| exclude_shift_id != Some(s.id))
        .filter(|s| windows_overlap(start, end, s.start_time, s.end_time))
        .map(|s| ConflictInfo {
            shift_id: s.id,
            title: s.title.clone(),
            time_range: s.time_range(),
        })
        .collect()
}

/// Sobreposição de intervalos semiabertos [start, end): janelas que apenas
/// se tocam (end == other_start) não conflitam. Os horários são comparados
/// como valores do mesmo dia, sem ajuste de virada de meia-noite.
pub fn windows_overlap(
    start: NaiveTime,
    end: NaiveTime,
    other_start: NaiveTime,
    other_end: NaiveTime,
) -> bool {
    start < other_end && end > other_start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scheduling::{PayType, Shift, ShiftStatus};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn shift(title: &str, start: NaiveTime, end: NaiveTime) -> Shift {
        Shift {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            start_time: start,
            end_time: end,
            slots: 1,
            pay_type: PayType::Hourly,
            status: ShiftStatus::Published,
            client_id: None,
            location_id: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn touching_windows_do_not_conflict() {
        assert!(!windows_overlap(t(9, 0), t(12, 0), t(12, 0), t(18, 0)));
        assert!(!windows_overlap(t(12, 0), t(18, 0), t(9, 0), t(12, 0)));
    }

    #[test]
    fn contained_window_conflicts() {
        assert!(windows_overlap(t(10, 0), t(11, 0), t(9, 0), t(17, 0)));
        assert!(windows_overlap(t(9, 0), t(17, 0), t(10, 0), t(11, 0)));
    }

    #[test]
    fn partial_overlap_conflicts() {
        assert!(windows_overlap(t(8, 0), t(10, 0), t(9, 0), t(17, 0)));
    }

    #[test]
    fn disjoint_windows_do_not_conflict() {
        assert!(!windows_overlap(t(6, 0), t(8, 0), t(9, 0), t(17, 0)));
    }

    #[test]
    fn conflicts_report_title_and_range() {
        let assigned = vec![
            shift("Cozinha - Noite", t(18, 0), t(23, 0)),
            shift("Recepção - Manhã", t(6, 0), t(12, 0)),
        ];

        let conflicts = conflicts_among(&assigned, t(20, 0), t(22, 0), None);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].title, "Cozinha - Noite");
        assert_eq!(conflicts[0].time_range, "18:00 - 23:00");
    }

    #[test]
    fn edited_shift_is_excluded_from_its_own_conflicts() {
        let s = shift("Recepção - Manhã", t(9, 0), t(17, 0));
        let id = s.id;
        let assigned = vec![s];

        assert_eq!(conflicts_among(&assigned, t(9, 0), t(17, 0), Some(id)).len(), 0);
        assert_eq!(conflicts_among(&assigned, t(9, 0), t(17, 0), None).len(), 1);
    }
}
