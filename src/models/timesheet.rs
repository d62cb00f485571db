// src/models/timesheet.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;
use chrono::{DateTime, NaiveDateTime, Utc};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "time_entry_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum TimeEntryStatus {
    Pending,
    Approved,
    Rejected, // Invisível para a reconciliação
}

/// Registro de ponto. `shift_id` nulo marca trabalho não planejado
/// (batida sem turno vinculado); `clock_out` nulo marca registro em aberto.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    pub shift_id: Option<Uuid>,
    pub employee_id: Uuid,

    // Horários em relógio de parede: a comparação com a janela do turno
    // é aritmética direta, sem fuso.
    #[schema(value_type = String, example = "2025-03-10T09:02:00")]
    pub clock_in: NaiveDateTime,

    #[schema(value_type = Option<String>, example = "2025-03-10T17:00:00")]
    pub clock_out: Option<NaiveDateTime>,

    #[schema(example = 30)]
    pub break_minutes: i32,

    pub status: TimeEntryStatus,

    pub created_at: Option<DateTime<Utc>>,
}

impl TimeEntry {
    /// Horas trabalhadas: (saída - entrada) - pausas, nunca negativo.
    /// Registro em aberto (sem clock_out) conta zero.
    pub fn worked_hours(&self) -> f64 {
        match self.clock_out {
            Some(clock_out) => {
                let gross_minutes = (clock_out - self.clock_in).num_minutes();
                let net_minutes = gross_minutes - i64::from(self.break_minutes.max(0));
                net_minutes.max(0) as f64 / 60.0
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(clock_in: NaiveDateTime, clock_out: Option<NaiveDateTime>, break_minutes: i32) -> TimeEntry {
        TimeEntry {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            shift_id: None,
            employee_id: Uuid::new_v4(),
            clock_in,
            clock_out,
            break_minutes,
            status: TimeEntryStatus::Approved,
            created_at: None,
        }
    }

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn worked_hours_subtracts_breaks() {
        let e = entry(dt(9, 0), Some(dt(17, 0)), 30);
        assert_eq!(e.worked_hours(), 7.5);
    }

    #[test]
    fn worked_hours_never_negative() {
        // Pausa maior que o período bruto não pode gerar horas negativas.
        let e = entry(dt(9, 0), Some(dt(9, 10)), 60);
        assert_eq!(e.worked_hours(), 0.0);
    }

    #[test]
    fn open_entry_counts_zero() {
        let e = entry(dt(9, 0), None, 0);
        assert_eq!(e.worked_hours(), 0.0);
    }
}
