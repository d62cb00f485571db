// src/db/timesheet_repo.rs

use sqlx::{PgPool, Postgres, Executor};
use uuid::Uuid;
use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    models::timesheet::TimeEntry,
};

#[derive(Clone)]
pub struct TimesheetRepository {
    pool: PgPool,
}

impl TimesheetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registros de ponto vinculados aos turnos informados. Batidas REJECTED
    /// são invisíveis para a reconciliação, então já ficam de fora aqui.
    /// A ordem (clock_in, id) é a mesma do desempate do classificador.
    pub async fn entries_for_shifts<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        shift_ids: &[Uuid],
    ) -> Result<Vec<TimeEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entries = sqlx::query_as::<_, TimeEntry>(
            r#"
            SELECT id, tenant_id, shift_id, employee_id, clock_in, clock_out,
                   break_minutes, status, created_at
            FROM time_entries
            WHERE tenant_id = $1
              AND shift_id = ANY($2)
              AND status <> 'REJECTED'
            ORDER BY clock_in ASC, id ASC
            "#,
        )
        .bind(tenant_id)
        .bind(shift_ids)
        .fetch_all(executor)
        .await?;

        Ok(entries)
    }

    /// Batidas sem turno vinculado (trabalho não planejado) cuja entrada cai
    /// no intervalo de datas do relatório.
    pub async fn unplanned_entries_in_range<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<TimeEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entries = sqlx::query_as::<_, TimeEntry>(
            r#"
            SELECT id, tenant_id, shift_id, employee_id, clock_in, clock_out,
                   break_minutes, status, created_at
            FROM time_entries
            WHERE tenant_id = $1
              AND shift_id IS NULL
              AND status <> 'REJECTED'
              AND clock_in::date BETWEEN $2 AND $3
            ORDER BY clock_in ASC, id ASC
            "#,
        )
        .bind(tenant_id)
        .bind(from)
        .bind(to)
        .fetch_all(executor)
        .await?;

        Ok(entries)
    }
}
