// src/db/scheduling_repo.rs

use sqlx::{PgPool, Postgres, Executor};
use uuid::Uuid;
use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    models::scheduling::{Assignment, Employee, Shift},
};

// As tabelas de turnos e escalações pertencem às telas de agendamento;
// o motor de reconciliação só as lê.
#[derive(Clone)]
pub struct SchedulingRepository {
    pool: PgPool,
}

impl SchedulingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Todos os turnos da empresa no intervalo de datas (inclusivo nas duas
    /// pontas), em ordem estável para o relatório.
    pub async fn shifts_in_range<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Shift>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let shifts = sqlx::query_as::<_, Shift>(
            r#"
            SELECT id, tenant_id, title, date, start_time, end_time, slots,
                   pay_type, status, client_id, location_id, created_at, updated_at
            FROM shifts
            WHERE tenant_id = $1
              AND date BETWEEN $2 AND $3
            ORDER BY date ASC, start_time ASC, id ASC
            "#,
        )
        .bind(tenant_id)
        .bind(from)
        .bind(to)
        .fetch_all(executor)
        .await?;

        Ok(shifts)
    }

    pub async fn find_shift<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        shift_id: Uuid,
    ) -> Result<Option<Shift>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            SELECT id, tenant_id, title, date, start_time, end_time, slots,
                   pay_type, status, client_id, location_id, created_at, updated_at
            FROM shifts
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(shift_id)
        .fetch_optional(executor)
        .await?;

        Ok(shift)
    }

    /// Escalações "contadas" (PENDING / ACCEPTED / CONFIRMED) dos turnos
    /// informados. REJECTED e REMOVED não escalam ninguém.
    pub async fn counted_assignments_for_shifts<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        shift_ids: &[Uuid],
    ) -> Result<Vec<Assignment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assignments = sqlx::query_as::<_, Assignment>(
            r#"
            SELECT id, tenant_id, shift_id, employee_id, status, created_at
            FROM shift_assignments
            WHERE tenant_id = $1
              AND shift_id = ANY($2)
              AND status IN ('PENDING', 'ACCEPTED', 'CONFIRMED')
            ORDER BY shift_id ASC, employee_id ASC
            "#,
        )
        .bind(tenant_id)
        .bind(shift_ids)
        .fetch_all(executor)
        .await?;

        Ok(assignments)
    }

    /// Turnos em que o funcionário já está escalado numa data (entrada do
    /// detector de conflitos).
    pub async fn assigned_shifts_on_date<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Shift>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let shifts = sqlx::query_as::<_, Shift>(
            r#"
            SELECT s.id, s.tenant_id, s.title, s.date, s.start_time, s.end_time,
                   s.slots, s.pay_type, s.status, s.client_id, s.location_id,
                   s.created_at, s.updated_at
            FROM shifts s
            JOIN shift_assignments a ON a.shift_id = s.id
            WHERE s.tenant_id = $1
              AND a.employee_id = $2
              AND s.date = $3
              AND a.status IN ('PENDING', 'ACCEPTED', 'CONFIRMED')
            ORDER BY s.start_time ASC, s.id ASC
            "#,
        )
        .bind(tenant_id)
        .bind(employee_id)
        .bind(date)
        .fetch_all(executor)
        .await?;

        Ok(shifts)
    }

    /// Busca os funcionários referenciados pelo lote (para montar os nomes
    /// exibidos no relatório).
    pub async fn employees_by_ids<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        employee_ids: &[Uuid],
    ) -> Result<Vec<Employee>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, tenant_id, first_name, last_name, created_at
            FROM employees
            WHERE tenant_id = $1 AND id = ANY($2)
            ORDER BY id ASC
            "#,
        )
        .bind(tenant_id)
        .bind(employee_ids)
        .fetch_all(executor)
        .await?;

        Ok(employees)
    }
}
