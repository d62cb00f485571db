// src/db/confirmation_repo.rs

use sqlx::{PgPool, Postgres, Executor};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::reconciliation::{AttendanceConfirmation, ConfirmationStatus},
    models::scheduling::Assignment,
};

#[derive(Clone)]
pub struct ConfirmationRepository {
    pool: PgPool,
}

impl ConfirmationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A escalação alvo de uma confirmação, validando o tenant junto.
    pub async fn find_assignment<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        assignment_id: Uuid,
    ) -> Result<Option<Assignment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            SELECT id, tenant_id, shift_id, employee_id, status, created_at
            FROM shift_assignments
            WHERE tenant_id = $1 AND id = $2
            "#,
        )
        .bind(tenant_id)
        .bind(assignment_id)
        .fetch_optional(executor)
        .await?;

        Ok(assignment)
    }

    /// Upsert idempotente por escalação: uma segunda confirmação regrava
    /// status, autor e horário (last-write-wins).
    pub async fn upsert<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        shift_id: Uuid,
        assignment_id: Uuid,
        employee_id: Uuid,
        status: ConfirmationStatus,
        confirmed_by: &str,
    ) -> Result<AttendanceConfirmation, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let confirmation = sqlx::query_as::<_, AttendanceConfirmation>(
            r#"
            INSERT INTO attendance_confirmations
                (tenant_id, shift_id, assignment_id, employee_id, status, confirmed_by, confirmed_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (assignment_id) DO UPDATE
            SET status       = EXCLUDED.status,
                confirmed_by = EXCLUDED.confirmed_by,
                confirmed_at = NOW()
            RETURNING id, tenant_id, shift_id, assignment_id, employee_id,
                      status, confirmed_by, confirmed_at
            "#,
        )
        .bind(tenant_id)
        .bind(shift_id)
        .bind(assignment_id)
        .bind(employee_id)
        .bind(status)
        .bind(confirmed_by)
        .fetch_one(executor)
        .await?;

        Ok(confirmation)
    }

    /// "Confirmar todos": marca PRESENT para cada escalação contada do turno
    /// que ainda não tem confirmação. As já confirmadas (present ou absent)
    /// não são tocadas. Retorna quantas foram criadas.
    pub async fn confirm_missing<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        shift_id: Uuid,
        confirmed_by: &str,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance_confirmations
                (tenant_id, shift_id, assignment_id, employee_id, status, confirmed_by)
            SELECT a.tenant_id, a.shift_id, a.id, a.employee_id,
                   'PRESENT'::confirmation_status, $3
            FROM shift_assignments a
            WHERE a.tenant_id = $1
              AND a.shift_id = $2
              AND a.status IN ('PENDING', 'ACCEPTED', 'CONFIRMED')
              AND NOT EXISTS (
                  SELECT 1 FROM attendance_confirmations c
                  WHERE c.assignment_id = a.id
              )
            "#,
        )
        .bind(tenant_id)
        .bind(shift_id)
        .bind(confirmed_by)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn confirmations_for_shift<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        shift_id: Uuid,
    ) -> Result<Vec<AttendanceConfirmation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let confirmations = sqlx::query_as::<_, AttendanceConfirmation>(
            r#"
            SELECT id, tenant_id, shift_id, assignment_id, employee_id,
                   status, confirmed_by, confirmed_at
            FROM attendance_confirmations
            WHERE tenant_id = $1 AND shift_id = $2
            ORDER BY confirmed_at ASC, id ASC
            "#,
        )
        .bind(tenant_id)
        .bind(shift_id)
        .fetch_all(executor)
        .await?;

        Ok(confirmations)
    }

    /// A camada manual exibida lado a lado com o relatório automático.
    pub async fn confirmations_for_shifts<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        shift_ids: &[Uuid],
    ) -> Result<Vec<AttendanceConfirmation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let confirmations = sqlx::query_as::<_, AttendanceConfirmation>(
            r#"
            SELECT id, tenant_id, shift_id, assignment_id, employee_id,
                   status, confirmed_by, confirmed_at
            FROM attendance_confirmations
            WHERE tenant_id = $1 AND shift_id = ANY($2)
            ORDER BY shift_id ASC, confirmed_at ASC, id ASC
            "#,
        )
        .bind(tenant_id)
        .bind(shift_ids)
        .fetch_all(executor)
        .await?;

        Ok(confirmations)
    }
}
