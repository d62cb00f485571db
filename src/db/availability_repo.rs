// src/db/availability_repo.rs

use sqlx::{PgPool, Postgres, Executor};
use uuid::Uuid;
use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    models::availability::{AvailabilityConfig, AvailabilityOverride},
};

#[derive(Clone)]
pub struct AvailabilityRepository {
    pool: PgPool,
}

impl AvailabilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Exceção por data exata (no máximo uma, garantido pela UNIQUE).
    pub async fn override_for_date<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<AvailabilityOverride>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, AvailabilityOverride>(
            r#"
            SELECT id, tenant_id, employee_id, date, available, reason, created_at
            FROM availability_overrides
            WHERE tenant_id = $1 AND employee_id = $2 AND date = $3
            "#,
        )
        .bind(tenant_id)
        .bind(employee_id)
        .bind(date)
        .fetch_optional(executor)
        .await?;

        Ok(row)
    }

    /// Regras recorrentes do funcionário cuja vigência inclui a data.
    /// A ordem por created_at torna determinística a escolha da regra
    /// que fornece o motivo quando mais de uma bloqueia.
    pub async fn configs_effective_on<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<AvailabilityConfig>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let configs = sqlx::query_as::<_, AvailabilityConfig>(
            r#"
            SELECT id, tenant_id, employee_id, weekdays, start_time, end_time,
                   effective_from, effective_to, reason, created_at
            FROM availability_configs
            WHERE tenant_id = $1
              AND employee_id = $2
              AND (effective_from IS NULL OR effective_from <= $3)
              AND (effective_to IS NULL OR effective_to >= $3)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(tenant_id)
        .bind(employee_id)
        .bind(date)
        .fetch_all(executor)
        .await?;

        Ok(configs)
    }
}
