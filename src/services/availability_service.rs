// src/services/availability_service.rs

use sqlx::{Postgres, Executor, Acquire};
use uuid::Uuid;
use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    db::AvailabilityRepository,
    models::availability::{AvailabilityConfig, AvailabilityDecision, AvailabilityOverride},
};

#[derive(Clone)]
pub struct AvailabilityService {
    repo: AvailabilityRepository,
}

impl AvailabilityService {
    pub fn new(repo: AvailabilityRepository) -> Self {
        Self { repo }
    }

    /// O funcionário está disponível nesta data, e se não, por quê?
    /// 1. Exceção na data exata é soberana (ignora as regras recorrentes).
    /// 2. Senão, qualquer regra recorrente vigente que bloqueie o dia da
    ///    semana torna o funcionário indisponível.
    /// 3. Sem exceção e sem regra bloqueando: disponível.
    pub async fn resolve<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> Result<AvailabilityDecision, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // Duas leituras sobre o mesmo snapshot
        let mut tx = executor.begin().await?;

        let override_row = self
            .repo
            .override_for_date(&mut *tx, tenant_id, employee_id, date)
            .await?;

        let configs = self
            .repo
            .configs_effective_on(&mut *tx, tenant_id, employee_id, date)
            .await?;

        tx.commit().await?;

        Ok(resolve_from_rules(date, override_row.as_ref(), &configs))
    }
}

/// Resolução pura sobre as regras já buscadas.
pub fn resolve_from_rules(
    date: NaiveDate,
    override_row: Option<&AvailabilityOverride>,
    configs: &[AvailabilityConfig],
) -> AvailabilityDecision {
    if let Some(ov) = override_row {
        return if ov.available {
            AvailabilityDecision::available()
        } else {
            AvailabilityDecision::unavailable(ov.reason.clone())
        };
    }

    match blocking_config(date, configs) {
        Some(config) => AvailabilityDecision::unavailable(config.reason.clone()),
        None => AvailabilityDecision::available(),
    }
}

/// Política de precedência entre regras recorrentes: "qualquer bloqueio
/// vence". É uma função nomeada de propósito, para a regra poder ser trocada
/// num lugar só se o produto decidir outra precedência.
pub fn blocking_config(
    date: NaiveDate,
    configs: &[AvailabilityConfig],
) -> Option<&AvailabilityConfig> {
    configs
        .iter()
        .find(|c| c.is_effective_on(date) && c.blocks_date(date))
}
