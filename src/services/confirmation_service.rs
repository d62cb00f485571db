// src/services/confirmation_service.rs

use sqlx::{Postgres, Executor, Acquire};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ConfirmationRepository, SchedulingRepository},
    models::reconciliation::{AttendanceConfirmation, ConfirmationStatus},
};

/// A camada de confirmação manual do gestor. Puramente aditiva: o relatório
/// automático nunca é alterado por ela ("sistema diz no_show, gestor marcou
/// presente" é exibido como está).
#[derive(Clone)]
pub struct ConfirmationService {
    repo: ConfirmationRepository,
    scheduling_repo: SchedulingRepository,
}

impl ConfirmationService {
    pub fn new(repo: ConfirmationRepository, scheduling_repo: SchedulingRepository) -> Self {
        Self {
            repo,
            scheduling_repo,
        }
    }

    /// Confirma (ou reconfirm) uma escalação. Upsert idempotente:
    /// uma segunda chamada regrava status, autor e horário.
    pub async fn confirm<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        assignment_id: Uuid,
        status: ConfirmationStatus,
        confirmed_by: &str,
    ) -> Result<AttendanceConfirmation, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let assignment = self
            .repo
            .find_assignment(&mut *tx, tenant_id, assignment_id)
            .await?
            .ok_or(AppError::AssignmentNotFound)?;

        let confirmation = self
            .repo
            .upsert(
                &mut *tx,
                tenant_id,
                assignment.shift_id,
                assignment.id,
                assignment.employee_id,
                status,
                confirmed_by,
            )
            .await?;

        tx.commit().await?;

        Ok(confirmation)
    }

    /// Marca PRESENT para todas as escalações contadas do turno que ainda não
    /// têm confirmação; as já confirmadas ficam como estão.
    pub async fn confirm_all<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        shift_id: Uuid,
        confirmed_by: &str,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.scheduling_repo
            .find_shift(&mut *tx, tenant_id, shift_id)
            .await?
            .ok_or(AppError::ShiftNotFound)?;

        let confirmed = self
            .repo
            .confirm_missing(&mut *tx, tenant_id, shift_id, confirmed_by)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Confirmação em lote: {} escalações do turno {} marcadas como presentes",
            confirmed,
            shift_id
        );

        Ok(confirmed)
    }

    pub async fn list_for_shift<'e, E>(
        &self,
        executor: E,
        tenant_id: Uuid,
        shift_id: Uuid,
    ) -> Result<Vec<AttendanceConfirmation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .confirmations_for_shift(executor, tenant_id, shift_id)
            .await
    }
}
