// src/config.rs

use crate::{
    db::{
        AvailabilityRepository, ConfirmationRepository, SchedulingRepository,
        TimesheetRepository,
    },
    services::{
        AvailabilityService, ConfirmationService, ReconciliationService, SchedulingService,
    },
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub availability_service: AvailabilityService,
    pub scheduling_service: SchedulingService,
    pub reconciliation_service: ReconciliationService,
    pub confirmation_service: ConfirmationService,
}

impl AppState {
    // A assinatura retorna um Result!
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?; // <-- Se falhar, retorna um Err em vez de dar panic ou exit

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let scheduling_repo = SchedulingRepository::new(db_pool.clone());
        let timesheet_repo = TimesheetRepository::new(db_pool.clone());
        let availability_repo = AvailabilityRepository::new(db_pool.clone());
        let confirmation_repo = ConfirmationRepository::new(db_pool.clone());

        let availability_service = AvailabilityService::new(availability_repo);
        let scheduling_service = SchedulingService::new(scheduling_repo.clone());
        let reconciliation_service = ReconciliationService::new(
            scheduling_repo.clone(),
            timesheet_repo,
            confirmation_repo.clone(),
        );
        let confirmation_service = ConfirmationService::new(confirmation_repo, scheduling_repo);

        // Retorna Ok com o estado montado
        Ok(Self {
            db_pool,
            availability_service,
            scheduling_service,
            reconciliation_service,
            confirmation_service,
        })
    }
}
