//src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Checagens de momento de escalação (antes de salvar um turno)
    let availability_routes = Router::new()
        .route("/employees/{employee_id}", get(handlers::availability::resolve_availability));

    let scheduling_routes = Router::new()
        .route("/conflicts", post(handlers::scheduling::check_conflicts));

    // Leituras pós-fato sobre o período (relatórios e exportação)
    let reconciliation_routes = Router::new()
        .route("/report", get(handlers::reconciliation::get_report))
        .route("/coverage", get(handlers::reconciliation::get_coverage))
        .route("/export", get(handlers::reconciliation::export_report));

    // Camada manual do gestor
    let attendance_routes = Router::new()
        .route("/confirmations", post(handlers::attendance::confirm_attendance))
        .route("/shifts/{shift_id}/confirm-all", post(handlers::attendance::confirm_all))
        .route("/shifts/{shift_id}/confirmations", get(handlers::attendance::list_confirmations));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/availability", availability_routes)
        .nest("/api/scheduling", scheduling_routes)
        .nest("/api/reconciliation", reconciliation_routes)
        .nest("/api/attendance", attendance_routes)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
