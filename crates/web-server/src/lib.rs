use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, put},
    Router,
};
use configuration::Settings;
use core_types::SystemClock;
use service::{TrialGateway, TrialService};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod dto;
pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub service: TrialService,
}

/// Builds the application routes around `state`.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/v1/trials",
            get(handlers::list_trials).post(handlers::create_trial),
        )
        .route("/v1/trials/status/:status", get(handlers::list_trials_by_status))
        .route("/v1/trials/statistics", get(handlers::get_statistics))
        .route("/v1/trials/update", put(handlers::update_trial))
        .route("/v1/trials/update-status", put(handlers::update_trial_status))
        .route("/v1/trials/delete/:id", delete(handlers::delete_trial))
        .with_state(state)
        .layer(cors)
        // Logs every incoming request and its response status.
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024))
}

/// Opens the configured store and wires the service used by the handlers.
pub async fn build_state(settings: &Settings) -> anyhow::Result<AppState> {
    let store = database::open_store(&settings.database).await?;
    let gateway = TrialGateway::new(store, Arc::new(SystemClock));
    let service = TrialService::new(
        gateway,
        settings.trials.clone(),
        settings.pagination.clone(),
    );
    Ok(AppState { service })
}

/// The main function to configure and run the web server.
///
/// Tracing must already be initialised by the caller.
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;
    let app_state = Arc::new(build_state(&settings).await?);
    let app = router(app_state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
