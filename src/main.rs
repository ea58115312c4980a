use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use salesops_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let sms_api = Router::new()
        .route("/api/sms/send", post(routes::sms::send_sms))
        .route("/api/sms/messages", get(routes::sms::list_messages))
        .route("/api/sms/messages/:id", get(routes::sms::get_message))
        .layer(axum::middleware::from_fn_with_state(
            salesops_backend::middleware::rate_limit::new_rps_state(config.api_rps),
            salesops_backend::middleware::rate_limit::rps_middleware,
        ));

    // No rate limiting and no auth here: the provider cannot carry bearer
    // tokens and must always get a 2xx acknowledgment.
    let webhook_api = Router::new().route(
        "/api/webhook/justcall",
        post(routes::webhook::handle_justcall),
    );

    let app = base_routes
        .merge(sms_api)
        .merge(webhook_api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
