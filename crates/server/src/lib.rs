//! Ranked-choice poll backend.
//!
//! Serves a GraphQL API on `/api/graphql` for creating polls and reading
//! them back. Every GraphQL request carries the caller's [`VoterIdentity`],
//! and browsers without an `id` cookie are handed one on the way out.

use std::{net::SocketAddr, sync::Arc};

use async_graphql::http::GraphiQLSource;
use axum::{
    Json, Router,
    extract::{ConnectInfo, State},
    http::HeaderMap,
    response::{Html, IntoResponse},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use tokio::{net::TcpListener, signal::ctrl_c};
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod schema;
pub mod store;

use config::Config;
use identity::VoterIdentity;
use schema::{PollSchema, build_schema};
use store::Store;

const GRAPHQL_PATH: &str = "/api/graphql";

pub struct AppState {
    pub schema: PollSchema,
    pub store: Store,
}

impl AppState {
    pub fn new(store: Store) -> Arc<Self> {
        Arc::new(Self {
            schema: build_schema(store.clone()),
            store,
        })
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(GRAPHQL_PATH, get(graphiql).post(graphql_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load();

    let store = Store::connect(&config).await?;
    let state = AppState::new(store);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on http://{address}");

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shut down");
    Ok(())
}

async fn root() -> &'static str {
    "Ranked Choice Polls - POST GraphQL to /api/graphql, /health to check status"
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = match state.store.ping().await {
        Some(true) => "connected",
        Some(false) => "disconnected",
        None => "memory",
    };

    match state.store.count().await {
        Ok(polls) => Json(serde_json::json!({
            "status": "ok",
            "database": database,
            "polls": polls
        })),
        Err(_) => Json(serde_json::json!({
            "status": "error",
            "database": database
        })),
    }
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

async fn graphql_handler(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Json(request): Json<async_graphql::Request>,
) -> (CookieJar, Json<async_graphql::Response>) {
    let peer = connect_info.map(|ConnectInfo(addr)| addr);
    let (jar, identity) = VoterIdentity::resolve(jar, &headers, peer);

    let response = state.schema.execute(request.data(identity)).await;

    (jar, Json(response))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
