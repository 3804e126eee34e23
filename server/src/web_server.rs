use std::sync::Arc;
use axum::{
    Router,
    extract::{State, WebSocketUpgrade},
    response::IntoResponse,
    routing::{delete, get, post},
};
use tower_http::cors::{Any, CorsLayer};
use common::log;

use crate::api_handlers;
use crate::session_registry::SessionRegistry;
use crate::username_policy::UsernamePolicy;
use crate::ws_handler::handle_websocket;

#[derive(Clone)]
pub struct WebServerState {
    pub registry: SessionRegistry,
    pub policy: Arc<UsernamePolicy>,
}

impl WebServerState {
    pub fn new(registry: SessionRegistry, policy: UsernamePolicy) -> Self {
        Self {
            registry,
            policy: Arc::new(policy),
        }
    }
}

pub fn build_router(state: WebServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(api_handlers::health))
        .route("/api/register/{username}", post(api_handlers::register))
        .route("/api/users/{username}", delete(api_handlers::unregister))
        .route("/api/queue/{username}", post(api_handlers::queue_up))
        .route("/api/make_move/tictactoe/{username}", post(api_handlers::make_move))
        .route("/api/gamestate/{username}", get(api_handlers::game_state))
        .route("/api/users", get(api_handlers::list_users))
        .route("/ws", get(ws_upgrade_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn run_web_server(
    state: WebServerState,
    bind_address: &str,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    log!("Web server listening on {}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal)
        .await
}

async fn ws_upgrade_handler(
    ws: WebSocketUpgrade,
    State(state): State<WebServerState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}
