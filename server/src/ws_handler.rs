use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use common::{ClientMessage, ErrorCode, MatchStatus, ServerMessage, Username, log, log_debug};

use crate::errors::MatchError;
use crate::session_registry::{MatchRequestOutcome, StateQuery};
use crate::web_server::WebServerState;

pub async fn handle_websocket(socket: WebSocket, state: WebServerState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    let (tx, mut rx) = mpsc::channel::<ServerMessage>(128);

    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let text = match serde_json::to_string(&msg) {
                Ok(text) => text,
                Err(e) => {
                    log!("Failed to encode ServerMessage: {}", e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    log_debug!("WebSocket client connected");

    while let Some(result) = ws_receiver.next().await {
        let text = match result {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                log_debug!("WebSocket receive error: {}", e);
                break;
            }
        };

        let response = match serde_json::from_str::<ClientMessage>(text.as_str()) {
            Ok(message) => handle_client_message(&state, message).await,
            Err(e) => error_message(ErrorCode::MalformedMessage, format!("Failed to decode message: {}", e)),
        };

        if tx.send(response).await.is_err() {
            break;
        }
    }

    drop(tx);
    let _ = send_task.await;
    log_debug!("WebSocket client disconnected");
}

pub async fn handle_client_message(state: &WebServerState, message: ClientMessage) -> ServerMessage {
    match message {
        ClientMessage::Register { username } => {
            if let Some(reason) = state.policy.validate(&username) {
                return error_message(ErrorCode::PolicyRejected, reason);
            }
            let username = Username::new(username);
            match state.registry.register(&username).await {
                Ok(()) => ServerMessage::Registered { username },
                Err(err) => match_error(err),
            }
        }
        ClientMessage::Queue { username } => {
            match state.registry.request_match(&Username::new(username)).await {
                Ok(MatchRequestOutcome::Queued) => ServerMessage::Queued,
                Ok(MatchRequestOutcome::Paired(snapshot)) => ServerMessage::Paired { snapshot },
                Err(err) => match_error(err),
            }
        }
        ClientMessage::Move { username, row, col } => {
            match state.registry.submit_move(&Username::new(username), row, col).await {
                Ok(snapshot) => ServerMessage::MoveApplied { snapshot },
                Err(err) => match_error(err),
            }
        }
        ClientMessage::State { username } => {
            match state.registry.query_state(&Username::new(username)).await {
                Ok(StateQuery::InProgress(snapshot)) => ServerMessage::GameState {
                    status: MatchStatus::InProgress,
                    snapshot,
                },
                Ok(StateQuery::Concluded(snapshot)) => ServerMessage::GameState {
                    status: MatchStatus::Concluded,
                    snapshot,
                },
                Ok(StateQuery::Cleared) => ServerMessage::Cleared,
                Err(err) => match_error(err),
            }
        }
        ClientMessage::ListUsers => ServerMessage::Users {
            users: state.registry.list_users().await,
        },
    }
}

fn match_error(err: MatchError) -> ServerMessage {
    error_message(err.code(), err.to_string())
}

fn error_message(code: ErrorCode, message: String) -> ServerMessage {
    ServerMessage::Error { code, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::PlayerStats;
    use crate::session_registry::SessionRegistry;
    use crate::username_policy::UsernamePolicy;

    fn state() -> WebServerState {
        WebServerState::new(SessionRegistry::new(), UsernamePolicy::default())
    }

    fn register(name: &str) -> ClientMessage {
        ClientMessage::Register { username: name.to_string() }
    }

    fn queue(name: &str) -> ClientMessage {
        ClientMessage::Queue { username: name.to_string() }
    }

    #[tokio::test]
    async fn test_register_and_policy_rejection() {
        let state = state();
        assert_eq!(
            handle_client_message(&state, register("alice")).await,
            ServerMessage::Registered { username: Username::new("alice") }
        );
        assert!(matches!(
            handle_client_message(&state, register("alice")).await,
            ServerMessage::Error { code: ErrorCode::AlreadyExists, .. }
        ));
        assert!(matches!(
            handle_client_message(&state, register("a")).await,
            ServerMessage::Error { code: ErrorCode::PolicyRejected, .. }
        ));
    }

    #[tokio::test]
    async fn test_pairing_and_moves() {
        let state = state();
        handle_client_message(&state, register("alice")).await;
        handle_client_message(&state, register("bob")).await;

        assert_eq!(handle_client_message(&state, queue("alice")).await, ServerMessage::Queued);
        assert!(matches!(
            handle_client_message(&state, queue("bob")).await,
            ServerMessage::Paired { .. }
        ));

        let applied = handle_client_message(
            &state,
            ClientMessage::Move { username: "alice".to_string(), row: 1, col: 1 },
        )
        .await;
        assert!(matches!(applied, ServerMessage::MoveApplied { .. }));

        let rejected = handle_client_message(
            &state,
            ClientMessage::Move { username: "bob".to_string(), row: 5, col: 1 },
        )
        .await;
        assert!(matches!(rejected, ServerMessage::Error { code: ErrorCode::InvalidMove, .. }));

        assert!(matches!(
            handle_client_message(&state, ClientMessage::State { username: "bob".to_string() }).await,
            ServerMessage::GameState { status: MatchStatus::InProgress, .. }
        ));
    }

    #[tokio::test]
    async fn test_state_without_session() {
        let state = state();
        assert!(matches!(
            handle_client_message(&state, ClientMessage::State { username: "alice".to_string() }).await,
            ServerMessage::Error { code: ErrorCode::NoActiveSession, .. }
        ));
    }

    #[tokio::test]
    async fn test_list_users() {
        let state = state();
        handle_client_message(&state, register("alice")).await;
        match handle_client_message(&state, ClientMessage::ListUsers).await {
            ServerMessage::Users { users } => {
                assert_eq!(users.get(&Username::new("alice")), Some(&PlayerStats::default()));
            }
            other => panic!("unexpected response {:?}", other),
        }
    }
}
