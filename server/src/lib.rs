pub mod api_handlers;
pub mod cleanup_task;
pub mod errors;
pub mod match_session;
pub mod matchmaking_queue;
pub mod server_config;
pub mod session_registry;
pub mod user_directory;
pub mod username_policy;
pub mod web_server;
pub mod ws_handler;
