use clap::Parser;
use common::{log, log_error, logger};
use onevone_server::cleanup_task::CleanupTask;
use onevone_server::server_config::{DEFAULT_CONFIG_FILE_NAME, get_config_manager};
use onevone_server::session_registry::SessionRegistry;
use onevone_server::username_policy::UsernamePolicy;
use onevone_server::web_server::{WebServerState, run_web_server};

#[derive(Parser)]
#[command(name = "onevone_server")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE_NAME)]
    config: String,

    #[arg(long)]
    use_log_prefix: bool,

    /// Overrides `bind_address` from the config file.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = get_config_manager(&args.config).get_config()?;

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, config.log_level);

    let registry = SessionRegistry::new();
    let policy = UsernamePolicy::new(&config.username_policy);

    let cleanup_task = CleanupTask::new(registry.clone(), &config.cleanup);
    tokio::spawn(async move {
        cleanup_task.run().await;
    });

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log_error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        log!("Shutdown signal received");
    };

    let bind_address = args.bind.unwrap_or(config.bind_address);
    run_web_server(WebServerState::new(registry, policy), &bind_address, shutdown_signal).await?;

    log!("Server shut down gracefully");

    Ok(())
}
