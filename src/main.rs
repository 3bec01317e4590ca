use std::{env, sync::Arc};

use anyhow::Result;
use log::{error, info};
use nyumba::{
    cli::{self, Command},
    config::{self, Config},
    logger::setup_logger,
    services::{audit, normalize},
    web::{self, AppState},
};
use tokio::sync::broadcast;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    setup_logger()?;

    let command = cli::parse_args(env::args().skip(1))?;
    let config: Arc<Config> = Arc::new(config::read_config());

    match command {
        Command::Serve => {
            let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Received Ctrl-C, shutting down");
                    let _ = shutdown_tx.send(());
                }
            });

            if let Err(err) = web::start_http_server(AppState { config }, shutdown_rx).await {
                error!("Error: {:?}", err);
                return Err(err);
            }
        }
        Command::Normalize { dry_run } => {
            tokio::task::spawn_blocking(move || normalize::run_normalization(&config, dry_run))
                .await??;
        }
        Command::Audit => {
            tokio::task::spawn_blocking(move || audit::run_audit(&config)).await??;
        }
    }

    Ok(())
}
