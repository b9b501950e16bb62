use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use usergraph_server::storage::UserStore;
use usergraph_server::{assemble, observability, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    observability::init_tracing(config.log_format)?;

    let store = Arc::new(UserStore::seeded());
    info!(users = store.len(), environment = ?config.environment, "starting usergraph-server");

    let mut module = assemble(&config, store);
    module.start().await?;

    if let Err(e) = module.serve(shutdown_signal()).await {
        error!(error = %e, "server terminated with error");
        return Err(e);
    }
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("shutdown signal received");
}
