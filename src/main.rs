use std::error::Error;
use std::sync::Arc;

use recipe_box::config::Config;
use recipe_box::service::http;
use recipe_box::{handlers, InMemoryDocumentStore, InMemoryObjectStore, RecipeBox, SessionStore};
use tokio::signal::ctrl_c;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::from_env()?;
    info!(addr = %config.addr, public_url = %config.public_url, "starting recipe box");

    let app = RecipeBox::new(
        InMemoryDocumentStore::new(),
        Arc::new(InMemoryObjectStore::new(config.public_url.clone())),
    )
    .with_bcrypt_cost(config.bcrypt_cost);
    let service = Arc::new(handlers::service(app));

    http::serve(service, SessionStore::new(), &config.addr, shutdown_signal()).await?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(err) => {
                warn!(error = %err, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(err) => {
                warn!(error = %err, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
