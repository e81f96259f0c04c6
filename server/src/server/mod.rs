//! HTTP server module for the todo application.
//!
//! - Application state management
//! - Router configuration
//! - Health check endpoints
//! - Startup and graceful shutdown
//!
//! # Graceful Shutdown
//!
//! When a shutdown signal is received (Ctrl+C or SIGTERM):
//! 1. HTTP server stops accepting new connections and drains in-flight requests
//! 2. The database pool is closed (bounded by the configured shutdown timeout)

pub mod health;
pub mod routes;
pub mod state;

pub use health::health_check;
pub use routes::build_router;
pub use state::AppState;

use crate::config::Config;
use std::sync::Arc;
use tracing::{info, warn};
use todo_sqlite::SqliteTodoStore;

/// A configured application, bound to its listening socket and ready to run.
pub struct Application {
    listener: tokio::net::TcpListener,
    app: axum::Router,
    store: SqliteTodoStore,
    config: Config,
}

impl Application {
    /// Open the database, build the router, and bind the listener.
    ///
    /// # Errors
    ///
    /// Returns an error if the bind address is invalid, the database cannot
    /// be opened, the templates fail to compile, or the port cannot be bound.
    pub async fn build(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let addr = config.bind_addr()?;

        let store = SqliteTodoStore::connect(&config.database).await?;
        let state = AppState::new(Arc::new(store.clone()))?;
        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind(addr).await?;

        Ok(Self {
            listener,
            app,
            store,
            config,
        })
    }

    /// Address the server is listening on.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket address cannot be read.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve requests until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP server fails.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        info!(address = %self.local_addr()?, "HTTP server listening for requests");
        info!("  GET    /                 - Todo page");
        info!("  GET    /api/todos        - List todos");
        info!("  POST   /api/todos        - Create todo");
        info!("  PATCH  /api/todos/:id    - Update todo");
        info!("  DELETE /api/todos/:id    - Delete todo");

        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("HTTP server stopped, closing database");

        let timeout = self.config.shutdown_timeout();
        if tokio::time::timeout(timeout, self.store.pool().close())
            .await
            .is_err()
        {
            warn!(timeout_secs = timeout.as_secs(), "Database close timed out");
        }

        info!("Graceful shutdown complete");
        Ok(())
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        () = terminate => {
            info!("Received SIGTERM signal");
        }
    }
}
