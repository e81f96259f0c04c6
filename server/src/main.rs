//! Todo server binary.
//!
//! # Usage
//!
//! ```bash
//! # Defaults: 0.0.0.0:3000, ./todos.db
//! cargo run -p todo-server
//!
//! # Override via environment (or a .env file)
//! PORT=8080 DATABASE_PATH=/var/lib/todo/todos.db cargo run -p todo-server
//! ```

use todo_server::{init_tracing, Application, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();
    init_tracing(&config.server.log_level);

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        database = %config.database.path.display(),
        "Configuration loaded"
    );

    let app = Application::build(config).await?;
    app.run().await?;

    Ok(())
}
