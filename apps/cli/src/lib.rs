//! # stockroom-cli: Interactive Inventory Manager
//!
//! Menu-driven front end over the `products` table.
//!
//! ## Application Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stockroom Startup Sequence                         │
//! │                                                                         │
//! │  1. Initialize Logging (main.rs) ──────────────────────────────────────►│
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • Default: WARN, can be overridden with RUST_LOG                    │
//! │                                                                         │
//! │  2. Load Configuration ────────────────────────────────────────────────►│
//! │     • STOCKROOM_* environment variables, defaults otherwise             │
//! │                                                                         │
//! │  3. Open Database ─────────────────────────────────────────────────────►│
//! │     • One SQLite handle, products table created if missing              │
//! │                                                                         │
//! │  4. Run Menu ──────────────────────────────────────────────────────────►│
//! │     • Until "8. Exit" or end of input                                   │
//! │                                                                         │
//! │  5. Close Database ────────────────────────────────────────────────────►│
//! │     • On every exit path after a successful open                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod menu;

use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{error, info};

use config::AppConfig;
use console::Console;
use error::CliResult;
use menu::Menu;
use stockroom_db::{Database, DbError};

/// Opens the database, runs the menu, then closes the handle.
///
/// A failure to open, prepare or query the database is returned before
/// any prompt is shown.
pub async fn run<R, W, E>(config: &AppConfig, console: Console<R, W, E>) -> CliResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    E: AsyncWrite + Unpin,
{
    info!(path = %config.database_path.display(), "Opening database");

    let db = Database::new(config.db_config()).await.map_err(|e| {
        error!(error = %e, "Failed to open database");
        e
    })?;

    if !db.health_check().await {
        error!("Database opened but cannot run queries");
        db.close().await;
        return Err(DbError::ConnectionFailed("health check failed".to_string()).into());
    }

    let mut menu = Menu::new(db.clone(), console);
    let result = menu.run().await;

    db.close().await;
    info!("Database closed");

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use stockroom_db::DbConfig;

    fn console(input: &[u8]) -> Console<&[u8], Vec<u8>, Vec<u8>> {
        Console::new(input, Vec::new(), Vec::new())
    }

    fn config_for(path: std::path::PathBuf) -> AppConfig {
        AppConfig {
            database_path: path,
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_run_persists_between_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path().join("inventory.db"));

        run(&config, console(b"1\nWidget\nBlue\n3\n15.5\n8\n"))
            .await
            .unwrap();

        let db = Database::new(DbConfig::new(dir.path().join("inventory.db")))
            .await
            .unwrap();
        let stored = db.products().get_by_id(1).await.unwrap().unwrap();
        assert_eq!(stored.name, "Widget");
        assert_eq!(stored.price, 15.5);
        db.close().await;
    }

    #[tokio::test]
    async fn test_run_fails_before_prompting_when_open_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path().join("missing").join("inventory.db"));

        let result = run(&config, console(b"4\n8\n")).await;

        assert!(matches!(
            result,
            Err(CliError::Db(DbError::ConnectionFailed(_)))
        ));
    }

    #[tokio::test]
    async fn test_run_exits_cleanly_on_end_of_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path().join("inventory.db"));

        assert!(run(&config, console(b"")).await.is_ok());
    }
}
