//! # Schema Initializer
//!
//! Ensures the `products` table exists.
//!
//! ## Startup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Check                                       │
//! │                                                                         │
//! │  Database::new()                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CREATE TABLE IF NOT EXISTS products (...)                             │
//! │       │                                                                 │
//! │       ├── Table missing?  Created empty                                │
//! │       │                                                                 │
//! │       └── Table present?  No-op, rows untouched                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Record operations may run                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A pre-existing table with a different shape is left as is. Its rows are
//! never migrated.

use sqlx::SqlitePool;
use tracing::{debug, error};

use crate::error::{DbError, DbResult};

/// DDL for the single product table.
///
/// `AUTOINCREMENT` keeps a deleted highest id from being handed out again.
pub const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT,
    description TEXT,
    quantity    INTEGER,
    price       REAL
)
"#;

/// Creates the products table if it doesn't exist yet.
///
/// ## Safety
/// - Idempotent: safe to run on every startup
/// - Never alters existing rows
///
/// ## Example
/// ```rust,ignore
/// ensure_schema(&pool).await?;
/// ```
pub async fn ensure_schema(pool: &SqlitePool) -> DbResult<()> {
    debug!("Ensuring products table exists");

    sqlx::query(CREATE_PRODUCTS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to create products table");
            DbError::SchemaCreationFailed(e.to_string())
        })?;

    Ok(())
}
