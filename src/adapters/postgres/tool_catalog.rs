//! PostgreSQL implementation of ToolCatalog.
//!
//! Reads the `tools` table maintained by the registration service. Interface
//! descriptor columns are read as text and parsed as JSON so that both
//! `json`/`jsonb` and plain `text` columns are accepted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::{debug, error};

use crate::config::DatabaseConfig;
use crate::domain::catalog::Tool;
use crate::domain::foundation::Timestamp;
use crate::ports::{CatalogError, ToolCatalog};

const SELECT_COLUMNS: &str = r#"
    SELECT id::BIGINT AS id, uuid, name, version, description,
           engine_interface::TEXT AS engine_interface,
           provider_interface::TEXT AS provider_interface,
           created_at, updated_at
    FROM tools
"#;

/// Creates a connection pool sized from configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(config.idle_timeout())
        .max_lifetime(config.max_lifetime())
        .connect(&config.url)
        .await
}

/// PostgreSQL implementation of ToolCatalog.
#[derive(Clone)]
pub struct PostgresToolCatalog {
    pool: PgPool,
}

impl PostgresToolCatalog {
    /// Creates a new PostgresToolCatalog.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool from configuration and wraps it.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, CatalogError> {
        let pool = create_pool(config).await.map_err(|e| {
            error!(error = %e, "failed to connect to catalog database");
            CatalogError::unavailable(format!("Failed to connect: {}", e))
        })?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ToolCatalog for PostgresToolCatalog {
    async fn list_all(&self) -> Result<Vec<Tool>, CatalogError> {
        let query = format!("{} ORDER BY created_at DESC", SELECT_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CatalogError::unavailable(format!("Failed to list tools: {}", e)))?;

        debug!(count = rows.len(), "loaded tools from catalog");
        rows.into_iter().map(row_to_tool).collect()
    }

    async fn find_by_name(&self, name: &str) -> Result<Tool, CatalogError> {
        let query = format!("{} WHERE name = $1 LIMIT 1", SELECT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| CatalogError::unavailable(format!("Failed to fetch tool: {}", e)))?;

        match row {
            Some(row) => row_to_tool(row),
            None => Err(CatalogError::not_found(name)),
        }
    }
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, CatalogError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| CatalogError::unavailable(format!("Failed to get {}: {}", name, e)))
}

fn row_to_tool(row: PgRow) -> Result<Tool, CatalogError> {
    let id: i64 = column(&row, "id")?;
    let uuid: uuid::Uuid = column(&row, "uuid")?;
    let name: String = column(&row, "name")?;
    let version: String = column(&row, "version")?;
    let description: Option<String> = column(&row, "description")?;
    let engine_interface: Option<String> = column(&row, "engine_interface")?;
    let provider_interface: Option<String> = column(&row, "provider_interface")?;
    let created_at: DateTime<Utc> = column(&row, "created_at")?;
    let updated_at: DateTime<Utc> = column(&row, "updated_at")?;

    let mut tool = Tool::new(id, name, version)
        .with_uuid(uuid)
        .with_interfaces(
            parse_descriptor(engine_interface.as_deref()),
            parse_descriptor(provider_interface.as_deref()),
        )
        .with_timestamps(
            Timestamp::from_datetime(created_at),
            Timestamp::from_datetime(updated_at),
        );
    tool.description = description;
    Ok(tool)
}

/// Parses a descriptor column; non-JSON text is kept as a JSON string.
fn parse_descriptor(raw: Option<&str>) -> serde_json::Value {
    match raw {
        None => serde_json::Value::Null,
        Some(text) => serde_json::from_str(text)
            .unwrap_or_else(|_| serde_json::Value::String(text.to_string())),
    }
}
