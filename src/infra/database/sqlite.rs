//! SQLite database client implementation.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{info, instrument};

use crate::domain::{AppError, Client, ClientFields, ClientId, ClientRepository, DatabaseError};

const CREATE_CLIENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS clientes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nome TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        telefone TEXT NOT NULL,
        cpf TEXT NOT NULL UNIQUE,
        data_cadastro DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
    )
"#;

/// SQLite connection pool configuration
#[derive(Debug, Clone)]
pub struct SqliteConfig {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(3),
        }
    }
}

/// SQLite database client with connection pooling
///
/// The pool is the single shared handle to the store: opened once at
/// startup, passed to the service by `Arc`, and closed with [`close`](Self::close).
pub struct SqliteClient {
    pool: SqlitePool,
}

impl SqliteClient {
    /// Open (creating the file if needed) and initialize the clients table.
    pub async fn new(database_url: &str, config: SqliteConfig) -> Result<Self, AppError> {
        info!(database_url, "Connecting to SQLite...");
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;
        info!("Connected to SQLite");

        let client = Self { pool };
        client.init_schema().await?;
        Ok(client)
    }

    /// Create a new SQLite client with default configuration
    pub async fn with_defaults(database_url: &str) -> Result<Self, AppError> {
        Self::new(database_url, SqliteConfig::default()).await
    }

    /// Open a private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` sees its own database, so the
    /// pool is pinned to exactly one connection that never expires.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;

        let client = Self { pool };
        client.init_schema().await?;
        Ok(client)
    }

    /// Create the clients table if it does not exist yet.
    async fn init_schema(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_CLIENTS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Close every pooled connection. Subsequent calls fail with a
    /// connection error.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("SQLite pool closed");
    }

    /// Get the underlying connection pool (for testing)
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Parse a database row into a Client
    fn row_to_client(row: &SqliteRow) -> Result<Client, AppError> {
        let registered_at: NaiveDateTime = row.try_get("data_cadastro")?;

        Ok(Client {
            id: row.try_get("id")?,
            name: row.try_get("nome")?,
            email: row.try_get("email")?,
            phone: row.try_get("telefone")?,
            tax_id: row.try_get("cpf")?,
            registered_at: registered_at.and_utc(),
        })
    }
}

#[async_trait]
impl ClientRepository for SqliteClient {
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT id, nome, email, telefone, cpf, data_cadastro
            FROM clientes
            ORDER BY data_cadastro DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_client).collect()
    }

    #[instrument(skip(self))]
    async fn get_client(&self, id: ClientId) -> Result<Option<Client>, AppError> {
        let row = sqlx::query(
            "SELECT id, nome, email, telefone, cpf, data_cadastro FROM clientes WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_client).transpose()
    }

    #[instrument(skip(self, fields))]
    async fn create_client(&self, fields: &ClientFields) -> Result<ClientId, AppError> {
        let result = sqlx::query(
            "INSERT INTO clientes (nome, email, telefone, cpf) VALUES (?, ?, ?, ?)",
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.tax_id)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    #[instrument(skip(self, fields))]
    async fn update_client(&self, id: ClientId, fields: &ClientFields) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE clientes SET nome = ?, email = ?, telefone = ?, cpf = ? WHERE id = ?",
        )
        .bind(&fields.name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(&fields.tax_id)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_client(&self, id: ClientId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
