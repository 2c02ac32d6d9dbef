//! Mock implementations for testing.
//!
//! These mocks provide in-memory implementations of domain traits
//! that can be configured to simulate various scenarios including
//! success, failure, and edge cases.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::{AppError, Client, ClientFields, ClientId, ClientRepository, DatabaseError};

/// Configuration for mock behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// If true, operations will fail.
    pub should_fail: bool,
    /// Custom error message for failures.
    pub error_message: Option<String>,
}

impl MockConfig {
    /// Creates a config that always succeeds.
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a config that always fails.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            error_message: Some(message.into()),
        }
    }
}

#[derive(Default)]
struct MockStore {
    rows: BTreeMap<ClientId, Client>,
    last_id: ClientId,
}

impl MockStore {
    /// Returns the SQLite-style message for the first unique column taken
    /// by another row.
    fn collision(&self, fields: &ClientFields, except: Option<ClientId>) -> Option<String> {
        let others = move || self.rows.values().filter(move |c| Some(c.id) != except);
        let column = if others().any(|c| c.email == fields.email) {
            "clientes.email"
        } else if others().any(|c| c.tax_id == fields.tax_id) {
            "clientes.cpf"
        } else {
            return None;
        };
        Some(format!("UNIQUE constraint failed: {column}"))
    }
}

/// Mock client repository for testing.
///
/// Keeps rows in memory and mirrors the rules of the SQLite table:
/// monotonically increasing ids that are never reused, and unique
/// `email` / `cpf` columns.
///
/// # Example
///
/// ```
/// use client_registry::test_utils::{MockClientRepository, mocks::MockConfig};
///
/// // Create a mock that succeeds
/// let mock = MockClientRepository::new();
///
/// // Create a mock that fails
/// let failing_mock = MockClientRepository::with_config(MockConfig::failure("DB error"));
/// ```
pub struct MockClientRepository {
    store: Arc<Mutex<MockStore>>,
    config: MockConfig,
    call_count: AtomicU64,
    is_healthy: AtomicBool,
}

impl MockClientRepository {
    /// Creates a new mock with default (success) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    /// Creates a new mock with the given configuration.
    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(MockStore::default())),
            config,
            call_count: AtomicU64::new(0),
            is_healthy: AtomicBool::new(true),
        }
    }

    /// Creates a mock that always fails.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }

    /// Gets the number of times any method was called.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Sets the health status.
    pub fn set_healthy(&self, healthy: bool) {
        self.is_healthy.store(healthy, Ordering::Relaxed);
    }

    /// Gets all stored clients in id order.
    pub fn get_all_clients(&self) -> Vec<Client> {
        self.store.lock().unwrap().rows.values().cloned().collect()
    }

    fn increment_call_count(&self) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
    }

    fn check_should_fail(&self) -> Result<(), AppError> {
        if self.config.should_fail {
            let msg = self
                .config
                .error_message
                .clone()
                .unwrap_or_else(|| "Mock database error".to_string());
            return Err(AppError::Database(DatabaseError::Query(msg)));
        }
        Ok(())
    }
}

impl Default for MockClientRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientRepository for MockClientRepository {
    async fn health_check(&self) -> Result<(), AppError> {
        self.increment_call_count();

        if !self.is_healthy.load(Ordering::Relaxed) {
            return Err(AppError::Database(DatabaseError::Connection(
                "Mock database unhealthy".to_string(),
            )));
        }

        self.check_should_fail()
    }

    async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        let store = self.store.lock().unwrap();
        let mut clients: Vec<Client> = store.rows.values().cloned().collect();
        clients.sort_by(|a, b| {
            b.registered_at
                .cmp(&a.registered_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(clients)
    }

    async fn get_client(&self, id: ClientId) -> Result<Option<Client>, AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        let store = self.store.lock().unwrap();
        Ok(store.rows.get(&id).cloned())
    }

    async fn create_client(&self, fields: &ClientFields) -> Result<ClientId, AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        let mut store = self.store.lock().unwrap();
        if let Some(message) = store.collision(fields, None) {
            return Err(AppError::Database(DatabaseError::Duplicate(message)));
        }

        store.last_id += 1;
        let id = store.last_id;
        // Keep registration times strictly increasing so ordering is stable.
        let registered_at = Utc::now() + Duration::milliseconds(id);

        store.rows.insert(
            id,
            Client {
                id,
                name: fields.name.clone(),
                email: fields.email.clone(),
                phone: fields.phone.clone(),
                tax_id: fields.tax_id.clone(),
                registered_at,
            },
        );

        Ok(id)
    }

    async fn update_client(&self, id: ClientId, fields: &ClientFields) -> Result<bool, AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        let mut store = self.store.lock().unwrap();
        if !store.rows.contains_key(&id) {
            return Ok(false);
        }
        if let Some(message) = store.collision(fields, Some(id)) {
            return Err(AppError::Database(DatabaseError::Duplicate(message)));
        }

        if let Some(existing) = store.rows.get_mut(&id) {
            existing.name = fields.name.clone();
            existing.email = fields.email.clone();
            existing.phone = fields.phone.clone();
            existing.tax_id = fields.tax_id.clone();
        }
        Ok(true)
    }

    async fn delete_client(&self, id: ClientId) -> Result<bool, AppError> {
        self.increment_call_count();
        self.check_should_fail()?;

        let mut store = self.store.lock().unwrap();
        Ok(store.rows.remove(&id).is_some())
    }
}
