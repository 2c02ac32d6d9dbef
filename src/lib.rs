//! Client Registry
//!
//! A small HTTP service that keeps customer records ("clientes") in a
//! SQLite table and exposes create, list, get, update and delete over a
//! JSON API.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                   API Layer                  │
//! │   HTTP handlers, routing, error responses    │
//! ├─────────────────────────────────────────────┤
//! │               Application Layer              │
//! │     ClientService: validation, not-found     │
//! ├─────────────────────────────────────────────┤
//! │                 Domain Layer                 │
//! │  Client types, ClientRepository, AppError    │
//! ├─────────────────────────────────────────────┤
//! │             Infrastructure Layer             │
//! │      SQLite adapter, tracing subscriber      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Persistence sits behind the `ClientRepository` trait. The production
//! binary wires in `SqliteClient`; tests use `MockClientRepository` or an
//! in-memory SQLite database.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use client_registry::api::create_router;
//! use client_registry::app::AppState;
//! use client_registry::infra::SqliteClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let db = Arc::new(SqliteClient::with_defaults("sqlite://clientes.db").await?);
//!     let state = Arc::new(AppState::new(db.clone()));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, create_router(state)).await?;
//!
//!     db.close().await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod infra;

// Mock implementations shared by unit and integration tests
#[doc(hidden)]
pub mod test_utils;
