//! # plateshop-api
//!
//! HTTP API server for the Plateshop catalog.
//!
//! This crate provides:
//! - Public product listing and admin login endpoints
//! - Token-gated add/update endpoints backed by the CSV record store
//! - Layered configuration (defaults, TOML file, environment, CLI)
//! - Optional static file serving for the storefront assets

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, Error, Result};
pub use server::{router, serve};
pub use state::AppState;
