//! Plateshop Store: the product catalog persisted as a flat CSV file.
//!
//! The whole collection is read into memory on every operation, one record is
//! changed or appended, and the file is rewritten in full. Column headers on
//! disk are human-readable (`ImageURL`); the API sees sanitized keys
//! (`imageurl`).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`schema`]: Declared columns and key sanitization
//! - [`record`]: Sanitized-key record view
//! - [`store`]: The [`RecordStore`] itself

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod record;
pub mod schema;
pub mod store;

pub use error::{Error, Result};
pub use record::{FieldMap, Record};
pub use schema::{FIELDS, Schema, canonical_column, sanitize_key};
pub use store::RecordStore;
