//! Cinedex common types, errors, and configuration.
//!
//! This crate provides shared definitions used across all Cinedex components.

pub mod config;
pub mod error;
pub mod record;

pub use config::CatalogConfig;
pub use error::{CinedexError, Result};
pub use record::{Record, RECORD_FIELD_COUNT};
