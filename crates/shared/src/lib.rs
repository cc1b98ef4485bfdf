//! Shared types, errors, and configuration for Expensio.
//!
//! This crate provides common types used across all other crates:
//! - Money types stored as integer minor units
//! - The supported currency catalogue
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
