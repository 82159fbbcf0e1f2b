//! # reqdeck-core
//!
//! Core crate for Reqdeck. Contains the collaborator traits the explorer
//! store depends on (notifications, preference storage), configuration
//! schemas, typed identifiers, gateway response envelopes, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Reqdeck crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
