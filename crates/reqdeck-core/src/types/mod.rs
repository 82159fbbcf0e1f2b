//! Core type definitions used across the Reqdeck workspace.

pub mod id;
pub mod response;

pub use id::*;
pub use response::{ApiErrorBody, GatewayResponse};
