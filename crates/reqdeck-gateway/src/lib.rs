//! # reqdeck-gateway
//!
//! The boundary through which every explorer mutation is persisted.
//! [`RemoteGateway`] is the contract the explorer store calls;
//! [`HttpGateway`] talks to the REST API and [`MemoryGateway`] keeps the
//! same state in process for offline use and tests.

pub mod error;
pub mod gateway;
pub mod http;
pub mod memory;

pub use gateway::{MutationResponse, RemoteGateway};
pub use http::HttpGateway;
pub use memory::MemoryGateway;
