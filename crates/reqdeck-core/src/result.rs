//! Convenience result type alias for Reqdeck.

use crate::error::AppError;

/// A specialized `Result` type for Reqdeck operations.
pub type AppResult<T> = Result<T, AppError>;
