//! API handlers and the response shapes they share.

pub mod catalog;
pub mod health;
pub mod identity;
pub mod result;

pub use self::result::{ErrorResponse, Failure, FailureKind, OperationResult};
