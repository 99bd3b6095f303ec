//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when an input is malformed or out of range.
//! - [`KeyNotFound`] thrown when an account, creditor or obligation does not
//!   exist.
//! - [`AlreadySettled`] thrown when a settlement targets an obligation that is
//!   no longer open.
//! - [`Inconsistent`] thrown when a stored row breaks a model invariant.
//! - [`Database`] thrown when the store cannot complete a unit of work.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`AlreadySettled`]: EngineError::AlreadySettled
//!  [`Inconsistent`]: EngineError::Inconsistent
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Obligation {0} is already settled")]
    AlreadySettled(String),
    #[error("Inconsistent stored data: {0}")]
    Inconsistent(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::AlreadySettled(a), Self::AlreadySettled(b)) => a == b,
            (Self::Inconsistent(a), Self::Inconsistent(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
