//! Form definitions backing the console commands.

use thiserror::Error;
use validator::ValidationErrors;

pub mod console;

#[derive(Debug, Error)]
/// Errors that can occur when processing command input.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("invalid sort order `{0}`")]
    InvalidOrder(String),

    #[error("invalid ledger id")]
    InvalidLedgerId,
}
