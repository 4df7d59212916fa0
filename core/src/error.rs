use crate::types::{AccountId, Amount};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Missing or empty field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid amount: {0}")]
    InvalidAmount(Amount),

    #[error("An account with this email or phone already exists")]
    DuplicateAccount,

    #[error("Invalid phone number or password")]
    InvalidCredentials,

    #[error("Account '{0}' not found")]
    NotFound(AccountId),

    #[error("Account '{0}' already has a referrer")]
    AlreadyReferred(AccountId),

    #[error("Insufficient balance: {available} available, {required} required")]
    InsufficientFunds { available: Amount, required: Amount },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type WalletResult<T> = Result<T, WalletError>;
