use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use thiserror::Error;

use super::{TransactionId, TransactionType};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Transaction type {ty} should have no related transaction (has {related})")]
    PaymentWithRelatedTransaction {
        ty: TransactionType,
        related: TransactionId,
    },

    #[error("Transaction type {ty} must have a related transaction (has none)")]
    ReversalWithoutRelatedTransaction { ty: TransactionType },

    #[error("Transaction amount must be positive (is {0})")]
    NonPositiveAmount(Decimal),

    #[error("Transaction id must not be empty")]
    EmptyTransactionId,

    #[error("From date [{from}] must not be after to date [{to}]")]
    InvalidDateRange {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
}
