mod balance;
mod criteria;
mod error;
mod transaction;

pub use balance::RelativeBalance;
pub use criteria::QueryCriteria;
pub use error::ValidationError;
pub use transaction::{AccountId, NewTransaction, Transaction, TransactionId, TransactionType};
