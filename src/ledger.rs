use rust_decimal::Decimal;
use std::collections::HashMap;
use thiserror::Error;

use crate::model::{QueryCriteria, RelativeBalance, Transaction, TransactionId};
use crate::query::{self, ReversalIndex};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Transaction {id} at position {position} was created before the transaction preceding it")]
    NotAscending { id: TransactionId, position: usize },

    #[error("Transaction id {id} appears more than once (positions {first} and {second})")]
    DuplicateId {
        id: TransactionId,
        first: usize,
        second: usize,
    },

    #[error("Reversal {reversal} at position {reversal_position} precedes the transaction {reversed} it reverses")]
    ReversalBeforeReversedTransaction {
        reversal: TransactionId,
        reversal_position: usize,
        reversed: TransactionId,
    },

    #[error("The amounts of all transactions up to {id} add up to more than the largest representable amount")]
    AmountOverflow { id: TransactionId },
}

/// Ordered, read-only sequence of transactions that balance queries run against.
///
/// A ledger is always sorted ascending by creation time, has unique transaction ids, and every
/// reversal comes after the transaction it reverses. The amounts of all its transactions sum to a
/// representable [Decimal], so no balance computed over any part of it can overflow. It also carries the [ReversalIndex] for its
/// transactions, built once on construction.
#[derive(Debug, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    reversal_index: ReversalIndex,
}

impl Ledger {
    /// Takes transactions that are expected to already be in ledger order and fails if they aren't.
    pub fn new(transactions: Vec<Transaction>) -> Result<Self, LedgerError> {
        if let Some(position) = transactions
            .windows(2)
            .position(|pair| pair[1].created_at() < pair[0].created_at())
        {
            return Err(LedgerError::NotAscending {
                id: transactions[position + 1].id().clone(),
                position: position + 1,
            });
        }
        check_references(&transactions)?;
        check_total_amount(&transactions)?;

        let reversal_index = ReversalIndex::build(&transactions);
        log::debug!(
            "Built ledger with {} transactions, {} of them reversed",
            transactions.len(),
            reversal_index.num_reversed(),
        );
        Ok(Self {
            transactions,
            reversal_index,
        })
    }

    /// Sorts the transactions by creation time before building the ledger. Transactions created at the
    /// same time keep their relative order.
    pub fn new_sorted(mut transactions: Vec<Transaction>) -> Result<Self, LedgerError> {
        transactions.sort_by_key(|transaction| transaction.created_at());
        Self::new(transactions)
    }

    pub fn empty() -> Self {
        Self {
            transactions: vec![],
            reversal_index: ReversalIndex::build(&[]),
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn reversal_index(&self) -> &ReversalIndex {
        &self.reversal_index
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn relative_balance(&self, criteria: &QueryCriteria) -> RelativeBalance {
        query::compute_relative_balance(self, criteria)
    }
}

fn check_total_amount(transactions: &[Transaction]) -> Result<(), LedgerError> {
    transactions
        .iter()
        .try_fold(Decimal::ZERO, |total, transaction| {
            total
                .checked_add(transaction.amount())
                .ok_or_else(|| LedgerError::AmountOverflow {
                    id: transaction.id().clone(),
                })
        })
        .map(|_| ())
}

fn check_references(transactions: &[Transaction]) -> Result<(), LedgerError> {
    let mut positions: HashMap<&TransactionId, usize> = HashMap::with_capacity(transactions.len());
    for (position, transaction) in transactions.iter().enumerate() {
        if let Some(first) = positions.insert(transaction.id(), position) {
            return Err(LedgerError::DuplicateId {
                id: transaction.id().clone(),
                first,
                second: position,
            });
        }
    }
    for (position, transaction) in transactions.iter().enumerate() {
        let Some(reversed) = transaction.related_transaction_id() else {
            continue;
        };
        match positions.get(reversed) {
            Some(&reversed_position) if reversed_position > position => {
                return Err(LedgerError::ReversalBeforeReversedTransaction {
                    reversal: transaction.id().clone(),
                    reversal_position: position,
                    reversed: reversed.clone(),
                });
            }
            Some(_) => {}
            None => log::warn!(
                "Reversal {} refers to transaction {} which isn't in the ledger",
                transaction.id(),
                reversed,
            ),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::{payment, reversal, sample_transactions};

    #[test]
    fn sample_is_valid() {
        let ledger = Ledger::new(sample_transactions()).unwrap();
        assert_eq!(5, ledger.len());
        assert!(!ledger.is_empty());
        assert_eq!(sample_transactions().as_slice(), ledger.transactions());
    }

    #[test]
    fn empty() {
        let ledger = Ledger::empty();
        assert!(ledger.is_empty());
        assert!(Ledger::new(vec![]).unwrap().is_empty());
    }

    #[test]
    fn equal_timestamps_are_ascending() {
        let ledger = Ledger::new(vec![
            payment("TX1", "A", "B", "20/10/2018 12:00:00", "1.00"),
            payment("TX2", "A", "B", "20/10/2018 12:00:00", "2.00"),
        ]);
        assert!(ledger.is_ok());
    }

    #[test]
    fn not_ascending_fails() {
        let error = Ledger::new(vec![
            payment("TX1", "A", "B", "20/10/2018 12:00:00", "1.00"),
            payment("TX2", "A", "B", "20/10/2018 13:00:00", "2.00"),
            payment("TX3", "A", "B", "20/10/2018 12:30:00", "3.00"),
        ])
        .unwrap_err();
        assert_eq!(
            LedgerError::NotAscending {
                id: TransactionId::new("TX3"),
                position: 2,
            },
            error
        );
    }

    #[test]
    fn new_sorted_sorts_stably() {
        let ledger = Ledger::new_sorted(vec![
            payment("TX3", "A", "B", "20/10/2018 14:00:00", "3.00"),
            payment("TX1", "A", "B", "20/10/2018 12:00:00", "1.00"),
            payment("TX2", "A", "B", "20/10/2018 12:00:00", "2.00"),
        ])
        .unwrap();
        let ids: Vec<&str> = ledger
            .transactions()
            .iter()
            .map(|transaction| transaction.id().as_str())
            .collect();
        assert_eq!(vec!["TX1", "TX2", "TX3"], ids);
    }

    #[test]
    fn duplicate_id_fails() {
        let error = Ledger::new(vec![
            payment("TX1", "A", "B", "20/10/2018 12:00:00", "1.00"),
            payment("TX1", "B", "C", "20/10/2018 13:00:00", "2.00"),
        ])
        .unwrap_err();
        assert_eq!(
            LedgerError::DuplicateId {
                id: TransactionId::new("TX1"),
                first: 0,
                second: 1,
            },
            error
        );
    }

    #[test]
    fn reversal_before_reversed_transaction_fails() {
        let error = Ledger::new(vec![
            reversal("TX1", "A", "B", "20/10/2018 12:00:00", "1.00", "TX2"),
            payment("TX2", "A", "B", "20/10/2018 12:00:00", "1.00"),
        ])
        .unwrap_err();
        assert_eq!(
            LedgerError::ReversalBeforeReversedTransaction {
                reversal: TransactionId::new("TX1"),
                reversal_position: 0,
                reversed: TransactionId::new("TX2"),
            },
            error
        );
    }

    #[test]
    fn total_amount_overflow_fails() {
        let max = Decimal::MAX.to_string();
        let error = Ledger::new(vec![
            payment("TX1", "A", "B", "20/10/2018 12:00:00", &max),
            payment("TX2", "A", "B", "20/10/2018 13:00:00", &max),
        ])
        .unwrap_err();
        assert_eq!(
            LedgerError::AmountOverflow {
                id: TransactionId::new("TX2"),
            },
            error
        );
    }

    #[test]
    fn largest_total_amount_is_allowed() {
        let max = Decimal::MAX.to_string();
        let ledger = Ledger::new(vec![payment("TX1", "A", "B", "20/10/2018 12:00:00", &max)]);
        assert!(ledger.is_ok());
    }

    #[test]
    fn reversal_of_unknown_transaction_is_allowed() {
        let ledger = Ledger::new(vec![reversal(
            "TX2",
            "A",
            "B",
            "20/10/2018 12:00:00",
            "1.00",
            "TX1",
        )]);
        assert!(ledger.is_ok());
    }
}
