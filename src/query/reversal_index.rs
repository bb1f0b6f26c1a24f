use std::collections::HashMap;

use crate::model::{Transaction, TransactionId};

/// Lookup from a transaction id to the ledger positions of the reversals referring to it.
///
/// Built once over the whole ledger, so a reversal is found no matter which account or date
/// window it falls into.
#[derive(Debug, Clone, Default)]
pub struct ReversalIndex {
    // Positions are ascending because they're pushed while walking the ledger in order.
    reversal_positions: HashMap<TransactionId, Vec<usize>>,
}

impl ReversalIndex {
    pub fn build(transactions: &[Transaction]) -> Self {
        let mut reversal_positions: HashMap<TransactionId, Vec<usize>> = HashMap::new();
        for (position, transaction) in transactions.iter().enumerate() {
            if let Some(reversed) = transaction.related_transaction_id() {
                reversal_positions
                    .entry(reversed.clone())
                    .or_default()
                    .push(position);
            }
        }
        Self { reversal_positions }
    }

    /// True if a reversal of `id` is positioned anywhere after `position`, up to and including the
    /// last ledger entry.
    pub fn is_reversed(&self, position: usize, id: &TransactionId) -> bool {
        self.reversal_positions
            .get(id)
            .and_then(|positions| positions.last())
            .is_some_and(|&last| last > position)
    }

    /// Ledger positions of all reversals referring to `id`, ascending
    pub fn reversals_of(&self, id: &TransactionId) -> &[usize] {
        self.reversal_positions
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct transaction ids that have at least one reversal
    pub fn num_reversed(&self) -> usize {
        self.reversal_positions.len()
    }
}
