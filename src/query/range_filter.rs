use crate::ledger::Ledger;
use crate::model::{QueryCriteria, Transaction};

/// Transactions created in `[criteria.from(), criteria.to())` that involve the queried account,
/// in ledger order, together with their ledger position.
///
/// Relies on the ledger being sorted by creation time: it binary searches for the window start
/// and stops at the first transaction at or after the window end.
pub fn select<'a>(
    ledger: &'a Ledger,
    criteria: &'a QueryCriteria,
) -> impl Iterator<Item = (usize, &'a Transaction)> + 'a {
    let transactions = ledger.transactions();
    let start =
        transactions.partition_point(|transaction| transaction.created_at() < criteria.from());
    transactions[start..]
        .iter()
        .enumerate()
        .map(move |(offset, transaction)| (start + offset, transaction))
        .take_while(|(_, transaction)| transaction.created_at() < criteria.to())
        .filter(|(_, transaction)| transaction.involves(criteria.account_id()))
}
