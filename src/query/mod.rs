mod accumulator;
mod parallel;
mod range_filter;
mod reversal_index;

pub use accumulator::accumulate;
pub use parallel::compute_relative_balance_partitioned;
pub use range_filter::select;
pub use reversal_index::ReversalIndex;

use crate::ledger::Ledger;
use crate::model::{QueryCriteria, RelativeBalance, Transaction};

/// The payments that make up the relative balance for `criteria`, in ledger order.
///
/// These are the transactions in the date window that involve the account, minus reversal
/// records and minus anything reversed later in the ledger (even after the window ends).
pub fn contributing_transactions<'a>(
    ledger: &'a Ledger,
    criteria: &'a QueryCriteria,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    let reversal_index = ledger.reversal_index();
    range_filter::select(ledger, criteria)
        .filter(move |(position, transaction)| {
            !reversal_index.is_reversed(*position, transaction.id())
        })
        .map(|(_, transaction)| transaction)
        .filter(|transaction| !transaction.is_reversal())
}

pub fn compute_relative_balance(ledger: &Ledger, criteria: &QueryCriteria) -> RelativeBalance {
    let result = accumulate(
        criteria.account_id(),
        contributing_transactions(ledger, criteria),
    );
    log::debug!(
        "Relative balance of {} in [{}, {}): {} over {} transactions",
        criteria.account_id(),
        criteria.from(),
        criteria.to(),
        result.amount,
        result.count,
    );
    result
}
