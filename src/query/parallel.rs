use rayon::prelude::*;
use std::num::NonZeroUsize;

use super::{accumulator, range_filter};
use crate::ledger::Ledger;
use crate::model::{QueryCriteria, RelativeBalance, Transaction};

/// Same result as [super::compute_relative_balance], but the selected transactions are split into
/// chunks of `partition_len` that are folded on the rayon thread pool and combined afterwards.
///
/// Every chunk checks reversals against the index of the whole ledger, not just its own entries.
pub fn compute_relative_balance_partitioned(
    ledger: &Ledger,
    criteria: &QueryCriteria,
    partition_len: NonZeroUsize,
) -> RelativeBalance {
    let candidates: Vec<(usize, &Transaction)> = range_filter::select(ledger, criteria).collect();
    let reversal_index = ledger.reversal_index();
    candidates
        .par_chunks(partition_len.get())
        .map(|partition| {
            accumulator::accumulate(
                criteria.account_id(),
                partition
                    .iter()
                    .filter(|(position, transaction)| {
                        !reversal_index.is_reversed(*position, transaction.id())
                    })
                    .map(|(_, transaction)| *transaction),
            )
        })
        .reduce(|| RelativeBalance::ZERO, RelativeBalance::combine)
}
