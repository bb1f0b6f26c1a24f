use crate::model::{AccountId, RelativeBalance, Transaction};

/// Fold transactions into a [RelativeBalance] as seen from `account`.
///
/// Reversed transactions must already be filtered out. Reversal records are skipped here.
pub fn accumulate<'a>(
    account: &AccountId,
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> RelativeBalance {
    transactions
        .into_iter()
        .fold(RelativeBalance::ZERO, |balance, transaction| {
            balance.add_transaction(account, transaction)
        })
}
