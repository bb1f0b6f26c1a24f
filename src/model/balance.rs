use rust_decimal::Decimal;
use std::iter::Sum;

use super::{AccountId, Transaction};

/// Signed balance change of one account over a period, and how many transactions made it up.
///
/// Values are never mutated; [RelativeBalance::combine] and [RelativeBalance::add_transaction]
/// produce new ones. `combine` is associative and commutative with [RelativeBalance::ZERO] as
/// identity, so partial results over any split of the input can be merged in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelativeBalance {
    pub amount: Decimal,
    pub count: u64,
}

impl RelativeBalance {
    pub const ZERO: Self = Self {
        amount: Decimal::ZERO,
        count: 0,
    };

    pub fn new(amount: Decimal, count: u64) -> Self {
        Self { amount, count }
    }

    pub fn combine(self, other: Self) -> Self {
        Self {
            amount: self.amount + other.amount,
            count: self.count + other.count,
        }
    }

    /// Account for one more transaction as seen from `account`.
    ///
    /// Reversal records never contribute. Money sent to `account` counts positive, anything
    /// else negative, so a transfer from `account` to itself counts as incoming.
    pub fn add_transaction(self, account: &AccountId, transaction: &Transaction) -> Self {
        if transaction.is_reversal() {
            return self;
        }
        if transaction.to_account_id() == account {
            self.combine(Self::new(transaction.amount(), 1))
        } else if transaction.from_account_id() == account {
            self.combine(Self::new(-transaction.amount(), 1))
        } else {
            self
        }
    }
}

impl Sum for RelativeBalance {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::combine)
    }
}
