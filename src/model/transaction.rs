use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt::{self, Display};
use std::str::FromStr;

use super::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Payment,
    Reversal,
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Payment => f.write_str("PAYMENT"),
            TransactionType::Reversal => f.write_str("REVERSAL"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        if s.eq_ignore_ascii_case("PAYMENT") {
            Ok(TransactionType::Payment)
        } else if s.eq_ignore_ascii_case("REVERSAL") {
            Ok(TransactionType::Reversal)
        } else {
            Err(anyhow::anyhow!(
                "Unknown transaction type '{s}', expected PAYMENT or REVERSAL"
            ))
        }
    }
}

/// Raw fields of a transaction before validation. Turn it into a [Transaction] with [Transaction::new].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub id: TransactionId,
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub created_at: NaiveDateTime,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub related_transaction_id: Option<TransactionId>,
}

// The related transaction only exists on reversals, so the kind carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    Payment,
    Reversal { related_transaction_id: TransactionId },
}

/// A transfer of `amount` from one account to another, or the reversal of an earlier transfer.
///
/// The amount is always positive. Whether it is money in or money out depends on which side
/// of the transfer the account being looked at is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    id: TransactionId,
    from_account_id: AccountId,
    to_account_id: AccountId,
    created_at: NaiveDateTime,
    amount: Decimal,
    kind: Kind,
}

impl Transaction {
    pub fn new(fields: NewTransaction) -> Result<Self, ValidationError> {
        let NewTransaction {
            id,
            from_account_id,
            to_account_id,
            created_at,
            amount,
            transaction_type,
            related_transaction_id,
        } = fields;

        if id.as_str().is_empty() {
            return Err(ValidationError::EmptyTransactionId);
        }
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(amount));
        }
        let kind = match (transaction_type, related_transaction_id) {
            (TransactionType::Payment, None) => Kind::Payment,
            (TransactionType::Payment, Some(related)) => {
                return Err(ValidationError::PaymentWithRelatedTransaction {
                    ty: transaction_type,
                    related,
                });
            }
            (TransactionType::Reversal, Some(related_transaction_id)) => Kind::Reversal {
                related_transaction_id,
            },
            (TransactionType::Reversal, None) => {
                return Err(ValidationError::ReversalWithoutRelatedTransaction {
                    ty: transaction_type,
                });
            }
        };

        Ok(Self {
            id,
            from_account_id,
            to_account_id,
            created_at,
            amount,
            kind,
        })
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn from_account_id(&self) -> &AccountId {
        &self.from_account_id
    }

    pub fn to_account_id(&self) -> &AccountId {
        &self.to_account_id
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn transaction_type(&self) -> TransactionType {
        match self.kind {
            Kind::Payment => TransactionType::Payment,
            Kind::Reversal { .. } => TransactionType::Reversal,
        }
    }

    /// The transaction this one reverses. Always `Some` for reversals and `None` for payments.
    pub fn related_transaction_id(&self) -> Option<&TransactionId> {
        match &self.kind {
            Kind::Payment => None,
            Kind::Reversal {
                related_transaction_id,
            } => Some(related_transaction_id),
        }
    }

    pub fn is_reversal(&self) -> bool {
        matches!(self.kind, Kind::Reversal { .. })
    }

    /// True if `account` is the sender or the recipient
    pub fn involves(&self, account: &AccountId) -> bool {
        &self.from_account_id == account || &self.to_account_id == account
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::testutils::datetime;

    fn fields(
        transaction_type: TransactionType,
        related_transaction_id: Option<&str>,
    ) -> NewTransaction {
        NewTransaction {
            id: TransactionId::new("TX10001"),
            from_account_id: AccountId::new("ACC334455"),
            to_account_id: AccountId::new("ACC778899"),
            created_at: datetime("20/10/2018 12:47:55"),
            amount: Decimal::new(2500, 2),
            transaction_type,
            related_transaction_id: related_transaction_id.map(TransactionId::new),
        }
    }

    #[test]
    fn payment_without_related_transaction_is_valid() {
        let transaction = Transaction::new(fields(TransactionType::Payment, None)).unwrap();
        assert_eq!(TransactionType::Payment, transaction.transaction_type());
        assert_eq!(None, transaction.related_transaction_id());
        assert!(!transaction.is_reversal());
        assert_eq!(Decimal::new(2500, 2), transaction.amount());
    }

    #[test]
    fn payment_with_related_transaction_fails() {
        assert_eq!(
            Err(ValidationError::PaymentWithRelatedTransaction {
                ty: TransactionType::Payment,
                related: TransactionId::new("TX10000"),
            }),
            Transaction::new(fields(TransactionType::Payment, Some("TX10000"))),
        );
    }

    #[test]
    fn reversal_with_related_transaction_is_valid() {
        let transaction =
            Transaction::new(fields(TransactionType::Reversal, Some("TX10000"))).unwrap();
        assert_eq!(TransactionType::Reversal, transaction.transaction_type());
        assert_eq!(
            Some(&TransactionId::new("TX10000")),
            transaction.related_transaction_id()
        );
        assert!(transaction.is_reversal());
    }

    #[test]
    fn reversal_without_related_transaction_fails() {
        assert_eq!(
            Err(ValidationError::ReversalWithoutRelatedTransaction {
                ty: TransactionType::Reversal,
            }),
            Transaction::new(fields(TransactionType::Reversal, None)),
        );
    }

    #[rstest]
    fn non_positive_amount_fails(#[values(Decimal::ZERO, Decimal::new(-1050, 2))] amount: Decimal) {
        let mut fields = fields(TransactionType::Payment, None);
        fields.amount = amount;
        assert_eq!(
            Err(ValidationError::NonPositiveAmount(amount)),
            Transaction::new(fields),
        );
    }

    #[test]
    fn empty_id_fails() {
        let mut fields = fields(TransactionType::Payment, None);
        fields.id = TransactionId::new("");
        assert_eq!(
            Err(ValidationError::EmptyTransactionId),
            Transaction::new(fields)
        );
    }

    #[test]
    fn involves() {
        let transaction = Transaction::new(fields(TransactionType::Payment, None)).unwrap();
        assert!(transaction.involves(&AccountId::new("ACC334455")));
        assert!(transaction.involves(&AccountId::new("ACC778899")));
        assert!(!transaction.involves(&AccountId::new("ACC998877")));
    }

    #[rstest]
    #[case("PAYMENT", TransactionType::Payment)]
    #[case("payment", TransactionType::Payment)]
    #[case("REVERSAL", TransactionType::Reversal)]
    #[case("Reversal", TransactionType::Reversal)]
    fn parse_transaction_type(#[case] input: &str, #[case] expected: TransactionType) {
        assert_eq!(expected, input.parse::<TransactionType>().unwrap());
    }

    #[test]
    fn parse_unknown_transaction_type() {
        assert!("REFUND".parse::<TransactionType>().is_err());
        assert!("".parse::<TransactionType>().is_err());
    }
}
