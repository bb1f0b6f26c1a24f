use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::{cell::RefCell, rc::Rc};

use crate::config::DEFAULT_DATE_FORMAT;
use crate::ledger::Ledger;
use crate::model::{AccountId, NewTransaction, Transaction, TransactionId, TransactionType};
use crate::terminal::LineWriter;

pub fn datetime(input: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(input, DEFAULT_DATE_FORMAT).unwrap()
}

fn transaction(
    id: &str,
    from: &str,
    to: &str,
    created_at: &str,
    amount: &str,
    transaction_type: TransactionType,
    related: Option<&str>,
) -> Transaction {
    Transaction::new(NewTransaction {
        id: TransactionId::new(id),
        from_account_id: AccountId::new(from),
        to_account_id: AccountId::new(to),
        created_at: datetime(created_at),
        amount: Decimal::from_str_exact(amount).unwrap(),
        transaction_type,
        related_transaction_id: related.map(TransactionId::new),
    })
    .unwrap()
}

pub fn payment(id: &str, from: &str, to: &str, created_at: &str, amount: &str) -> Transaction {
    transaction(
        id,
        from,
        to,
        created_at,
        amount,
        TransactionType::Payment,
        None,
    )
}

pub fn reversal(
    id: &str,
    from: &str,
    to: &str,
    created_at: &str,
    amount: &str,
    related: &str,
) -> Transaction {
    transaction(
        id,
        from,
        to,
        created_at,
        amount,
        TransactionType::Reversal,
        Some(related),
    )
}

/// Five transactions over two days between accounts A, B and C. TX4 reverses TX2.
pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        payment("TX1", "A", "B", "20/10/2018 12:47:55", "25.00"),
        payment("TX2", "A", "C", "20/10/2018 17:33:43", "10.50"),
        payment("TX3", "C", "B", "20/10/2018 18:00:00", "5.00"),
        reversal("TX4", "A", "C", "20/10/2018 19:45:00", "10.50", "TX2"),
        payment("TX5", "A", "B", "21/10/2018 09:30:00", "7.25"),
    ]
}

pub fn sample_ledger() -> Ledger {
    Ledger::new(sample_transactions()).unwrap()
}

/// Collects printed lines instead of writing them to stdout
#[derive(Clone, Default)]
pub struct RecordingLineWriter(Rc<RefCell<Vec<String>>>);

impl RecordingLineWriter {
    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl LineWriter for RecordingLineWriter {
    fn write_line(&self, line: &str) {
        self.0.borrow_mut().push(line.to_string());
    }
}
