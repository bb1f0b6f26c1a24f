use anyhow::{anyhow, ensure, Context as _, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;

use crate::config::Config;
use crate::ledger::Ledger;
use crate::model::{AccountId, NewTransaction, Transaction, TransactionId, TransactionType};

const INDEX_TRANSACTION_ID: usize = 0;
const INDEX_FROM_ACCOUNT_ID: usize = 1;
const INDEX_TO_ACCOUNT_ID: usize = 2;
const INDEX_CREATED_AT: usize = 3;
const INDEX_AMOUNT: usize = 4;
const INDEX_TRANSACTION_TYPE: usize = 5;
const INDEX_RELATED_TRANSACTION: usize = 6;

const NUM_REQUIRED_FIELDS: usize = 6;

pub fn load_file(path: &Path, config: &Config) -> Result<Ledger> {
    log::info!("Loading ledger from {}...", path.display());
    let file = std::fs::File::open(path)
        .with_context(|| anyhow!("Failed to open ledger file {}", path.display()))?;
    let ledger =
        load(file, config).with_context(|| anyhow!("Failed to load ledger {}", path.display()))?;
    log::info!(
        "Loading ledger from {}...done ({} transactions)",
        path.display(),
        ledger.len()
    );
    Ok(ledger)
}

/// Read a ledger from CSV. The first row is a header and is skipped. Transactions keep the order
/// of the rows, unless [Config::sort_ledger] is set.
pub fn load(mut input_stream: impl Read, config: &Config) -> Result<Ledger> {
    let mut content = String::new();
    input_stream.read_to_string(&mut content)?;
    let content = maybe_remove_byte_order_mark(content);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers().context("Failed to read header row")?;
    ensure!(
        headers.len() >= NUM_REQUIRED_FIELDS,
        "Header row has {} columns but needs at least {}",
        headers.len(),
        NUM_REQUIRED_FIELDS,
    );

    let transactions = reader
        .records()
        .enumerate()
        .map(|(index, record)| {
            let row = index + 1;
            record
                .map_err(anyhow::Error::from)
                .and_then(|record| parse_record(&record, config))
                .with_context(|| anyhow!("Error in row {row}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let ledger = if config.sort_ledger {
        Ledger::new_sorted(transactions)?
    } else {
        Ledger::new(transactions)?
    };
    Ok(ledger)
}

fn maybe_remove_byte_order_mark(mut content: String) -> String {
    if content.starts_with('\u{FEFF}') {
        content.remove(0);
    }
    content
}

fn parse_record(record: &StringRecord, config: &Config) -> Result<Transaction> {
    ensure!(
        record.len() >= NUM_REQUIRED_FIELDS,
        "Expected at least {} fields but found {}",
        NUM_REQUIRED_FIELDS,
        record.len(),
    );
    let field = |index: usize| record.get(index).unwrap_or("");

    let created_at = config.parse_datetime(field(INDEX_CREATED_AT))?;
    let amount = Decimal::from_str_exact(field(INDEX_AMOUNT))
        .map_err(|err| anyhow!("Failed to parse amount '{}': {err}", field(INDEX_AMOUNT)))?;
    let transaction_type: TransactionType = field(INDEX_TRANSACTION_TYPE).parse()?;
    let related_transaction_id = Some(field(INDEX_RELATED_TRANSACTION))
        .filter(|related| !related.is_empty())
        .map(TransactionId::new);

    Ok(Transaction::new(NewTransaction {
        id: TransactionId::new(field(INDEX_TRANSACTION_ID)),
        from_account_id: AccountId::new(field(INDEX_FROM_ACCOUNT_ID)),
        to_account_id: AccountId::new(field(INDEX_TO_ACCOUNT_ID)),
        created_at,
        amount,
        transaction_type,
        related_transaction_id,
    })?)
}
