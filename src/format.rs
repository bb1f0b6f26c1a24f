use rust_decimal::Decimal;

use crate::config::Config;
use crate::model::{RelativeBalance, Transaction};

/// Render `amount` like `$1,234.50` or `-$25.00`, rounded half-to-even to two decimal places.
/// Negative amounts that round to zero keep their sign, e.g. `-$0.00`.
pub fn format_amount(amount: Decimal, currency_symbol: &str) -> String {
    let rounded = amount.round_dp(2);
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!(
        "{sign}{currency_symbol}{}.{fraction}",
        group_thousands(integer)
    )
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

pub fn describe(balance: &RelativeBalance, config: &Config) -> String {
    format!(
        "Relative balance for the period is: {}\nNumber of transactions included is: {}",
        format_amount(balance.amount, &config.currency_symbol),
        balance.count,
    )
}

/// One-line summary of a transaction, e.g. `20/10/2018 12:47:55 TX1 A -> B $25.00`.
/// Reversals additionally name the transaction they reverse.
pub fn describe_transaction(transaction: &Transaction, config: &Config) -> String {
    let mut description = format!(
        "{} {} {} -> {} {}",
        transaction.created_at().format(&config.date_format),
        transaction.id(),
        transaction.from_account_id(),
        transaction.to_account_id(),
        format_amount(transaction.amount(), &config.currency_symbol),
    );
    if let Some(related) = transaction.related_transaction_id() {
        description.push_str(&format!(" (reverses {related})"));
    }
    description
}
