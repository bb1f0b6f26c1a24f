use anyhow::{Context as _, Result};
use chrono::NaiveDateTime;
use console::{style, StyledObject};
use rust_decimal::Decimal;

use crate::args::{Args, Command};
use crate::config::Config;
use crate::format;
use crate::import;
use crate::ledger::Ledger;
use crate::model::{AccountId, QueryCriteria, RelativeBalance, Transaction, ValidationError};
use crate::query;
use crate::terminal::{self, BulletPointPrinter, LineWriter};

pub fn main(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let ledger = import::load_file(&args.ledger, &config)
        .context("No ledger available, not running any queries")?;
    let cli = Cli::new(config, ledger);
    match args.command {
        Command::Query {
            account,
            from,
            to,
            list,
        } => cli.main_query(account, &from, &to, list)?,
        Command::Interactive => cli.main_interactive()?,
        Command::List => cli.main_list(),
    }
    Ok(())
}

pub struct Cli {
    config: Config,
    ledger: Ledger,
}

impl Cli {
    pub fn new(config: Config, ledger: Ledger) -> Self {
        Self { config, ledger }
    }

    pub fn main_query(&self, account: String, from: &str, to: &str, list: bool) -> Result<()> {
        let criteria = QueryCriteria::new(
            AccountId::new(account),
            self.config.parse_datetime(from)?,
            self.config.parse_datetime(to)?,
        )?;
        self.print_balance(&criteria, list);
        Ok(())
    }

    pub fn main_interactive(&self) -> Result<()> {
        print!("Welcome! ");
        loop {
            println!("Please enter search criteria. Leave the account empty or press Ctrl+C to exit.");
            println!();
            let Some(criteria) = self.prompt_criteria()? else {
                return Ok(());
            };
            println!();
            self.print_balance(&criteria, false);
            println!();
        }
    }

    pub fn main_list(&self) {
        println!("{}", style_header("Transactions:"));
        if self.ledger.is_empty() {
            println!("(none)");
            return;
        }
        print_ledger(&BulletPointPrinter::new(), &self.ledger, &self.config);
    }

    fn print_balance(&self, criteria: &QueryCriteria, list: bool) {
        let balance = query::compute_relative_balance(&self.ledger, criteria);
        if list {
            println!("{}", style_header("Included transactions:"));
            let printer = BulletPointPrinter::new();
            let mut any = false;
            for transaction in query::contributing_transactions(&self.ledger, criteria) {
                any = true;
                self.print_contributing_transaction(&printer, criteria.account_id(), transaction);
            }
            if !any {
                printer.print_item(style("(none)").italic());
            }
            println!();
        }
        println!("{}", format::describe(&balance, &self.config));
    }

    fn print_contributing_transaction(
        &self,
        printer: &BulletPointPrinter,
        account: &AccountId,
        transaction: &Transaction,
    ) {
        let signed = RelativeBalance::ZERO.add_transaction(account, transaction);
        printer.print_item(format!(
            "{} {}",
            style_transaction(&format::describe_transaction(transaction, &self.config)),
            style_amount(signed.amount, &self.config.currency_symbol),
        ));
    }

    /// Returns `None` if the user entered an empty account
    fn prompt_criteria(&self) -> Result<Option<QueryCriteria>> {
        loop {
            let account = terminal::prompt_allow_empty("accountId")?;
            let account = account.trim();
            if account.is_empty() {
                return Ok(None);
            }
            let from = self.prompt_datetime("from")?;
            let to = self.prompt_datetime("to")?;
            match QueryCriteria::new(AccountId::new(account), from, to) {
                Ok(criteria) => return Ok(Some(criteria)),
                Err(err @ ValidationError::InvalidDateRange { .. }) => {
                    println!();
                    println!("{}. Please try again.", style(err).red());
                    println!();
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    fn prompt_datetime(&self, name: &str) -> Result<NaiveDateTime> {
        loop {
            let input = terminal::prompt(&format!("{name} ({})", self.config.date_format))?;
            match self.config.parse_datetime(&input) {
                Ok(datetime) => return Ok(datetime),
                Err(_) => println!(
                    "{}",
                    style(format!(
                        "Invalid date format. Need {}. Please try again.",
                        self.config.date_format
                    ))
                    .red()
                ),
            }
        }
    }
}

/// Prints every transaction, and below each one that was reversed later, the reversals cancelling it.
fn print_ledger<W: LineWriter + Clone>(
    printer: &BulletPointPrinter<W>,
    ledger: &Ledger,
    config: &Config,
) {
    let transactions = ledger.transactions();
    for transaction in transactions {
        printer.print_item(style_transaction(&format::describe_transaction(
            transaction,
            config,
        )));
        let reversals = ledger.reversal_index().reversals_of(transaction.id());
        if !reversals.is_empty() {
            let printer = printer.indent();
            for &position in reversals {
                printer.print_item(style_reversal(&format!(
                    "reversed by {}",
                    transactions[position].id()
                )));
            }
        }
    }
}

fn style_header(header: &str) -> StyledObject<&str> {
    style(header).bold().underlined()
}

fn style_transaction(transaction: &str) -> StyledObject<&str> {
    style(transaction).italic()
}

fn style_reversal(reversal: &str) -> StyledObject<&str> {
    style(reversal).yellow()
}

fn style_amount(amount: Decimal, currency_symbol: &str) -> StyledObject<String> {
    let result = style(format::format_amount(amount, currency_symbol)).bold();
    if amount < Decimal::ZERO {
        result.red()
    } else {
        result.green()
    }
}
