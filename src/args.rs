use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Compute the relative balance of an account over a date range from a CSV ledger.
#[derive(Parser, Debug)]
pub struct Args {
    /// Path to the CSV ledger file
    #[clap(short, long)]
    pub ledger: PathBuf,

    /// Path to a YAML config file. Defaults are used if not given.
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the relative balance for a single account and date range
    Query {
        /// Account to compute the balance for
        #[clap(short, long)]
        account: String,

        /// Start of the date range (inclusive), in the configured date format
        #[clap(short, long)]
        from: String,

        /// End of the date range (exclusive), in the configured date format
        #[clap(short, long)]
        to: String,

        /// Also print the transactions included in the balance
        #[clap(long)]
        list: bool,
    },

    /// Repeatedly ask for an account and date range and print the relative balance
    Interactive,

    /// Print all transactions in the ledger
    List,
}

pub fn parse() -> Args {
    Args::parse()
}
