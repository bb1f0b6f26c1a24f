pub mod args;
pub mod cli;
pub mod config;
pub mod format;
pub mod import;
pub mod ledger;
pub mod model;
pub mod query;
pub mod terminal;

#[cfg(test)]
mod testutils;
