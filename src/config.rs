use anyhow::{anyhow, ensure, Context, Result};
use chrono::format::{Fixed, Item, Numeric, StrftimeItems};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// chrono strftime pattern used for timestamps in the ledger file and at the prompt
    pub date_format: String,
    pub currency_symbol: String,
    /// Sort the ledger by creation time when loading instead of rejecting an unsorted file
    pub sort_ledger: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            sort_ledger: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading config from {}...", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| anyhow!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| anyhow!("Error in config file {}", path.display()))?;
        log::info!("Loading config from {}...done", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let items: Vec<Item> = StrftimeItems::new(&self.date_format).collect();
        ensure!(
            !items.iter().any(|item| matches!(item, Item::Error)),
            "Invalid date format '{}'",
            self.date_format,
        );
        let has = |wanted: &[Numeric]| {
            items
                .iter()
                .any(|item| matches!(item, Item::Numeric(numeric, _) if wanted.contains(numeric)))
        };
        let has_fixed_date = items
            .iter()
            .any(|item| matches!(item, Item::Fixed(Fixed::RFC2822 | Fixed::RFC3339)));
        ensure!(
            has_fixed_date || (has(&[Numeric::Year]) && has(&[Numeric::Day, Numeric::Ordinal])),
            "Date format '{}' must contain a year and a day",
            self.date_format,
        );
        ensure!(
            has_fixed_date || has(&[Numeric::Hour, Numeric::Hour12]),
            "Date format '{}' must contain a time of day",
            self.date_format,
        );
        Ok(())
    }

    pub fn parse_datetime(&self, input: &str) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(input.trim(), &self.date_format).with_context(|| {
            anyhow!(
                "Failed to parse '{}' as a date with format '{}'",
                input,
                self.date_format
            )
        })
    }
}
