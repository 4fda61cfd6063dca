use anyhow::{bail, Context, Result};
use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Pretty,
}

impl OutputFormat {
    fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "pretty" => Ok(OutputFormat::Pretty),
            other => bail!("Unknown output format '{}' (expected table, json or pretty)", other),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub seed: u64,                // 42
    pub history_days: usize,      // 80
    pub window_days: usize,       // 30
    pub output: OutputFormat,     // table
    pub json_logging: bool,       // RUST_LOG_FORMAT=json
    /// Empty means the whole universe.
    pub symbols: Vec<String>,
    pub list_only: bool,
}

impl CliConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup, falling back to defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Self {
            seed: lookup("MARKET_DATA_SEED")
                .unwrap_or_else(|| "42".to_string())
                .parse()
                .context("MARKET_DATA_SEED must be an unsigned integer")?,
            history_days: lookup("MARKET_DATA_HISTORY_DAYS")
                .unwrap_or_else(|| "80".to_string())
                .parse()
                .context("MARKET_DATA_HISTORY_DAYS must be an unsigned integer")?,
            window_days: lookup("MARKET_DATA_WINDOW_DAYS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .context("MARKET_DATA_WINDOW_DAYS must be an unsigned integer")?,
            output: OutputFormat::parse(
                &lookup("ANALYSIS_OUTPUT").unwrap_or_else(|| "table".to_string()),
            )?,
            json_logging: lookup("RUST_LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            symbols: Vec::new(),
            list_only: false,
        };

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line flags on top of the environment.
    pub fn apply_args(mut self, args: &[String]) -> Result<Self> {
        let mut iter = args.iter().peekable();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--symbols" => {
                    while let Some(symbol) = iter.next_if(|a| !a.starts_with("--")) {
                        self.symbols.push(symbol.to_uppercase());
                    }
                    if self.symbols.is_empty() {
                        bail!("--symbols needs at least one symbol");
                    }
                }
                "--all" => self.symbols.clear(),
                "--json" => self.output = OutputFormat::Json,
                "--pretty" => self.output = OutputFormat::Pretty,
                "--list" => self.list_only = true,
                other => bail!("Unknown argument '{}'", other),
            }
        }
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.window_days == 0 {
            bail!("MARKET_DATA_WINDOW_DAYS must be positive");
        }
        if self.window_days > self.history_days {
            bail!(
                "MARKET_DATA_WINDOW_DAYS ({}) cannot exceed MARKET_DATA_HISTORY_DAYS ({})",
                self.window_days,
                self.history_days
            );
        }
        Ok(())
    }
}
