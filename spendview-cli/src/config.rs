use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use spendview_market::MarketConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub user: UserSection,
    #[serde(default)]
    pub market: MarketSection,
}

/// What the user wants on the home page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSection {
    #[serde(default)]
    pub currencies: Vec<String>,
    #[serde(default)]
    pub stocks: Vec<String>,
}

impl Default for UserSection {
    fn default() -> Self {
        Self {
            currencies: vec!["USD".to_string(), "EUR".to_string()],
            stocks: vec!["AAPL".to_string(), "GOOGL".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSection {
    #[serde(default)]
    pub api_key_currency: String,
    #[serde(default)]
    pub api_key_stocks: String,
    #[serde(default = "default_quote_currency")]
    pub quote_currency: String,
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            api_key_currency: String::new(),
            api_key_stocks: String::new(),
            quote_currency: default_quote_currency(),
        }
    }
}

fn default_quote_currency() -> String {
    "RUB".to_string()
}

impl Config {
    pub fn market_config(&self) -> MarketConfig {
        MarketConfig {
            api_key_currency: self.market.api_key_currency.clone(),
            api_key_stocks: self.market.api_key_stocks.clone(),
            quote_currency: self.market.quote_currency.clone(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}
