//! Fetch exchange rates and stock prices.
//!
//! One request per symbol, in input order. A failed request, a
//! non-success status, or a payload missing the expected fields yields
//! `None` for that symbol only; siblings are unaffected and the batch
//! never aborts.

use log::{error, info};
use serde_json::Value;

use spendview_core::report::{ExchangeRate, StockPrice};

const EXCHANGE_RATE_BASE: &str = "https://v6.exchangerate-api.com/v6";
const STOCK_QUOTE_BASE: &str = "https://www.alphavantage.co/query";

/// Gateway configuration, passed in explicitly by the caller.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    pub api_key_currency: String,
    pub api_key_stocks: String,
    /// Currency the exchange rates are quoted in.
    pub quote_currency: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_key_currency: String::new(),
            api_key_stocks: String::new(),
            quote_currency: "RUB".to_string(),
        }
    }
}

pub struct MarketClient {
    http: reqwest::Client,
    config: MarketConfig,
}

impl MarketClient {
    pub fn new(config: MarketConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Rate of each currency code against the configured quote currency.
    pub async fn exchange_rates(&self, currencies: &[String]) -> Vec<ExchangeRate> {
        let mut rates = Vec::with_capacity(currencies.len());
        for currency in currencies {
            let rate = self.fetch_rate(currency).await;
            rates.push(ExchangeRate {
                currency: currency.clone(),
                rate,
            });
        }
        info!("fetched {} exchange rates", rates.len());
        rates
    }

    /// Latest daily close for each stock symbol.
    pub async fn stock_prices(&self, symbols: &[String]) -> Vec<StockPrice> {
        let mut prices = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let price = self.fetch_close(symbol).await;
            prices.push(StockPrice {
                stock: symbol.clone(),
                price,
            });
        }
        info!("fetched {} stock prices", prices.len());
        prices
    }

    async fn fetch_rate(&self, currency: &str) -> Option<f64> {
        let url = format!(
            "{EXCHANGE_RATE_BASE}/{}/latest/{currency}",
            self.config.api_key_currency
        );
        let body = self.get_json(&url, currency).await?;
        let rate = extract_rate(&body, &self.config.quote_currency);
        if rate.is_none() {
            error!(
                "no {} rate for {currency} in exchange rate payload",
                self.config.quote_currency
            );
        }
        rate
    }

    async fn fetch_close(&self, symbol: &str) -> Option<f64> {
        let url = format!(
            "{STOCK_QUOTE_BASE}?function=TIME_SERIES_DAILY&symbol={symbol}&apikey={}",
            self.config.api_key_stocks
        );
        let body = self.get_json(&url, symbol).await?;
        let price = extract_latest_close(&body);
        if price.is_none() {
            error!("no daily series for {symbol} in stock payload");
        }
        price
    }

    async fn get_json(&self, url: &str, symbol: &str) -> Option<Value> {
        let response = match self.http.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                error!("request for {symbol} failed: {e}");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            error!("request for {symbol} returned {status}");
            return None;
        }

        match response.json().await {
            Ok(body) => Some(body),
            Err(e) => {
                error!("malformed payload for {symbol}: {e}");
                None
            }
        }
    }
}

/// Pull the quote-currency rate out of an exchangerate-api payload.
fn extract_rate(body: &Value, quote_currency: &str) -> Option<f64> {
    body.get("conversion_rates")?.get(quote_currency)?.as_f64()
}

/// Pull the most recent `4. close` out of an alphavantage daily series.
/// Closes arrive as strings; tolerate plain numbers too.
fn extract_latest_close(body: &Value) -> Option<f64> {
    let series = body.get("Time Series (Daily)")?.as_object()?;
    let latest = series.keys().max()?;
    let close = series.get(latest)?.get("4. close")?;
    match close {
        Value::String(s) => s.parse().ok(),
        other => other.as_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_rate() {
        let body = json!({
            "base_code": "USD",
            "conversion_rates": { "RUB": 73.21, "EUR": 0.91 }
        });
        assert_eq!(extract_rate(&body, "RUB"), Some(73.21));
        assert_eq!(extract_rate(&body, "EUR"), Some(0.91));
        assert_eq!(extract_rate(&body, "GBP"), None);
    }

    #[test]
    fn test_extract_rate_malformed_body() {
        assert_eq!(extract_rate(&json!({}), "RUB"), None);
        assert_eq!(extract_rate(&json!({"conversion_rates": "oops"}), "RUB"), None);
        assert_eq!(extract_rate(&json!(null), "RUB"), None);
    }

    #[test]
    fn test_extract_latest_close_picks_newest_date() {
        let body = json!({
            "Time Series (Daily)": {
                "2020-03-19": { "4. close": "240.10" },
                "2020-03-20": { "4. close": "246.79" },
                "2020-03-18": { "4. close": "238.00" }
            }
        });
        assert_eq!(extract_latest_close(&body), Some(246.79));
    }

    #[test]
    fn test_extract_latest_close_tolerates_numbers() {
        let body = json!({
            "Time Series (Daily)": {
                "2020-03-20": { "4. close": 246.79 }
            }
        });
        assert_eq!(extract_latest_close(&body), Some(246.79));
    }

    #[test]
    fn test_extract_latest_close_missing_series() {
        // Rate-limited responses come back 200 with a "Note" body.
        let body = json!({ "Note": "Thank you for using Alpha Vantage!" });
        assert_eq!(extract_latest_close(&body), None);
        assert_eq!(extract_latest_close(&json!({})), None);
    }

    #[test]
    fn test_default_quote_currency() {
        assert_eq!(MarketConfig::default().quote_currency, "RUB");
    }
}
