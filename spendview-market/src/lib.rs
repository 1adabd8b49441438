//! spendview-market: the market data gateway — currency rates and stock
//! quotes fetched from external APIs, degrading to per-entry nulls on
//! failure.

pub mod quotes;

pub use quotes::{MarketClient, MarketConfig};
