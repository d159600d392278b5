pub mod messages;
pub mod provider;

pub use provider::{parse_chart_response, YahooMarketDataProvider};
