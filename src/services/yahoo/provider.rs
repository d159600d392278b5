//! Yahoo Finance daily price provider

use std::collections::BTreeMap;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, NaiveDate};
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use super::messages::ChartResponse;
use crate::config::FetchConfig;
use crate::models::price::{PriceRecord, PriceSeries};
use crate::services::market_data::{MarketDataError, MarketDataProvider};

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) stockscope/0.1";

pub struct YahooMarketDataProvider {
    client: reqwest::Client,
    base_url: String,
    max_retries: usize,
}

impl YahooMarketDataProvider {
    pub fn new(config: &FetchConfig) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| MarketDataError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(config.base_url.clone(), client).with_max_retries(config.max_retries))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            max_retries: 0,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Url, MarketDataError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| MarketDataError::Source(format!("invalid base URL '{}': {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| MarketDataError::Source(format!("base URL '{}' cannot have a path", self.base_url)))?
            .pop_if_empty()
            .extend(&["v8", "finance", "chart", symbol]);

        url.query_pairs_mut()
            .append_pair("period1", &unix_midnight(start)?.to_string())
            .append_pair("period2", &unix_midnight(end)?.to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "history");

        Ok(url)
    }

    async fn request(&self, url: &Url) -> Result<(StatusCode, String), MarketDataError> {
        let response = self
            .client
            .get(url.clone())
            .header("referer", "https://finance.yahoo.com/")
            .send()
            .await
            .map_err(|e| MarketDataError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::Transport(e.to_string()))?;

        // 404 carries a chart error payload for unknown symbols.
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(MarketDataError::Status {
                status: status.as_u16(),
            });
        }
        Ok((status, body))
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for YahooMarketDataProvider {
    async fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, MarketDataError> {
        let url = self.chart_url(symbol, start, end)?;
        debug!(symbol = %symbol, url = %url, "YahooMarketDataProvider: fetching chart");

        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(250))
            .with_max_times(self.max_retries);

        let url = &url;
        let (status, body) = (|| async move { self.request(url).await })
            .retry(backoff)
            .when(MarketDataError::is_transient)
            .notify(|err: &MarketDataError, delay: Duration| {
                warn!(
                    symbol = %symbol,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "YahooMarketDataProvider: retrying chart request"
                );
            })
            .await?;

        match parse_chart_response(symbol, &body, start, end) {
            Err(MarketDataError::Parse(_)) if status == StatusCode::NOT_FOUND => {
                Err(MarketDataError::Status { status: status.as_u16() })
            }
            other => other,
        }
    }
}

/// Turn a chart payload into a daily series.
///
/// Rows missing any OHLC value are dropped, a missing volume becomes zero, and
/// duplicate dates keep the last row (Yahoo repeats the live session bar).
pub fn parse_chart_response(
    symbol: &str,
    body: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries, MarketDataError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|e| MarketDataError::Parse(format!("failed to parse yahoo chart: {}", e)))?;

    if let Some(error) = &response.chart.error {
        if error.is_not_found() {
            debug!(symbol = %symbol, "YahooMarketDataProvider: symbol not found");
            return Ok(PriceSeries::empty(symbol));
        }
        return Err(MarketDataError::Source(format!(
            "{}: {}",
            error.code,
            error.description.as_deref().unwrap_or("no description")
        )));
    }

    let Some(result) = response.chart.result.as_ref().and_then(|r| r.first()) else {
        return Ok(PriceSeries::empty(symbol));
    };
    let Some(timestamps) = result.timestamp.as_ref() else {
        return Ok(PriceSeries::empty(symbol));
    };
    let Some(quote) = result.indicators.quote.first() else {
        return Ok(PriceSeries::empty(symbol));
    };

    let offset = result.meta.as_ref().and_then(|m| m.gmtoffset).unwrap_or(0);
    let mut by_date = BTreeMap::new();

    for (i, &ts) in timestamps.iter().enumerate() {
        let date = DateTime::from_timestamp(ts + offset, 0)
            .ok_or_else(|| MarketDataError::Parse(format!("invalid timestamp {}", ts)))?
            .date_naive();
        if date < start || date >= end {
            continue;
        }

        let field = |values: &Vec<Option<f64>>| values.get(i).copied().flatten();
        if let (Some(open), Some(high), Some(low), Some(close)) = (
            field(&quote.open),
            field(&quote.high),
            field(&quote.low),
            field(&quote.close),
        ) {
            let volume = field(&quote.volume).unwrap_or(0.0);
            by_date.insert(date, PriceRecord::new(date, open, high, low, close, volume));
        }
    }

    Ok(PriceSeries::new(symbol, by_date.into_values().collect())?)
}

fn unix_midnight(date: NaiveDate) -> Result<i64, MarketDataError> {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .ok_or_else(|| MarketDataError::Source(format!("invalid date {}", date)))
}
