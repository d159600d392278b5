//! Request handler for one analysis run
//!
//! validate -> fetch -> indicators -> charts -> forecast. Each stage only runs
//! when the previous one produced data; a forecast failure is reported in the
//! result instead of aborting it.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::analysis::error::AnalysisError;
use crate::analysis::report::{AnalysisReport, ForecastStage, LatestSnapshot};
use crate::config::AnalysisSettings;
use crate::forecast::ForecastEngine;
use crate::indicators::IndicatorEngine;
use crate::models::price::PriceSeries;
use crate::models::request::RequestContext;
use crate::presentation::PresentationAdapter;
use crate::services::market_data::MarketDataProvider;

pub struct AnalysisPipeline {
    provider: Arc<dyn MarketDataProvider>,
    indicators: IndicatorEngine,
    forecaster: ForecastEngine,
    presenter: PresentationAdapter,
    preview_rows: usize,
}

impl AnalysisPipeline {
    pub fn new(provider: Arc<dyn MarketDataProvider>, settings: &AnalysisSettings) -> Self {
        Self {
            provider,
            indicators: IndicatorEngine::new(settings.indicators.clone()),
            forecaster: ForecastEngine::new(settings.forecast),
            presenter: PresentationAdapter::new(settings.rsi_overbought, settings.rsi_oversold),
            preview_rows: settings.preview_rows,
        }
    }

    /// Validate raw user input, then run the analysis.
    pub async fn run(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<AnalysisReport, AnalysisError> {
        let context = RequestContext::new(symbol, start, end)?;
        self.run_context(&context).await
    }

    pub async fn run_context(
        &self,
        context: &RequestContext,
    ) -> Result<AnalysisReport, AnalysisError> {
        info!(
            stage = "fetch",
            symbol = %context.symbol,
            start = %context.start,
            end = %context.end,
            "AnalysisPipeline: fetching history for {}",
            context.symbol
        );

        let series = self
            .provider
            .fetch(&context.symbol, context.start, context.end)
            .await?;

        if series.is_empty() {
            warn!(
                symbol = %context.symbol,
                "AnalysisPipeline: no data returned for {}",
                context.symbol
            );
            return Err(AnalysisError::EmptyData {
                symbol: context.symbol.clone(),
                start: context.start,
                end: context.end,
            });
        }

        self.analyze_series(context, &series)
    }

    /// Everything after the fetch. `series` must not be empty.
    pub fn analyze_series(
        &self,
        context: &RequestContext,
        series: &PriceSeries,
    ) -> Result<AnalysisReport, AnalysisError> {
        if series.is_empty() {
            return Err(AnalysisError::EmptyData {
                symbol: context.symbol.clone(),
                start: context.start,
                end: context.end,
            });
        }

        debug!(
            stage = "indicators",
            symbol = %context.symbol,
            "AnalysisPipeline: computing indicators for {}",
            context.symbol
        );
        let indicators = self.indicators.compute(series)?;

        debug!(
            stage = "charts",
            symbol = %context.symbol,
            "AnalysisPipeline: building charts for {}",
            context.symbol
        );
        let candlestick = self.presenter.candlestick(series);
        let indicator_panels = self.presenter.indicator_panels(series, &indicators)?;

        debug!(
            stage = "forecast",
            symbol = %context.symbol,
            "AnalysisPipeline: forecasting {}",
            context.symbol
        );
        let forecast = match self.forecaster.forecast(series) {
            Ok(forecast) => {
                let overlay = self.presenter.forecast_overlay(series, &forecast)?;
                debug!(
                    symbol = %context.symbol,
                    horizon = forecast.horizon(),
                    "AnalysisPipeline: forecast ready for {}",
                    context.symbol
                );
                ForecastStage::Ready {
                    series: forecast,
                    overlay,
                }
            }
            Err(e) => {
                warn!(
                    symbol = %context.symbol,
                    error = %e,
                    "AnalysisPipeline: forecast failed for {}",
                    context.symbol
                );
                ForecastStage::Failed {
                    message: e.to_string(),
                }
            }
        };

        info!(
            symbol = %context.symbol,
            records = series.len(),
            forecast_ready = forecast.is_ready(),
            "AnalysisPipeline: analysis complete for {}",
            context.symbol
        );

        Ok(AnalysisReport {
            context: context.clone(),
            record_count: series.len(),
            preview: series.tail(self.preview_rows).to_vec(),
            latest: LatestSnapshot::from_series(series, &indicators),
            candlestick,
            indicators: indicator_panels,
            forecast,
        })
    }
}
