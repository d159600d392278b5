//! Shared data models spanning the pipeline stages.

pub mod chart;
pub mod forecast;
pub mod indicators;
pub mod price;
pub mod request;

pub use chart::{
    CandlePoint, CandlestickBundle, ClosePoint, ForecastOverlayBundle, IndicatorBundle,
    PricePanelRow, ReferenceLine, RsiPanelRow,
};
pub use forecast::{ArimaOrder, ForecastPoint, ForecastSeries};
pub use indicators::{IndicatorSet, MovingAverageSeries, RsiSeries, RsiSmoothing};
pub use price::{PriceRecord, PriceSeries, SeriesError};
pub use request::RequestContext;
