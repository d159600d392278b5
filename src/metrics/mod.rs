//! Prometheus metrics for the HTTP layer and analysis runs.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    /// Labelled by `outcome`: completed, forecast_failed, no_data, invalid_request, fetch_failed.
    pub analysis_runs_total: IntCounterVec,
    pub analysis_duration_seconds: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let analysis_runs_total = IntCounterVec::new(
            Opts::new("analysis_runs_total", "Analysis runs by outcome"),
            &["outcome"],
        )?;
        let analysis_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "analysis_duration_seconds",
                "Wall time of one analysis run including the fetch",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(analysis_runs_total.clone()))?;
        registry.register(Box::new(analysis_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            analysis_runs_total,
            analysis_duration_seconds,
        })
    }

    pub fn record_analysis(&self, outcome: &str, duration_seconds: f64) {
        self.analysis_runs_total.with_label_values(&[outcome]).inc();
        self.analysis_duration_seconds.observe(duration_seconds);
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
