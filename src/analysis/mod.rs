pub mod error;
pub mod pipeline;
pub mod report;

pub use error::AnalysisError;
pub use pipeline::AnalysisPipeline;
pub use report::{AnalysisReport, ForecastStage, LatestSnapshot};
