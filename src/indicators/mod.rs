pub mod engine;
pub mod error;

pub mod momentum;
pub mod trend;

pub use engine::{IndicatorConfig, IndicatorEngine};
pub use error::IndicatorError;
