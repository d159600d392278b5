//! HTTP surface of the analysis service

pub mod http;

pub use http::*;
