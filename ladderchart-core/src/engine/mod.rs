//! Computation engine: indicator precompute and the analysis pipeline.

pub mod pipeline;
pub mod precompute;

pub use pipeline::{analyze, ChartAnalysis};
pub use precompute::{compute_bundle, compute_warmup};
