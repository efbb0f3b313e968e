//! Metric export pipeline
//!
//! Document construction, the MongoDB exporter and the JSON-lines driver.

mod error;
mod exporter;
mod stream;
#[cfg(test)]
pub(crate) mod testing;
mod value;

pub use error::{ExportError, InitError};
pub use exporter::{MetricBatch, MongoExporter};
pub use stream::{StreamSummary, run_stream};
pub use value::PointValue;
