pub mod export;

pub use export::{
    ExportError, InitError, MetricBatch, MongoExporter, PointValue, StreamSummary, run_stream,
};
