//! Sink trait for export backends
//!
//! The exporter only needs one capability from a datastore: insert a batch of
//! documents into its configured collection. Keeping that behind a trait lets
//! the document pipeline run against in-memory sinks in tests.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::types::ExportDocument;

/// Write-only destination for exported documents
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Insert all documents in a single bulk write.
    ///
    /// Returns the number of documents acknowledged by the backend.
    async fn insert_documents(&self, documents: &[ExportDocument]) -> Result<u64, DataError>;

    /// Human-readable destination (e.g. `metrics.cpu`) for log context
    fn target(&self) -> String;
}
