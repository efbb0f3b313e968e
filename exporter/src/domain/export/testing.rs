//! In-memory sinks and log capture shared by the export tests

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing_subscriber::fmt::MakeWriter;

use crate::data::error::DataError;
use crate::data::traits::DocumentSink;
use crate::data::types::ExportDocument;

/// Records every bulk insert; optionally fails the first N calls
#[derive(Default)]
pub struct RecordingSink {
    batches: Mutex<Vec<Vec<ExportDocument>>>,
    failures_left: Mutex<usize>,
}

impl RecordingSink {
    pub fn failing_first(n: usize) -> Self {
        Self {
            batches: Mutex::new(Vec::new()),
            failures_left: Mutex::new(n),
        }
    }

    pub fn batches(&self) -> Vec<Vec<ExportDocument>> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentSink for RecordingSink {
    async fn insert_documents(&self, documents: &[ExportDocument]) -> Result<u64, DataError> {
        {
            let mut failures_left = self.failures_left.lock().unwrap();
            if *failures_left > 0 {
                *failures_left -= 1;
                return Err(DataError::io_failure("injected failure"));
            }
        }
        self.batches.lock().unwrap().push(documents.to_vec());
        Ok(documents.len() as u64)
    }

    fn target(&self) -> String {
        "memory.recording".to_string()
    }
}

/// Rejects every insert
pub struct FailingSink;

#[async_trait]
impl DocumentSink for FailingSink {
    async fn insert_documents(&self, _documents: &[ExportDocument]) -> Result<u64, DataError> {
        Err(DataError::io_failure("connection reset"))
    }

    fn target(&self) -> String {
        "memory.failing".to_string()
    }
}

/// Collects formatted log output for assertions
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Plain-text subscriber writing every level into this capture
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .without_time()
            .finish()
    }

    /// Captured lines whose level column matches `level` (e.g. "ERROR")
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf)
            .lines()
            .filter(|line| line.trim_start().starts_with(level))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
