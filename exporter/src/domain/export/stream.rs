//! JSON-lines batch driver
//!
//! Stands in for the host collection loop: reads one `MetricBatch` per line
//! and exports batches strictly one at a time.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;

use super::exporter::{MetricBatch, MongoExporter};

/// Counters reported when the stream ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub exported_batches: u64,
    pub failed_batches: u64,
    pub skipped_lines: u64,
    pub documents: u64,
}

/// Export every batch read from `reader` until EOF or shutdown.
///
/// Malformed lines are skipped with a warning. Export failures are already
/// logged by the exporter and only counted here. Dropping the shutdown sender
/// counts as a shutdown request.
pub async fn run_stream<R>(
    exporter: &MongoExporter,
    reader: R,
    mut shutdown_rx: watch::Receiver<bool>,
) -> std::io::Result<StreamSummary>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut summary = StreamSummary::default();
    let mut line_no: u64 = 0;

    loop {
        let line = tokio::select! {
            biased;
            changed = shutdown_rx.changed() => {
                if changed.is_err() || *shutdown_rx.borrow() {
                    tracing::debug!("Stream received shutdown");
                    break;
                }
                continue;
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            break;
        };
        line_no += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let batch: MetricBatch = match serde_json::from_str(trimmed) {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "Skipping malformed batch");
                summary.skipped_lines += 1;
                continue;
            }
        };

        match exporter.export_batch(&batch).await {
            Ok(written) => {
                summary.exported_batches += 1;
                summary.documents += written as u64;
            }
            Err(_) => summary.failed_batches += 1,
        }
    }

    tracing::debug!(
        exported = summary.exported_batches,
        failed = summary.failed_batches,
        skipped = summary.skipped_lines,
        documents = summary.documents,
        "Stream finished"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::export::testing::{LogCapture, RecordingSink};

    #[tokio::test]
    async fn test_run_stream_exports_each_line() {
        let sink = Arc::new(RecordingSink::default());
        let exporter = MongoExporter::with_sink(sink.clone(), "node-1");
        let input = concat!(
            r#"{"name": "cpu", "columns": ["core0", "core1"], "points": [12.5, 7.0]}"#,
            "\n",
            "\n",
            "# comment\n",
            r#"{"name": "load", "columns": ["min1"], "points": [0.5]}"#,
            "\n",
        );
        let (_tx, rx) = watch::channel(false);

        let summary = run_stream(&exporter, input.as_bytes(), rx).await.unwrap();
        assert_eq!(
            summary,
            StreamSummary {
                exported_batches: 2,
                failed_batches: 0,
                skipped_lines: 0,
                documents: 3,
            }
        );
        let batches = sink.batches();
        assert_eq!(batches[0][1].value, "7.0");
        assert_eq!(batches[1][0].kind, "load");
    }

    #[tokio::test]
    async fn test_run_stream_skips_malformed_and_counts_failures() {
        let sink = Arc::new(RecordingSink::failing_first(1));
        let exporter = MongoExporter::with_sink(sink.clone(), "node-1");
        let input = concat!(
            r#"{"name": "cpu", "columns": ["core0"], "points": [1.0]}"#,
            "\n",
            "not json\n",
            r#"{"name": "cpu", "columns": ["core0"]}"#,
            "\n",
            r#"{"name": "cpu", "columns": ["core0"], "points": [2.0]}"#,
            "\n",
        );
        let (_tx, rx) = watch::channel(false);

        let summary = run_stream(&exporter, input.as_bytes(), rx).await.unwrap();
        assert_eq!(summary.failed_batches, 1);
        assert_eq!(summary.skipped_lines, 2);
        assert_eq!(summary.exported_batches, 1);
        assert_eq!(sink.batches().len(), 1);
    }

    #[tokio::test]
    async fn test_run_stream_logs_one_summary_at_debug() {
        let capture = LogCapture::default();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        let exporter = MongoExporter::with_sink(Arc::new(RecordingSink::default()), "node-1");
        let input = r#"{"name": "cpu", "columns": ["core0"], "points": [1.0]}"#;
        let (_tx, rx) = watch::channel(false);

        run_stream(&exporter, input.as_bytes(), rx).await.unwrap();

        let summaries: Vec<String> = capture
            .lines_at("DEBUG")
            .into_iter()
            .filter(|line| line.contains("Stream finished"))
            .collect();
        assert_eq!(summaries.len(), 1);
        assert!(summaries[0].contains("exported=1"));
        assert!(capture.lines_at("INFO").is_empty());
    }

    #[tokio::test]
    async fn test_run_stream_stops_on_shutdown() {
        let sink = Arc::new(RecordingSink::default());
        let exporter = MongoExporter::with_sink(sink.clone(), "node-1");
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        // Reader that never yields a line; only shutdown can end the loop.
        let (_client, server) = tokio::io::duplex(64);
        let reader = tokio::io::BufReader::new(server);

        let summary = run_stream(&exporter, reader, rx).await.unwrap();
        assert_eq!(summary, StreamSummary::default());
        assert!(sink.batches().is_empty());
    }
}
