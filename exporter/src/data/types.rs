//! Documents written by the exporter

use bson::{Document, doc};
use chrono::{DateTime, Local};

/// One exported measurement: a single column/point pair of a metric batch
///
/// Built fresh on every export call and handed straight to the sink.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    /// Metric family name (stored as `type`)
    pub kind: String,
    pub hostname: String,
    /// Column name within the family
    pub identifier: String,
    /// Capture time, taken when the document was built
    pub timestamp: DateTime<Local>,
    /// Point rendered as a string
    pub value: String,
}

impl ExportDocument {
    /// Convert to the BSON shape stored in the collection.
    ///
    /// `_id` is left unset so the server assigns one; the identifier repeats on
    /// every collection cycle.
    pub fn to_document(&self) -> Document {
        doc! {
            "type": self.kind.as_str(),
            "hostname": self.hostname.as_str(),
            "identifier": self.identifier.as_str(),
            "timestamp": bson::DateTime::from_chrono(self.timestamp),
            "source": {
                "value": self.value.as_str(),
            },
        }
    }
}
