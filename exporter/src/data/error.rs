//! Error type for the data layer

use thiserror::Error;

/// Data layer errors
///
/// Wraps driver errors while keeping the backend name for log context.
#[derive(Error, Debug)]
pub enum DataError {
    /// MongoDB driver error
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Server acknowledged fewer documents than were sent
    #[error("Insert into {target} acknowledged {inserted} of {expected} documents")]
    PartialInsert {
        target: String,
        inserted: u64,
        expected: u64,
    },
}

impl DataError {
    /// Check if this is a connection-related error that might be transient
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Mongo(e) => matches!(
                e.kind.as_ref(),
                mongodb::error::ErrorKind::Io(_)
                    | mongodb::error::ErrorKind::ServerSelection { .. }
                    | mongodb::error::ErrorKind::ConnectionPoolCleared { .. }
            ),
            Self::PartialInsert { .. } => false,
        }
    }

    /// Driver-level I/O failure, as raised when a connection drops mid-write
    #[cfg(test)]
    pub(crate) fn io_failure(reason: &str) -> Self {
        Self::Mongo(mongodb::error::Error::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            reason.to_string(),
        )))
    }
}
