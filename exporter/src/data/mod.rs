//! Data layer
//!
//! Export documents, the sink abstraction and the MongoDB backend.

pub mod error;
pub mod mongo;
pub mod traits;
pub mod types;

pub use error::DataError;
pub use mongo::MongoService;
pub use traits::DocumentSink;
pub use types::ExportDocument;
