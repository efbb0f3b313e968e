use async_trait::async_trait;

use super::MongoService;
use crate::data::error::DataError;
use crate::data::traits::DocumentSink;
use crate::data::types::ExportDocument;

#[async_trait]
impl DocumentSink for MongoService {
    async fn insert_documents(&self, documents: &[ExportDocument]) -> Result<u64, DataError> {
        let expected = documents.len() as u64;
        let docs: Vec<_> = documents.iter().map(ExportDocument::to_document).collect();

        let result = self.collection().insert_many(docs).await?;
        let inserted = result.inserted_ids.len() as u64;

        if inserted != expected {
            return Err(DataError::PartialInsert {
                target: self.target(),
                inserted,
                expected,
            });
        }

        tracing::trace!(target_collection = %self.target, inserted, "insert_many acknowledged");
        Ok(inserted)
    }

    fn target(&self) -> String {
        self.target.clone()
    }
}
