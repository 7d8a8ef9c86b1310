use crate::error::Result;
use serde_json::Value;

/// Document persistence capability
///
/// Implementations:
/// - Firestore REST API (production)
/// - In-memory maps (development, tests)
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document with a generated identifier and return it
    async fn create(&self, collection: &str, data: Value) -> Result<String>;

    /// Create or overwrite the document at `id`
    async fn set(&self, collection: &str, id: &str, data: Value) -> Result<()>;

    /// Read a document, `None` when absent
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Backend name for logging
    fn name(&self) -> &str;
}
