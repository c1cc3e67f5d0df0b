//! In-process document store, used for tests and throwaway instances

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::{merge_sections, Document, DocumentStore, Section};
use crate::error::AppResult;

#[derive(Debug, Default)]
pub struct MemoryStore {
    root: Mutex<Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `document`
    pub fn with_document(document: &Document) -> AppResult<Self> {
        let mut root = Value::Null;
        merge_sections(&mut root, document.to_sections()?)?;
        Ok(Self {
            root: Mutex::new(root),
        })
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read_all(&self) -> AppResult<Document> {
        let root = self.root.lock().await.clone();
        Document::from_value(root)
    }

    async fn write_sections(&self, sections: Vec<(Section, Value)>) -> AppResult<()> {
        let mut root = self.root.lock().await;
        merge_sections(&mut root, sections)
    }
}
