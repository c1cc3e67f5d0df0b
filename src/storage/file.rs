//! JSON file document store.
//!
//! The document lives in a single pretty-printed JSON file. Writes go to a
//! hidden temp file next to it which is then renamed over the original.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::{fs, sync::Mutex};

use super::{merge_sections, Document, DocumentStore, Section};
use crate::error::{AppError, AppResult};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the file
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Creates a store backed by `path`, creating its parent directory if needed.
    /// The file itself is created on first write.
    pub fn new(path: PathBuf) -> AppResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("database.json");
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    async fn read_raw(&self) -> AppResult<Value> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(Value::Null),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Value::Null),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn write_raw(&self, root: &Value) -> AppResult<()> {
        let json = serde_json::to_string_pretty(root)?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, json).await?;
        fs::rename(&temp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn read_all(&self) -> AppResult<Document> {
        Document::from_value(self.read_raw().await?)
    }

    async fn write_sections(&self, sections: Vec<(Section, Value)>) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let names: Vec<&str> = sections.iter().map(|(s, _)| s.as_str()).collect();
        tracing::debug!("Writing sections {:?} to {}", names, self.path.display());

        let mut root = self.read_raw().await?;
        merge_sections(&mut root, sections)?;
        self.write_raw(&root).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_store() -> (FileStore, TempDir) {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("db").join("database.json")).unwrap();
        (store, temp)
    }

    #[tokio::test]
    async fn read_missing_file_is_empty() {
        let (store, _temp) = test_store();
        let doc = store.read_all().await.unwrap();
        assert_eq!(doc, Document::default());
    }

    #[tokio::test]
    async fn section_write_keeps_other_sections() {
        let (store, _temp) = test_store();

        store
            .write_section(Section::Toys, json!([]))
            .await
            .unwrap();
        store
            .write_sections(vec![(Section::Borrows, json!([])), (Section::Session, Value::Null)])
            .await
            .unwrap();

        let raw: Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw, json!({ "toys": [], "borrows": [], "session": null }));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn survives_reopen() {
        let (store, _temp) = test_store();
        let path = store.path().to_path_buf();

        let mut doc = Document::default();
        doc.set_section(Section::Users, json!([])).unwrap();
        store.write_all(&doc).await.unwrap();

        let reopened = FileStore::new(path).unwrap();
        assert_eq!(reopened.read_all().await.unwrap(), doc);
    }

    #[tokio::test]
    async fn malformed_file_is_a_storage_error() {
        let (store, _temp) = test_store();
        std::fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.read_all().await, Err(AppError::Storage(_))));
    }
}
