//! Document store backends.
//!
//! The whole dataset is one JSON document with a fixed set of sections
//! (`users`, `toys`, `borrows`, `session`). Backends only support reading the
//! whole document and replacing whole sections; there is no row-level update.
//!
//! ```text
//! {
//!   "users":   [ ... ],
//!   "toys":    [ ... ],
//!   "borrows": [ ... ],
//!   "session": { ... } | null
//! }
//! ```

pub mod file;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    config::{StorageBackend, StorageConfig},
    error::{AppError, AppResult},
    models::{BorrowRecord, Toy, User},
};

pub use file::FileStore;
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Named top-level section of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Users,
    Toys,
    Borrows,
    Session,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Users,
        Section::Toys,
        Section::Borrows,
        Section::Session,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Users => "users",
            Section::Toys => "toys",
            Section::Borrows => "borrows",
            Section::Session => "session",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| format!("Unknown section: {}", s))
    }
}

/// Typed view of the whole document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub toys: Vec<Toy>,
    #[serde(default)]
    pub borrows: Vec<BorrowRecord>,
    /// Snapshot of the currently authenticated actor
    #[serde(default)]
    pub session: Option<User>,
}

impl Document {
    /// Parse a raw JSON document; missing sections default to empty
    pub fn from_value(value: Value) -> AppResult<Self> {
        match value {
            Value::Null => Ok(Document::default()),
            value => Ok(serde_json::from_value(value)?),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.toys.is_empty() && self.borrows.is_empty()
    }

    pub fn section_value(&self, section: Section) -> AppResult<Value> {
        let value = match section {
            Section::Users => serde_json::to_value(&self.users)?,
            Section::Toys => serde_json::to_value(&self.toys)?,
            Section::Borrows => serde_json::to_value(&self.borrows)?,
            Section::Session => serde_json::to_value(&self.session)?,
        };
        Ok(value)
    }

    /// Replace one section from raw JSON, checking that it matches the schema
    pub fn set_section(&mut self, section: Section, data: Value) -> AppResult<()> {
        match section {
            Section::Users => self.users = serde_json::from_value(data)?,
            Section::Toys => self.toys = serde_json::from_value(data)?,
            Section::Borrows => self.borrows = serde_json::from_value(data)?,
            Section::Session => self.session = serde_json::from_value(data)?,
        }
        Ok(())
    }

    pub fn to_sections(&self) -> AppResult<Vec<(Section, Value)>> {
        Section::ALL
            .into_iter()
            .map(|section| Ok((section, self.section_value(section)?)))
            .collect()
    }
}

/// Whole-document persistence backend
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read every section
    async fn read_all(&self) -> AppResult<Document>;

    /// Replace the given sections in one atomic write
    async fn write_sections(&self, sections: Vec<(Section, Value)>) -> AppResult<()>;

    /// Replace a single section
    async fn write_section(&self, section: Section, data: Value) -> AppResult<()> {
        self.write_sections(vec![(section, data)]).await
    }

    /// Replace the entire document
    async fn write_all(&self, document: &Document) -> AppResult<()> {
        self.write_sections(document.to_sections()?).await
    }
}

/// Apply section replacements onto a raw JSON document
pub(crate) fn merge_sections(root: &mut Value, sections: Vec<(Section, Value)>) -> AppResult<()> {
    if !root.is_object() {
        *root = Value::Object(Map::new());
    }
    let map = root
        .as_object_mut()
        .ok_or_else(|| AppError::Storage("Document root is not an object".to_string()))?;
    for (section, data) in sections {
        map.insert(section.as_str().to_string(), data);
    }
    Ok(())
}

/// Open the backend selected in configuration
pub async fn open_store(config: &StorageConfig) -> AppResult<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.backend {
        StorageBackend::File => Arc::new(FileStore::new(config.path.clone())?),
        StorageBackend::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                AppError::Storage("storage.database_url is required for postgres".to_string())
            })?;
            Arc::new(PgStore::connect(url, config.max_connections).await?)
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    tracing::info!("Opened {:?} document store", config.backend);
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_names() {
        for section in Section::ALL {
            assert_eq!(section.as_str().parse::<Section>(), Ok(section));
        }
        assert!("loans".parse::<Section>().is_err());
    }

    #[test]
    fn test_document_defaults_missing_sections() {
        let doc = Document::from_value(json!({ "toys": [] })).unwrap();
        assert!(doc.is_empty());
        assert!(doc.session.is_none());
        assert_eq!(Document::from_value(Value::Null).unwrap(), Document::default());
    }

    #[test]
    fn test_set_section_rejects_malformed_data() {
        let mut doc = Document::default();
        let result = doc.set_section(Section::Toys, json!([{ "name": "no id" }]));
        assert!(matches!(result, Err(AppError::Storage(_))));
        assert!(doc.toys.is_empty());
    }

    #[test]
    fn test_merge_sections() {
        let mut root = Value::Null;
        merge_sections(&mut root, vec![(Section::Toys, json!([1, 2]))]).unwrap();
        merge_sections(&mut root, vec![(Section::Session, Value::Null)]).unwrap();
        assert_eq!(root, json!({ "toys": [1, 2], "session": null }));
    }
}
