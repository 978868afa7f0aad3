//! Message catalog backing the [`Translator`] lookup.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::repository::errors::RepositoryResult;
use crate::services::Translator;

/// Flat key/value catalog. Keys missing from the catalog resolve to themselves.
#[derive(Debug, Clone, Default)]
pub struct CatalogTranslator {
    messages: Arc<HashMap<String, String>>,
}

impl CatalogTranslator {
    pub fn new(messages: HashMap<String, String>) -> Self {
        Self {
            messages: Arc::new(messages),
        }
    }

    /// Reads a JSON object of `key: text` pairs from `path`.
    pub fn from_file(path: impl AsRef<Path>) -> RepositoryResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let messages: HashMap<String, String> = serde_json::from_str(&raw)?;
        Ok(Self::new(messages))
    }

    pub fn lookup(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

impl Translator for CatalogTranslator {
    fn resolve(&self, key: &str) -> BoxFuture<'static, String> {
        let text = self.lookup(key);
        Box::pin(async move { text })
    }
}
