//! Column descriptors and their label resolution.

use futures::future::join_all;
use serde::Serialize;

use crate::services::Translator;

/// Column as declared by the page embedding the table. `label` is a message key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub label: String,
    pub sortable: bool,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            sortable: true,
        }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

/// Column ready for display, carrying translated text.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub label: String,
    pub tooltip: String,
    pub sortable: bool,
}

/// Resolves every label through `translator` and returns fresh descriptors.
///
/// Lookups run concurrently; the output keeps the input order.
pub async fn resolve_columns<T>(translator: &T, specs: Vec<ColumnSpec>) -> Vec<Column>
where
    T: Translator + ?Sized,
{
    let labels = join_all(specs.iter().map(|spec| translator.resolve(&spec.label))).await;

    specs
        .into_iter()
        .zip(labels)
        .map(|(spec, text)| Column {
            name: spec.name,
            label: text.clone(),
            tooltip: text,
            sortable: spec.sortable,
        })
        .collect()
}
