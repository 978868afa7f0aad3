//! UI-facing state holders. Rendering is left to the embedding layer.

pub mod column;
pub mod data_table;
