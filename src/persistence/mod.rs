//! Persistence gateway: saved-song storage, export, and import
//!
//! Documents are serialized to JSON and written to a [`KeyValueStore`]
//! under id-namespaced keys, with an index record of `{id, title}` rows
//! under one well-known key. Save ids combine a title slug with a creation
//! timestamp so re-saving a title never overwrites an earlier entry.
//!
//! All failures here are recoverable: a failed load or import surfaces an
//! error and never touches the caller's working document.

pub mod errors;
pub mod storage;

pub use errors::{PersistenceError, StorageError};
pub use storage::{DirStore, KeyValueStore, MemoryStore};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::core::SongComposition;

/// Fixed key the index record lives under.
pub const INDEX_KEY: &str = "song.index";

/// One row of the saved-song index.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    pub id: String,
    pub title: String,
}

/// A serialized document offered for download.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    /// Suggested download name, slugged from the title.
    pub filename: String,
    /// Pretty-printed JSON.
    pub contents: String,
}

/// Gateway between the working document and a key/value store.
#[derive(Clone, Debug, Default)]
pub struct PersistenceGateway<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Save a snapshot of `doc` under a fresh id and index it. Returns the
    /// generated id. Saving the same title twice creates two entries.
    pub fn save(&mut self, doc: &SongComposition) -> Result<String, PersistenceError> {
        let id = format!(
            "{}-{}",
            slug_or_untitled(&doc.title),
            chrono::Utc::now().timestamp_millis()
        );
        let serialized = serde_json::to_string(doc)?;

        let mut index = self.read_index()?;
        index.insert(
            id.clone(),
            IndexEntry {
                id: id.clone(),
                title: doc.title.clone(),
            },
        );

        self.store.set(&doc_key(&id), &serialized)?;
        self.write_index(&index)?;
        log::info!("saved composition `{}` as {}", doc.title, id);
        Ok(id)
    }

    /// The saved-song index as a restartable sequence of `{id, title}`
    /// rows. Call again for a fresh pass.
    pub fn list(&self) -> Result<impl Iterator<Item = IndexEntry>, PersistenceError> {
        Ok(self.read_index()?.into_values())
    }

    /// Load one saved document. The caller replaces its working document
    /// wholesale with the result.
    pub fn load(&self, id: &str) -> Result<SongComposition, PersistenceError> {
        let Some(serialized) = self.store.get(&doc_key(id))? else {
            return Err(PersistenceError::NotFound(id.to_string()));
        };
        let doc: SongComposition = serde_json::from_str(&serialized)?;
        log::info!("loaded composition {}", id);
        Ok(doc)
    }

    /// Remove a saved document and its index row.
    pub fn delete(&mut self, id: &str) -> Result<(), PersistenceError> {
        self.store.remove(&doc_key(id))?;
        let mut index = self.read_index()?;
        index.remove(id);
        self.write_index(&index)?;
        log::info!("deleted composition {}", id);
        Ok(())
    }

    fn read_index(&self) -> Result<BTreeMap<String, IndexEntry>, PersistenceError> {
        match self.store.get(INDEX_KEY)? {
            Some(serialized) => Ok(serde_json::from_str(&serialized)?),
            None => Ok(BTreeMap::new()),
        }
    }

    fn write_index(
        &mut self,
        index: &BTreeMap<String, IndexEntry>,
    ) -> Result<(), PersistenceError> {
        let serialized = serde_json::to_string(index)?;
        self.store.set(INDEX_KEY, &serialized)?;
        Ok(())
    }
}

/// Serialize `doc` as a pretty-printed download named after its title.
/// The host performs the actual file offer.
pub fn export_json(doc: &SongComposition) -> Result<ExportFile, PersistenceError> {
    Ok(ExportFile {
        filename: format!("{}.json", slug_or_untitled(&doc.title)),
        contents: serde_json::to_string_pretty(doc)?,
    })
}

/// Parse pasted/uploaded JSON into a composition.
///
/// The value must carry truthy `beat`, `columns`, and `bpm` fields and an
/// array `Song` field; anything else is a recoverable invalid-format error
/// and the caller's working document stays untouched. A missing title
/// defaults to "Imported Song".
pub fn import_from_text(text: &str) -> Result<SongComposition, PersistenceError> {
    let mut value: Value =
        serde_json::from_str(text).map_err(|e| PersistenceError::invalid(e.to_string()))?;

    let obj = value
        .as_object()
        .ok_or_else(|| PersistenceError::invalid("not a JSON object"))?;
    if !is_truthy(obj.get("beat")) {
        return Err(PersistenceError::invalid("missing beat"));
    }
    if !is_truthy(obj.get("columns")) {
        return Err(PersistenceError::invalid("missing columns"));
    }
    if !is_truthy(obj.get("bpm")) {
        return Err(PersistenceError::invalid("missing bpm"));
    }
    if !obj.get("Song").map(Value::is_array).unwrap_or(false) {
        return Err(PersistenceError::invalid("Song must be an array"));
    }

    if let Some(obj) = value.as_object_mut() {
        if !obj.get("title").map(is_present).unwrap_or(false) {
            obj.insert("title".to_string(), Value::from("Imported Song"));
        }
    }

    let doc: SongComposition =
        serde_json::from_value(value).map_err(|e| PersistenceError::invalid(e.to_string()))?;
    log::info!("imported composition `{}`", doc.title);
    Ok(doc)
}

fn is_present(value: &Value) -> bool {
    !value.is_null()
}

/// JavaScript-style truthiness for the fields the legacy format requires:
/// absent, null, false, zero, and the empty string all fail.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn doc_key(id: &str) -> String {
    format!("song.{}", id)
}

/// Lowercased title with runs of non-alphanumerics collapsed to single
/// hyphens. Empty slugs fall back to "untitled" so ids and filenames stay
/// usable.
fn slug_or_untitled(title: &str) -> String {
    let mut slug = String::new();
    let mut pending_hyphen = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}
