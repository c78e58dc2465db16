//! Swara Notation Grid Editor Core
//!
//! This crate is the editing engine behind a line/column grid of swara
//! notation paired with lyric text. It owns the composition document and
//! decides what a symbol pick does to it, how focus auto-advances through
//! the grid, how rectangular ranges of columns are selected and
//! copy/pasted, and how documents round-trip through key/value storage.
//! Rendering and the symbol palette live outside; the palette only calls
//! [`GridNavigator::choose_symbol`] with a symbol and a modifier flag.

pub mod models;
pub mod navigator;
pub mod persistence;
pub mod selection;
pub mod store;

// Re-export commonly used types
pub use models::core::*;
pub use models::position::*;
pub use navigator::GridNavigator;
pub use persistence::{
    export_json, import_from_text, DirStore, ExportFile, IndexEntry, KeyValueStore, MemoryStore,
    PersistenceError, PersistenceGateway, StorageError,
};
pub use selection::SegmentSelector;
pub use store::CompositionStore;
