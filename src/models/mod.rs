//! Models module for the swara notation editor
//!
//! This module contains the composition data model and the coordinate
//! types shared by the store, navigator, and selector.

pub mod core;
pub mod position;

// Re-export commonly used types
pub use core::*;
pub use position::*;
