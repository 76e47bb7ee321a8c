//! Ordered title index for Cinedex.
//!
//! This crate provides:
//! - An arena-backed binary search tree keyed by movie title
//! - Iterative search, insertion, and three-case deletion
//! - Structural diagnostics and invariant validation

mod bst;

pub use bst::{CatalogIndex, InOrderIter, IndexStats};
