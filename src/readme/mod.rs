// src/readme/mod.rs
// =============================================================================
// This module owns everything that touches the README itself.
//
// Submodules:
// - markers: Finds and rewrites <!-- name starts --> / <!-- name ends --> regions
// - document: Reads and writes the README file
// =============================================================================

mod document;
mod markers;

pub use document::{read_document, write_document};
pub use markers::patch;
