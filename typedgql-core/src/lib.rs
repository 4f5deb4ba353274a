//! Core utilities for the typedgql declaration generator.
//!
//! Leaf crate shared by the emitter and the engine: artifact persistence
//! and the path handling that generated import headers depend on.

mod file;
mod paths;
mod utils;

// Artifact persistence
pub use file::persist_artifact;
// Path handling
pub use paths::{DECLARATION_SUFFIX, is_operation_file, normalize_path, relative_import};
// String utilities
pub use utils::to_pascal_case;
