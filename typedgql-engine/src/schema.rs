//! Schema ownership and reload lifecycle.

use std::path::Path;

use typedgql_codegen::ast::schema;
use typedgql_core::normalize_path;

use crate::error::{Error, Result};

/// Owns the parsed schema document, its canonical path, and the export-name
/// list derived from the schema's generated declaration text.
///
/// The document is immutable once loaded; [`SchemaStore::reload`] replaces
/// it wholesale and is the only mutation path. Reloading clears the cached
/// export list, which the writer repopulates after the next schema emission.
#[derive(Debug)]
pub struct SchemaStore {
    path: String,
    document: schema::Document,
    exports: Vec<String>,
}

impl SchemaStore {
    /// Load and parse the schema file at `path`.
    ///
    /// The path is anchored to the working directory, so later comparisons
    /// against discovered paths always use one rooting.
    pub fn load(path: &Path) -> Result<Self> {
        let path = std::path::absolute(path).map_err(|e| Error::SchemaLoad {
            path: normalize_path(path),
            source: e.into(),
        })?;
        let path = normalize_path(&path);
        let document = read_schema(&path)?;
        Ok(Self {
            path,
            document,
            exports: Vec::new(),
        })
    }

    /// Canonical absolute, forward-slash path of the schema file.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether a normalized path refers to the schema file.
    pub fn is_schema_file(&self, candidate: &str) -> bool {
        candidate == self.path
    }

    pub fn document(&self) -> &schema::Document {
        &self.document
    }

    /// Export names extracted from the most recently emitted schema
    /// declaration. Empty until the first emission after a (re)load.
    pub fn exports(&self) -> &[String] {
        &self.exports
    }

    /// Record the export surface derived from freshly emitted text.
    pub(crate) fn set_exports(&mut self, exports: Vec<String>) {
        self.exports = exports;
    }

    /// Replace the document from disk, dropping the cached export list.
    pub fn reload(&mut self) -> Result<()> {
        self.document = read_schema(&self.path)?;
        self.exports.clear();
        Ok(())
    }
}

fn read_schema(path: &str) -> Result<schema::Document> {
    let text = std::fs::read_to_string(path).map_err(|e| Error::SchemaLoad {
        path: path.to_string(),
        source: e.into(),
    })?;
    schema::parse(&text).map_err(|e| Error::SchemaLoad {
        path: path.to_string(),
        source: e.into(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn schema_file(temp: &TempDir, content: &str) -> std::path::PathBuf {
        let path = temp.path().join("schema.graphql");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_parses_schema() {
        let temp = TempDir::new().unwrap();
        let path = schema_file(&temp, "type Query { hello: String }");

        let store = SchemaStore::load(&path).unwrap();

        assert_eq!(store.document().definitions.len(), 1);
        assert!(store.exports().is_empty());
    }

    #[test]
    fn test_load_missing_file_is_schema_load_error() {
        let temp = TempDir::new().unwrap();

        let err = SchemaStore::load(&temp.path().join("missing.graphql")).unwrap_err();

        assert!(matches!(err, Error::SchemaLoad { .. }));
    }

    #[test]
    fn test_load_invalid_schema_is_schema_load_error() {
        let temp = TempDir::new().unwrap();
        let path = schema_file(&temp, "type Query {");

        let err = SchemaStore::load(&path).unwrap_err();

        assert!(matches!(
            err,
            Error::SchemaLoad {
                source: crate::error::SchemaLoadCause::Parse(_),
                ..
            }
        ));
    }

    #[test]
    fn test_reload_replaces_document_and_clears_exports() {
        let temp = TempDir::new().unwrap();
        let path = schema_file(&temp, "type Query { hello: String }");

        let mut store = SchemaStore::load(&path).unwrap();
        store.set_exports(vec!["Query".to_string()]);

        fs::write(&path, "type Query { hello: String goodbye: String }").unwrap();
        store.reload().unwrap();

        assert!(store.exports().is_empty());
    }

    #[test]
    fn test_is_schema_file_uses_canonical_path() {
        let temp = TempDir::new().unwrap();
        let path = schema_file(&temp, "type Query { hello: String }");

        let store = SchemaStore::load(&path).unwrap();

        assert!(store.is_schema_file(store.path()));
        assert!(!store.is_schema_file("other.graphql"));
    }
}
