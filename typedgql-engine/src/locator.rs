//! Operation file discovery and filtering.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use typedgql_core::{is_operation_file, normalize_path};
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Discovers candidate operation files and applies the include/exclude
/// predicate from configuration.
///
/// Discovery is restartable: every pass walks the tree afresh, so files
/// added or removed between passes are picked up without cache
/// invalidation.
#[derive(Debug)]
pub struct OperationLocator {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl OperationLocator {
    /// Compile the include/exclude patterns. Malformed patterns fail here,
    /// before any file processing begins.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: compile(include, "include")?,
            exclude: compile(exclude, "exclude")?,
        })
    }

    /// List operation files under `root`, normalized and sorted for
    /// deterministic pass order.
    pub fn discover(&self, root: &Path) -> Vec<String> {
        let mut paths: Vec<String> = WalkDir::new(root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| normalize_path(entry.path()))
            .filter(|path| is_operation_file(path))
            .collect();
        paths.sort();
        paths
    }

    /// The include/exclude predicate. A path matching `exclude` is rejected
    /// even when it also matches `include`; with no include patterns every
    /// path is accepted.
    pub fn should_process(&self, path: &str) -> bool {
        if let Some(exclude) = &self.exclude
            && exclude.is_match(path)
        {
            return false;
        }
        match &self.include {
            Some(include) => include.is_match(path),
            None => true,
        }
    }
}

fn compile(patterns: &[String], kind: &'static str) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| Error::Pattern {
            kind,
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    let set = builder.build().map_err(|e| Error::Pattern {
        kind,
        pattern: patterns.join(", "),
        source: e,
    })?;
    Ok(Some(set))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn locator(include: &[&str], exclude: &[&str]) -> OperationLocator {
        let include: Vec<String> = include.iter().map(|s| s.to_string()).collect();
        let exclude: Vec<String> = exclude.iter().map(|s| s.to_string()).collect();
        OperationLocator::new(&include, &exclude).unwrap()
    }

    #[test]
    fn test_discover_finds_graphql_files_recursively() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("ops/nested")).unwrap();
        fs::write(temp.path().join("schema.graphql"), "").unwrap();
        fs::write(temp.path().join("ops/a.gql"), "").unwrap();
        fs::write(temp.path().join("ops/nested/b.graphql"), "").unwrap();
        fs::write(temp.path().join("ops/readme.md"), "").unwrap();

        let paths = locator(&[], &[]).discover(temp.path());

        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| is_operation_file(p)));
        let mut sorted = paths.clone();
        sorted.sort();
        assert_eq!(paths, sorted);
    }

    #[test]
    fn test_default_predicate_accepts_everything() {
        let locator = locator(&[], &[]);

        assert!(locator.should_process("ops/a.graphql"));
        assert!(locator.should_process("deep/nested/b.gql"));
    }

    #[test]
    fn test_include_restricts_processing() {
        let locator = locator(&["ops/**/*.graphql"], &[]);

        assert!(locator.should_process("ops/a.graphql"));
        assert!(!locator.should_process("other/b.graphql"));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let locator = locator(&["ops/**"], &["ops/legacy/**"]);

        assert!(locator.should_process("ops/a.graphql"));
        assert!(!locator.should_process("ops/legacy/old.graphql"));
    }

    #[test]
    fn test_malformed_pattern_fails_at_construction() {
        let err = OperationLocator::new(&["ops/{".to_string()], &[]).unwrap_err();

        assert!(matches!(err, Error::Pattern { kind: "include", .. }));
    }
}
