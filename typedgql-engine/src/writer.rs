//! Declaration pass orchestration.

use std::path::Path;

use rayon::prelude::*;
use typedgql_codegen::ast::query;
use typedgql_codegen::{Emitter, Import, extract_export_names};
use typedgql_config::{Config, SchemaTypesPolicy};
use typedgql_core::{DECLARATION_SUFFIX, normalize_path, persist_artifact, relative_import};

use crate::error::{Error, Result};
use crate::locator::OperationLocator;
use crate::schema::SchemaStore;

/// Outcome of one full pass.
///
/// Per-file failures are collected here rather than aborting the pass; only
/// a schema-phase failure aborts.
#[derive(Debug, Default)]
pub struct PassReport {
    /// Artifacts written, schema artifact first.
    pub written: Vec<String>,
    /// Operation files that failed, with their errors.
    pub failures: Vec<(String, Error)>,
    /// True when the pass was a no-op because declaration generation is
    /// disabled.
    pub skipped: bool,
}

impl PassReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Orchestrates declaration generation: the schema artifact first, then one
/// artifact per discovered operation file, threading the schema's export
/// names into each operation's import header.
#[derive(Debug)]
pub struct DeclarationWriter {
    store: SchemaStore,
    emitter: Emitter,
    locator: OperationLocator,
    policy: SchemaTypesPolicy,
    generate_declarations: bool,
}

impl DeclarationWriter {
    /// Build a writer from resolved configuration, loading the schema.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            store: SchemaStore::load(&config.schema_path)?,
            emitter: Emitter::new(config),
            locator: OperationLocator::new(&config.include, &config.exclude)?,
            policy: config.schema_types,
            generate_declarations: config.generate_declarations,
        })
    }

    pub fn store(&self) -> &SchemaStore {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut SchemaStore {
        &mut self.store
    }

    /// Whether the declaration-artifact pipeline is enabled at all.
    pub fn generate_declarations(&self) -> bool {
        self.generate_declarations
    }

    /// The include/exclude predicate compiled from configuration.
    pub fn should_process(&self, path: &str) -> bool {
        self.locator.should_process(path)
    }

    /// Emit and persist the schema artifact, then recompute the export list
    /// from the emitted text.
    ///
    /// This is the only place export names are derived, and it runs after
    /// every schema (re)generation so import headers built later in the
    /// pass always match the current schema.
    pub fn write_schema_declaration(&mut self) -> Result<()> {
        let text = self.emitter.emit_schema_declaration(self.store.document())?;
        let artifact = format!("{}{DECLARATION_SUFFIX}", self.store.path());
        persist_artifact(Path::new(&artifact), &text).map_err(|e| Error::Write {
            path: artifact,
            source: e,
        })?;
        self.store.set_exports(extract_export_names(&text));
        Ok(())
    }

    /// Emit and persist one operation file's artifact at `<path>.d.ts`.
    pub fn write_operation_declaration(&self, path: &str) -> Result<()> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::Read {
            path: path.to_string(),
            source: e,
        })?;
        let operations = query::parse(&source).map_err(|e| Error::OperationParse {
            path: path.to_string(),
            source: e,
        })?;

        let header = match self.policy {
            SchemaTypesPolicy::Inline => None,
            SchemaTypesPolicy::Import => {
                let specifier = relative_import(path, self.store.path());
                Some(
                    Import::new(specifier)
                        .named_all(self.store.exports().iter().cloned())
                        .build(),
                )
            }
        };

        let text = self.emitter.emit_operation_declaration(
            self.store.document(),
            &operations,
            header.as_deref(),
        )?;
        let artifact = format!("{path}{DECLARATION_SUFFIX}");
        persist_artifact(Path::new(&artifact), &text).map_err(|e| Error::Write {
            path: artifact,
            source: e,
        })
    }

    /// Run a full pass under `root`: schema declaration first (fatal on
    /// failure since it populates the export list), then every discovered
    /// operation file except the schema itself and filter-rejected paths.
    ///
    /// The root is resolved to absolute form before discovery so its paths
    /// share the schema path's rooting; otherwise a relative root and an
    /// absolute schema path (or the reverse) would defeat the schema
    /// exclusion and skew relative import computation.
    pub fn write_all(&mut self, root: &Path) -> Result<PassReport> {
        if !self.generate_declarations {
            return Ok(PassReport {
                skipped: true,
                ..PassReport::default()
            });
        }

        let root = std::path::absolute(root).map_err(|e| Error::Resolve {
            path: normalize_path(root),
            source: e,
        })?;

        self.write_schema_declaration()?;

        let candidates: Vec<String> = self
            .locator
            .discover(&root)
            .into_iter()
            .filter(|path| !self.store.is_schema_file(path))
            .filter(|path| self.locator.should_process(path))
            .collect();

        // Individual writes only read the finalized document and export
        // list, and each targets a distinct artifact path, so they run in
        // parallel; failures are collected, not propagated.
        let writer = &*self;
        let results: Vec<(String, Result<()>)> = candidates
            .into_par_iter()
            .map(|path| {
                let result = writer.write_operation_declaration(&path);
                (path, result)
            })
            .collect();

        let mut report = PassReport::default();
        report
            .written
            .push(format!("{}{DECLARATION_SUFFIX}", self.store.path()));
        for (path, result) in results {
            match result {
                Ok(()) => report.written.push(format!("{path}{DECLARATION_SUFFIX}")),
                Err(error) => report.failures.push((path, error)),
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;
    use typedgql_core::normalize_path;

    use super::*;

    const SCHEMA: &str = "type Query {\n  hello: String\n}\n";

    fn setup(config_toml: &str) -> (TempDir, Config) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("schema.graphql"), SCHEMA).unwrap();
        fs::create_dir_all(temp.path().join("ops")).unwrap();
        fs::write(temp.path().join("ops/hello.graphql"), "query Hello { hello }").unwrap();

        let mut config = Config::from_str_with_filename(config_toml, "typedgql.toml").unwrap();
        config.schema_path = temp.path().join("schema.graphql");
        (temp, config)
    }

    fn read(temp: &TempDir, rel: &str) -> String {
        fs::read_to_string(temp.path().join(rel)).unwrap()
    }

    #[test]
    fn test_write_all_produces_schema_and_operation_artifacts() {
        let (temp, config) = setup("");
        let mut writer = DeclarationWriter::from_config(&config).unwrap();

        let report = writer.write_all(temp.path()).unwrap();

        assert!(report.is_clean());
        assert!(!report.skipped);
        assert_eq!(report.written.len(), 2);

        let schema_artifact = read(&temp, "schema.graphql.d.ts");
        assert!(schema_artifact.starts_with("/* eslint-disable */\n\n"));
        assert!(schema_artifact.contains("export type Query = {"));

        let op_artifact = read(&temp, "ops/hello.graphql.d.ts");
        assert!(op_artifact.contains("} from '../schema.graphql';"));
        assert!(op_artifact.contains("export type HelloQuery = { hello?: string | null };"));
        assert!(op_artifact.contains("export declare const HelloDocument:"));
    }

    #[test]
    fn test_import_header_lists_every_schema_export() {
        let (temp, config) = setup("");
        let mut writer = DeclarationWriter::from_config(&config).unwrap();

        writer.write_all(temp.path()).unwrap();

        let schema_artifact = read(&temp, "schema.graphql.d.ts");
        let exports = extract_export_names(&schema_artifact);
        assert!(exports.contains(&"Query".to_string()));
        assert!(exports.contains(&"Scalars".to_string()));

        let op_artifact = read(&temp, "ops/hello.graphql.d.ts");
        for name in &exports {
            assert!(
                op_artifact.contains(name.as_str()),
                "header is missing export '{name}'"
            );
        }
    }

    #[test]
    fn test_write_all_is_idempotent() {
        let (temp, config) = setup("");
        let mut writer = DeclarationWriter::from_config(&config).unwrap();

        writer.write_all(temp.path()).unwrap();
        let schema_first = read(&temp, "schema.graphql.d.ts");
        let op_first = read(&temp, "ops/hello.graphql.d.ts");

        writer.write_all(temp.path()).unwrap();
        assert_eq!(read(&temp, "schema.graphql.d.ts"), schema_first);
        assert_eq!(read(&temp, "ops/hello.graphql.d.ts"), op_first);
    }

    #[test]
    fn test_schema_file_is_never_treated_as_operation() {
        let (temp, config) = setup("");
        let mut writer = DeclarationWriter::from_config(&config).unwrap();

        let report = writer.write_all(temp.path()).unwrap();

        // The schema matches **/*.graphql but only appears as the schema
        // artifact, never as an operation artifact.
        let schema_artifact = format!("{}{DECLARATION_SUFFIX}", writer.store().path());
        assert_eq!(report.written[0], schema_artifact);
        assert_eq!(
            report
                .written
                .iter()
                .filter(|p| **p == schema_artifact)
                .count(),
            1
        );
        assert!(!read(&temp, "schema.graphql.d.ts").contains("TypedDocumentNode"));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let (temp, mut config) = setup("");
        config.include = vec!["**/*.graphql".to_string()];
        config.exclude = vec!["**/hello.graphql".to_string()];
        let mut writer = DeclarationWriter::from_config(&config).unwrap();

        let report = writer.write_all(temp.path()).unwrap();

        assert_eq!(report.written.len(), 1);
        assert!(!temp.path().join("ops/hello.graphql.d.ts").exists());
    }

    #[test]
    fn test_generate_declarations_false_is_a_noop() {
        let (temp, config) = setup("generate_declarations = false");
        let mut writer = DeclarationWriter::from_config(&config).unwrap();

        let report = writer.write_all(temp.path()).unwrap();

        assert!(report.skipped);
        assert!(report.written.is_empty());
        assert!(!temp.path().join("schema.graphql.d.ts").exists());
        assert!(!temp.path().join("ops/hello.graphql.d.ts").exists());
    }

    #[test]
    fn test_invalid_schema_fails_before_any_artifact_is_written() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("schema.graphql"), "type Query {").unwrap();
        let mut config = Config::default();
        config.schema_path = temp.path().join("schema.graphql");

        let err = DeclarationWriter::from_config(&config).unwrap_err();

        assert!(matches!(err, Error::SchemaLoad { .. }));
        assert!(!temp.path().join("schema.graphql.d.ts").exists());
    }

    #[test]
    fn test_malformed_operation_does_not_abort_the_pass() {
        let (temp, config) = setup("");
        fs::write(temp.path().join("ops/broken.graphql"), "query {{ nope").unwrap();
        let mut writer = DeclarationWriter::from_config(&config).unwrap();

        let report = writer.write_all(temp.path()).unwrap();

        assert_eq!(report.failures.len(), 1);
        let (failed_path, error) = &report.failures[0];
        assert!(failed_path.ends_with("ops/broken.graphql"));
        assert!(matches!(error, Error::OperationParse { .. }));

        // The valid sibling was still written.
        assert!(temp.path().join("ops/hello.graphql.d.ts").exists());
        assert!(!temp.path().join("ops/broken.graphql.d.ts").exists());
    }

    #[test]
    fn test_strict_scalars_failure_is_fatal_to_the_pass() {
        let (temp, config) = setup("strict_scalars = true");
        fs::write(
            temp.path().join("schema.graphql"),
            "scalar Date\ntype Query {\n  when: Date\n}\n",
        )
        .unwrap();
        let mut writer = DeclarationWriter::from_config(&config).unwrap();

        let err = writer.write_all(temp.path()).unwrap_err();

        assert!(matches!(
            err,
            Error::Codegen(typedgql_codegen::CodegenError::UnmappedScalar { .. })
        ));
    }

    #[test]
    fn test_inline_policy_embeds_schema_types() {
        let (temp, config) = setup("schema_types = \"inline\"");
        let mut writer = DeclarationWriter::from_config(&config).unwrap();

        writer.write_all(temp.path()).unwrap();

        let op_artifact = read(&temp, "ops/hello.graphql.d.ts");
        assert!(op_artifact.contains("export type Maybe<T> = T | null;"));
        assert!(!op_artifact.contains("} from '../schema.graphql';"));
    }

    #[test]
    fn test_import_specifier_uses_forward_slashes() {
        let (temp, config) = setup("");
        fs::create_dir_all(temp.path().join("ops/deep")).unwrap();
        fs::write(
            temp.path().join("ops/deep/greet.gql"),
            "query Greet { hello }",
        )
        .unwrap();
        let mut writer = DeclarationWriter::from_config(&config).unwrap();

        writer.write_all(temp.path()).unwrap();

        let artifact = read(&temp, "ops/deep/greet.gql.d.ts");
        assert!(artifact.contains("} from '../../schema.graphql';"));
        assert!(!artifact.contains('\\'));
    }

    #[test]
    fn test_relative_schema_path_resolves_against_working_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("schema.graphql"), SCHEMA).unwrap();
        fs::create_dir_all(temp.path().join("ops")).unwrap();
        fs::write(temp.path().join("ops/hello.graphql"), "query Hello { hello }").unwrap();

        // Default relative schema_path plus an absolute pass root; the two
        // must end up in one rooting or the schema leaks into the
        // operation phase.
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(temp.path()).unwrap();
        let root = std::env::current_dir().unwrap();

        let config = Config::default();
        let mut writer = DeclarationWriter::from_config(&config).unwrap();
        let report = writer.write_all(&root).unwrap();
        std::env::set_current_dir(&previous).unwrap();

        assert!(
            report.is_clean(),
            "schema file treated as an operation: {:?}",
            report.failures
        );
        assert_eq!(report.written.len(), 2);

        let op_artifact = fs::read_to_string(temp.path().join("ops/hello.graphql.d.ts")).unwrap();
        assert!(op_artifact.contains("} from '../schema.graphql';"));
    }

    #[test]
    fn test_schema_path_is_normalized() {
        let (temp, mut config) = setup("");
        config.schema_path = PathBuf::from(format!(
            "{}/./schema.graphql",
            normalize_path(temp.path())
        ));
        let writer = DeclarationWriter::from_config(&config).unwrap();

        assert!(!writer.store().path().contains("/./"));
    }
}
