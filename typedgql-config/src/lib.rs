// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Configuration surface for the typedgql declaration generator.
//!
//! Options are read from a `typedgql.toml` file (every field optional) and
//! resolved once per invocation; the CLI may override individual fields
//! afterwards. Validation runs at load time so malformed patterns surface
//! before any file processing begins.

mod error;

use std::path::{Path, PathBuf};

pub use error::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;

/// How operation artifacts obtain the schema's type declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaTypesPolicy {
    /// Import the schema artifact's exports through a relative header, so
    /// operation artifacts never duplicate the schema's type definitions.
    #[default]
    Import,
    /// Embed the schema type declarations in every operation artifact.
    Inline,
}

/// Target TypeScript type for a custom scalar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ScalarTarget {
    /// One type used in both input and output positions.
    Single(String),
    /// Distinct input/output types.
    Split { input: String, output: String },
}

impl ScalarTarget {
    pub fn input(&self) -> &str {
        match self {
            Self::Single(ty) => ty,
            Self::Split { input, .. } => input,
        }
    }

    pub fn output(&self) -> &str {
        match self {
            Self::Single(ty) => ty,
            Self::Split { output, .. } => output,
        }
    }
}

/// Scalar-related overrides accepted in a backend plugin block.
///
/// The top-level options always win over these. Keys the generation
/// backend does not understand are rejected at load time rather than
/// silently ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PluginOverrides {
    pub strict_scalars: Option<bool>,
    pub default_scalar_type: Option<String>,
    pub scalars: IndexMap<String, ScalarTarget>,
}

/// Per-backend-plugin override blocks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PluginConfigs {
    pub typescript: PluginOverrides,
    pub typescript_operations: PluginOverrides,
}

/// Root configuration for typedgql.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Patterns selecting operation files to process (default: all)
    pub include: Vec<String>,

    /// Patterns for files to skip; wins over `include`
    pub exclude: Vec<String>,

    /// Path to the GraphQL schema file
    pub schema_path: PathBuf,

    /// Master switch for the declaration-artifact pipeline
    pub generate_declarations: bool,

    /// Reject schema scalars with no entry in `scalars` (default: false)
    pub strict_scalars: Option<bool>,

    /// Fallback TypeScript type for unmapped custom scalars
    /// (default: "unknown")
    pub default_scalar_type: Option<String>,

    /// Custom scalar mappings
    pub scalars: IndexMap<String, ScalarTarget>,

    /// Header literal prepended to the schema artifact
    pub schema_declaration_header: Option<String>,

    /// Header literal prepended to operation artifacts
    pub operation_declaration_header: Option<String>,

    /// Whether operation artifacts import or inline schema types
    pub schema_types: SchemaTypesPolicy,

    /// Pass-through overrides for the generation backend
    pub codegen_plugin_configs: PluginConfigs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            schema_path: PathBuf::from("./schema.graphql"),
            generate_declarations: true,
            strict_scalars: None,
            default_scalar_type: None,
            scalars: IndexMap::new(),
            schema_declaration_header: None,
            operation_declaration_header: None,
            schema_types: SchemaTypesPolicy::default(),
            codegen_plugin_configs: PluginConfigs::default(),
        }
    }
}

impl Config {
    /// Parse a typedgql.toml file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a typedgql.toml from a string with a custom filename for error
    /// reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        config.validate(content, filename)?;
        Ok(config)
    }

    /// Validate the configuration after parsing
    pub fn validate(&self, src: &str, filename: &str) -> Result<()> {
        for (kind, patterns) in [("include", &self.include), ("exclude", &self.exclude)] {
            for pattern in patterns {
                if let Err(e) = globset::Glob::new(pattern) {
                    return Err(Error::validation(
                        format!("invalid {kind} pattern '{pattern}': {e}"),
                        pattern,
                        src,
                        filename,
                    ));
                }
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "typedgql.toml")
    }
}
