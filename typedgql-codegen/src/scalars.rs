//! Scalar type resolution.

use indexmap::IndexMap;
use typedgql_config::{Config, ScalarTarget};

use crate::error::{CodegenError, Result};

/// The TypeScript types a scalar maps to in input and output positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarTypes {
    pub input: String,
    pub output: String,
}

impl ScalarTypes {
    fn both(ty: &str) -> Self {
        Self {
            input: ty.to_string(),
            output: ty.to_string(),
        }
    }
}

/// Effective scalar configuration for one emission pass.
///
/// Built by merging, in precedence order: the top-level options, then the
/// `typescript` / `typescript_operations` plugin blocks, then the global
/// defaults. Built-in scalars are always mapped.
#[derive(Debug, Clone)]
pub struct ScalarMap {
    strict: bool,
    default_type: String,
    custom: IndexMap<String, ScalarTarget>,
}

/// Built-in GraphQL scalars and their TypeScript counterparts.
pub const BUILTIN_SCALARS: [(&str, &str); 5] = [
    ("ID", "string"),
    ("String", "string"),
    ("Boolean", "boolean"),
    ("Int", "number"),
    ("Float", "number"),
];

impl ScalarMap {
    /// Merge the scalar-related options out of a resolved configuration.
    pub fn resolve(config: &Config) -> Self {
        let ts = &config.codegen_plugin_configs.typescript;
        let ops = &config.codegen_plugin_configs.typescript_operations;

        let strict = config
            .strict_scalars
            .or(ts.strict_scalars)
            .or(ops.strict_scalars)
            .unwrap_or(false);

        let default_type = config
            .default_scalar_type
            .clone()
            .or_else(|| ts.default_scalar_type.clone())
            .or_else(|| ops.default_scalar_type.clone())
            .unwrap_or_else(|| "unknown".to_string());

        // Plugin blocks first so the top-level mapping wins on collision.
        let mut custom = IndexMap::new();
        for block in [&ts.scalars, &ops.scalars, &config.scalars] {
            for (name, target) in block {
                custom.insert(name.clone(), target.clone());
            }
        }

        Self {
            strict,
            default_type,
            custom,
        }
    }

    /// Resolve the TypeScript types for a scalar by name.
    ///
    /// Unmapped custom scalars fall back to the configured default type, or
    /// fail with [`CodegenError::UnmappedScalar`] in strict mode.
    pub fn lookup(&self, name: &str) -> Result<ScalarTypes> {
        if let Some((_, ty)) = BUILTIN_SCALARS.iter().find(|(builtin, _)| *builtin == name) {
            return Ok(ScalarTypes::both(ty));
        }
        if let Some(target) = self.custom.get(name) {
            return Ok(ScalarTypes {
                input: target.input().to_string(),
                output: target.output().to_string(),
            });
        }
        if self.strict {
            return Err(CodegenError::UnmappedScalar {
                name: name.to_string(),
            });
        }
        Ok(ScalarTypes::both(&self.default_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(toml: &str) -> Config {
        Config::from_str_with_filename(toml, "test.toml").unwrap()
    }

    #[test]
    fn test_builtin_scalars() {
        let map = ScalarMap::resolve(&Config::default());

        assert_eq!(map.lookup("ID").unwrap(), ScalarTypes::both("string"));
        assert_eq!(map.lookup("Int").unwrap(), ScalarTypes::both("number"));
        assert_eq!(map.lookup("Boolean").unwrap(), ScalarTypes::both("boolean"));
    }

    #[test]
    fn test_unmapped_scalar_falls_back_to_default() {
        let map = ScalarMap::resolve(&Config::default());

        assert_eq!(map.lookup("Date").unwrap(), ScalarTypes::both("unknown"));

        let map = ScalarMap::resolve(&config("default_scalar_type = \"any\""));
        assert_eq!(map.lookup("Date").unwrap(), ScalarTypes::both("any"));
    }

    #[test]
    fn test_strict_mode_rejects_unmapped_scalars() {
        let map = ScalarMap::resolve(&config("strict_scalars = true"));

        let err = map.lookup("Date").unwrap_err();
        assert!(matches!(err, CodegenError::UnmappedScalar { name } if name == "Date"));
    }

    #[test]
    fn test_custom_mapping_with_split_positions() {
        let map = ScalarMap::resolve(&config(
            "[scalars]\nDate = { input = \"string\", output = \"Date\" }",
        ));

        let types = map.lookup("Date").unwrap();
        assert_eq!(types.input, "string");
        assert_eq!(types.output, "Date");
    }

    #[test]
    fn test_top_level_options_win_over_plugin_blocks() {
        let map = ScalarMap::resolve(&config(
            r#"
            [scalars]
            Date = "string"

            [codegen_plugin_configs.typescript]
            strict_scalars = true

            [codegen_plugin_configs.typescript.scalars]
            Date = "number"
            UUID = "string"
            "#,
        ));

        // Top-level mapping wins; plugin-only entries still apply.
        assert_eq!(map.lookup("Date").unwrap(), ScalarTypes::both("string"));
        assert_eq!(map.lookup("UUID").unwrap(), ScalarTypes::both("string"));
        // Strict mode engaged through the plugin block.
        assert!(map.lookup("Unmapped").is_err());
    }
}
