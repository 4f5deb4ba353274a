//! Path handling for generated artifacts.
//!
//! Generated import headers are source-level module specifiers, so every
//! path the generator compares or emits uses forward-slash separators
//! regardless of the host convention.

use std::path::{Component, Path};

/// Suffix appended to a source file's path to name its declaration artifact.
pub const DECLARATION_SUFFIX: &str = ".d.ts";

/// Normalize a path to forward-slash form, dropping `.` components and
/// resolving `..` against preceding components where possible.
pub fn normalize_path(path: &Path) -> String {
    let mut prefix = String::new();
    let mut parts: Vec<String> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => {
                prefix = p.as_os_str().to_string_lossy().replace('\\', "/");
            }
            Component::RootDir => prefix.push('/'),
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.last().is_some_and(|last| last != "..") {
                    parts.pop();
                } else {
                    parts.push("..".to_string());
                }
            }
            Component::Normal(s) => parts.push(s.to_string_lossy().into_owned()),
        }
    }

    if prefix.is_empty() && parts.is_empty() {
        ".".to_string()
    } else {
        format!("{prefix}{}", parts.join("/"))
    }
}

/// Whether a path names a GraphQL operation file (`.gql` or `.graphql`).
pub fn is_operation_file(path: &str) -> bool {
    Path::new(path)
        .extension()
        .is_some_and(|ext| ext == "gql" || ext == "graphql")
}

/// Compute the module specifier that imports `to` from the directory of
/// `from`.
///
/// Both paths must be normalized and rooted the same way (both relative to
/// one root, or both absolute). The result always starts with `./` or `../`
/// so it is a syntactically valid relative specifier.
pub fn relative_import(from: &str, to: &str) -> String {
    let from_dirs: Vec<&str> = match from.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    let to_parts: Vec<&str> = to.split('/').collect();
    let (to_dirs, to_file) = to_parts.split_at(to_parts.len() - 1);

    let mut common = 0;
    while common < from_dirs.len()
        && common < to_dirs.len()
        && from_dirs[common] == to_dirs[common]
    {
        common += 1;
    }

    let mut parts: Vec<&str> = Vec::new();
    for _ in common..from_dirs.len() {
        parts.push("..");
    }
    parts.extend(&to_dirs[common..]);
    parts.push(to_file[0]);

    let joined = parts.join("/");
    if joined.starts_with("../") {
        joined
    } else {
        format!("./{joined}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_cur_dir() {
        assert_eq!(normalize_path(Path::new("./schema.graphql")), "schema.graphql");
        assert_eq!(normalize_path(Path::new("ops/./hello.graphql")), "ops/hello.graphql");
    }

    #[test]
    fn test_normalize_resolves_parent_dirs() {
        assert_eq!(normalize_path(Path::new("ops/../schema.graphql")), "schema.graphql");
        assert_eq!(normalize_path(Path::new("../schema.graphql")), "../schema.graphql");
    }

    #[test]
    fn test_normalize_keeps_absolute_root() {
        assert_eq!(normalize_path(Path::new("/srv/app/schema.graphql")), "/srv/app/schema.graphql");
    }

    #[test]
    fn test_is_operation_file() {
        assert!(is_operation_file("ops/hello.graphql"));
        assert!(is_operation_file("hello.gql"));
        assert!(!is_operation_file("schema.graphql.d.ts"));
        assert!(!is_operation_file("readme.md"));
    }

    #[test]
    fn test_relative_import_sibling() {
        assert_eq!(relative_import("hello.graphql", "schema.graphql"), "./schema.graphql");
    }

    #[test]
    fn test_relative_import_from_subdirectory() {
        assert_eq!(relative_import("ops/hello.graphql", "schema.graphql"), "../schema.graphql");
        assert_eq!(
            relative_import("ops/nested/hello.graphql", "schema.graphql"),
            "../../schema.graphql"
        );
    }

    #[test]
    fn test_relative_import_into_subdirectory() {
        assert_eq!(
            relative_import("hello.graphql", "graphql/schema.graphql"),
            "./graphql/schema.graphql"
        );
        assert_eq!(
            relative_import("ops/hello.graphql", "graphql/schema.graphql"),
            "../graphql/schema.graphql"
        );
    }

    #[test]
    fn test_relative_import_shared_directory() {
        assert_eq!(relative_import("ops/hello.graphql", "ops/schema.graphql"), "./schema.graphql");
    }

    #[test]
    fn test_relative_import_absolute_paths() {
        assert_eq!(
            relative_import("/srv/app/ops/hello.graphql", "/srv/app/schema.graphql"),
            "../schema.graphql"
        );
    }
}
