//! Static extraction of exported declaration names.

/// Collect top-level exported declaration names from emitted TypeScript, in
/// order of first appearance, deduplicated.
///
/// This is a narrow scanner for the text this crate itself emits
/// (`export type`, `export enum`, `export const`, `export declare const`),
/// not a general TypeScript parser. Nested lines are indented and therefore
/// never match.
pub fn extract_export_names(source: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for line in source.lines() {
        let Some(rest) = line.strip_prefix("export ") else {
            continue;
        };
        let rest = rest.strip_prefix("declare ").unwrap_or(rest);
        let Some(rest) = rest
            .strip_prefix("type ")
            .or_else(|| rest.strip_prefix("enum "))
            .or_else(|| rest.strip_prefix("const "))
            .or_else(|| rest.strip_prefix("interface "))
            .or_else(|| rest.strip_prefix("function "))
        else {
            continue;
        };

        let name: String = rest
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_' || *c == '$')
            .collect();
        if !name.is_empty() && !names.iter().any(|n| n == &name) {
            names.push(name);
        }
    }

    names
}
