//! TypeScript import statement builder.

/// Builder for TypeScript import statements.
#[derive(Debug, Clone)]
pub struct Import {
    from: String,
    named: Vec<String>,
    type_only: bool,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            named: Vec::new(),
            type_only: false,
        }
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    /// Import a sequence of named exports.
    pub fn named_all(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.named.extend(names);
        self
    }

    /// Make this a type-only import (`import type { ... }`).
    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    /// Render the statement, newline-terminated.
    ///
    /// A single named import stays on one line; several are laid out one per
    /// line, matching the header format of generated artifacts.
    pub fn build(&self) -> String {
        let kw = if self.type_only { "import type" } else { "import" };

        match self.named.len() {
            0 => format!("{kw} '{}';\n", self.from),
            1 => format!("{kw} {{ {} }} from '{}';\n", self.named[0], self.from),
            _ => {
                let mut out = String::new();
                out.push_str(kw);
                out.push_str(" {\n");
                for (i, name) in self.named.iter().enumerate() {
                    out.push_str("  ");
                    out.push_str(name);
                    if i + 1 < self.named.len() {
                        out.push(',');
                    }
                    out.push('\n');
                }
                out.push_str("} from '");
                out.push_str(&self.from);
                out.push_str("';\n");
                out
            }
        }
    }
}
