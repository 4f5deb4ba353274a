//! Indented text buffer for emitted declarations.

/// Buffer for building declaration text with 2-space indentation.
#[derive(Debug, Clone, Default)]
pub struct CodeBuilder {
    indent_level: usize,
    buffer: String,
}

impl CodeBuilder {
    const INDENT: &'static str = "  ";

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line of text with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        for _ in 0..self.indent_level {
            self.buffer.push_str(Self::INDENT);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Add raw text without indentation or trailing newline.
    pub fn push_raw(&mut self, s: &str) -> &mut Self {
        self.buffer.push_str(s);
        self
    }

    /// Add a JSDoc comment.
    pub fn push_jsdoc(&mut self, text: &str) -> &mut Self {
        let line = format!("/** {text} */");
        self.push_line(&line)
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Consume the builder, returning the accumulated text.
    pub fn build(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indented_block() {
        let mut builder = CodeBuilder::new();
        builder
            .push_line("export type Query = {")
            .push_indent()
            .push_line("hello?: Maybe<string>;")
            .push_dedent()
            .push_line("};");

        assert_eq!(
            builder.build(),
            "export type Query = {\n  hello?: Maybe<string>;\n};\n"
        );
    }

    #[test]
    fn test_jsdoc() {
        let mut builder = CodeBuilder::new();
        builder.push_jsdoc("A doc line");

        assert_eq!(builder.build(), "/** A doc line */\n");
    }
}
