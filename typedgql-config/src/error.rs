use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for configuration loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{}'", path.display())]
    #[diagnostic(help("pass --config, or create a typedgql.toml next to your schema"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse typedgql.toml")]
    #[diagnostic(code(typedgql::config::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(typedgql::config::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a validation error, labelling the offending text when it can
    /// be located in the source
    pub fn validation(
        message: impl Into<String>,
        needle: &str,
        src: &str,
        filename: &str,
    ) -> Box<Self> {
        let span = src
            .find(needle)
            .map(|start| SourceSpan::from(start..start + needle.len()));
        Box::new(Error::Validation {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: message.into(),
        })
    }
}
