//! Directive syntax configuration
//!
//! Templates use `{{` / `}}` delimiters by default; hosts embedding the
//! engine in sources where braces are common (CSS, certain markups) can
//! supply alternatives, optionally loaded from a TOML file:
//!
//! ```toml
//! [syntax]
//! open = "<%"
//! close = "%>"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a syntax configuration
#[derive(Error, Debug)]
pub enum SyntaxError {
    #[error("Failed to read syntax file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse syntax TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid syntax configuration: {0}")]
    Invalid(String),
}

/// Directive tag delimiters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syntax {
    /// Opening delimiter, e.g. `{{`
    pub open: String,
    /// Closing delimiter, e.g. `}}`
    pub close: String,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            open: "{{".to_string(),
            close: "}}".to_string(),
        }
    }
}

/// TOML structure for deserializing syntax files
#[derive(Deserialize)]
struct TomlSyntaxFile {
    syntax: TomlSyntax,
}

#[derive(Deserialize)]
struct TomlSyntax {
    open: Option<String>,
    close: Option<String>,
}

impl Syntax {
    /// Create delimiters explicitly; both must be non-empty
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self, SyntaxError> {
        let syntax = Self {
            open: open.into(),
            close: close.into(),
        };
        syntax.validate()?;
        Ok(syntax)
    }

    /// Load delimiters from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SyntaxError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load delimiters from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, SyntaxError> {
        let parsed: TomlSyntaxFile = toml::from_str(content)?;
        let defaults = Self::default();
        let syntax = Self {
            open: parsed.syntax.open.unwrap_or(defaults.open),
            close: parsed.syntax.close.unwrap_or(defaults.close),
        };
        syntax.validate()?;
        Ok(syntax)
    }

    fn validate(&self) -> Result<(), SyntaxError> {
        if self.open.is_empty() || self.close.is_empty() {
            return Err(SyntaxError::Invalid(
                "delimiters must be non-empty".to_string(),
            ));
        }
        if self.open == self.close {
            return Err(SyntaxError::Invalid(
                "open and close delimiters must differ".to_string(),
            ));
        }
        Ok(())
    }
}
