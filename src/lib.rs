//! Stencil - a scope-isolated template rendering engine
//!
//! This library renders templates (literal text interleaved with directive
//! tags) into strings, using values drawn from a read-only [`Context`]. Its
//! defining property is scope isolation: a template body can resolve only
//! the variables explicitly passed to it, plus five engine-provided helpers
//! (`output`, `translate`, `value`, `check`, `custom`) — never the engine's
//! or caller's state.
//!
//! # Example
//!
//! ```rust
//! use stencil::{MapContext, Template};
//!
//! let template = Template::inline("greet", r#"Hello, {{ output("name") }}!"#);
//! let ctx = MapContext::new().with("name", "World");
//!
//! let out = template.render(&ctx).unwrap();
//! assert_eq!(out, "Hello, World!");
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod functions;
pub mod helpers;
pub mod output;
pub mod parser;
pub mod scope;
pub mod template;
pub mod translate;
pub mod value;

pub use config::Syntax;
pub use context::{Context, ContextError, MapContext};
pub use error::{EvalError, ParseError};
pub use functions::{CustomFunctions, FunctionError, FunctionRegistry};
pub use helpers::Helpers;
pub use output::OutputCapture;
pub use scope::Vars;
pub use template::{FileSource, InMemorySource, SourceLocator, Template};
pub use translate::{PassthroughTranslator, Translate};
pub use value::{normalize, Value};

use thiserror::Error;

/// Errors surfaced by [`Template::render`]
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template source is unusable; rendering never started. Carries at
    /// least one problem message and the offending source as subject.
    #[error("invalid template source `{subject}`: {}", messages(.errors))]
    Validation {
        subject: String,
        errors: Vec<String>,
    },

    /// Something failed during isolated execution or capture. The original
    /// fault is preserved as the cause chain.
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        cause: Box<EvalError>,
    },
}

impl RenderError {
    /// The single rewrap point for execution-side faults
    pub(crate) fn internal(cause: EvalError) -> Self {
        RenderError::Internal {
            message: cause.to_string(),
            cause: Box::new(cause),
        }
    }
}

fn messages(errors: &[String]) -> String {
    errors.join("; ")
}

/// Render an in-memory template body against a context with default services
/// and no template variables.
///
/// Context values remain reachable through the helpers, e.g.
/// `{{ output("key") }}` or `{{ value("key", "fallback") }}`.
pub fn render(body: &str, context: &dyn Context) -> Result<String, RenderError> {
    Template::inline("inline", body).render(context)
}

/// Render an in-memory template body with an explicit variable bag
pub fn render_with_vars(
    body: &str,
    context: &dyn Context,
    vars: Vars,
) -> Result<String, RenderError> {
    Template::inline("inline", body)
        .with_vars(vars)
        .render(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_literal() {
        let out = render("no directives here", &MapContext::new()).unwrap();
        assert_eq!(out, "no directives here");
    }

    #[test]
    fn test_render_context_lookup() {
        let ctx = MapContext::new().with("greeting", "hi");
        assert_eq!(render(r#"{{ output("greeting") }}"#, &ctx).unwrap(), "hi");
        assert_eq!(
            render(r#"{{ output("greeting") }}"#, &MapContext::new()).unwrap(),
            "greeting"
        );
    }

    #[test]
    fn test_render_value_default() {
        let out = render(r#"{{ value("missing", "d") }}"#, &MapContext::new()).unwrap();
        assert_eq!(out, "d");
    }

    #[test]
    fn test_render_with_vars() {
        let vars = Vars::new().with("v", "hello-1");
        let out = render_with_vars("{{ output(v) }}", &MapContext::new(), vars).unwrap();
        assert_eq!(out, "hello-1");
    }

    #[test]
    fn test_validation_error_display() {
        let err = RenderError::Validation {
            subject: "x.tpl".to_string(),
            errors: vec!["source does not exist".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "invalid template source `x.tpl`: source does not exist"
        );
    }

    #[test]
    fn test_internal_error_exposes_cause() {
        use std::error::Error;
        let err = RenderError::internal(EvalError::Undefined {
            name: "v".to_string(),
        });
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "no variable named `v` in template scope");
    }
}
