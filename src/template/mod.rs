//! Templates and the render pipeline
//!
//! A [`Template`] owns a source locator, a variable policy, the directive
//! syntax, and the host services (translation, custom functions). It is
//! long-lived and may be rendered many times against different contexts.

mod source;
mod validate;

pub use source::{FileSource, InMemorySource, SourceLocator};
pub use validate::validate;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Syntax;
use crate::context::Context;
use crate::error::EvalError;
use crate::functions::{CustomFunctions, FunctionRegistry};
use crate::helpers::Helpers;
use crate::output::OutputCapture;
use crate::parser::parse_with_syntax;
use crate::scope::{execute, Environment, Vars};
use crate::translate::{PassthroughTranslator, Translate};
use crate::value::Value;
use crate::RenderError;

/// A renderable template
pub struct Template {
    source: Box<dyn SourceLocator>,
    fixed_vars: Vars,
    imports: Vec<String>,
    syntax: Syntax,
    translator: Arc<dyn Translate>,
    functions: Arc<dyn CustomFunctions>,
}

impl Template {
    /// Template backed by a file on disk
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::from_source(FileSource::new(path))
    }

    /// Template with an in-memory body
    pub fn inline(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self::from_source(InMemorySource::new(name, body))
    }

    /// Template backed by an arbitrary source locator
    pub fn from_source(source: impl SourceLocator + 'static) -> Self {
        Self {
            source: Box::new(source),
            fixed_vars: Vars::new(),
            imports: Vec::new(),
            syntax: Syntax::default(),
            translator: Arc::new(PassthroughTranslator),
            functions: Arc::new(FunctionRegistry::new()),
        }
    }

    /// Bind a fixed variable, available to every render of this template
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fixed_vars.insert(name, value);
        self
    }

    /// Replace the whole fixed variable bag
    pub fn with_vars(mut self, vars: Vars) -> Self {
        self.fixed_vars = vars;
        self
    }

    /// Declare a context key to copy into the variable bag on each render.
    /// Keys absent from the context are skipped; imports never overwrite
    /// fixed variables.
    pub fn import(mut self, key: impl Into<String>) -> Self {
        self.imports.push(key.into());
        self
    }

    /// Set the directive delimiters
    pub fn with_syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Set the translation service backing the `translate` helper
    pub fn with_translator(mut self, translator: impl Translate + 'static) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    /// Set the custom function registry backing the `custom` helper
    pub fn with_functions(mut self, functions: impl CustomFunctions + 'static) -> Self {
        self.functions = Arc::new(functions);
        self
    }

    /// Render this template against a read-only context.
    ///
    /// Fails with [`RenderError::Validation`] when the source is unusable,
    /// surfaced verbatim; every fault past validation is wrapped once into
    /// [`RenderError::Internal`] with the original cause chain preserved.
    pub fn render(&self, context: &dyn Context) -> Result<String, RenderError> {
        let vars = self.template_vars(context)?;

        let errors = validate(self.source.as_ref());
        if !errors.is_empty() {
            return Err(RenderError::Validation {
                subject: self.source.describe(),
                errors,
            });
        }

        let helpers = Helpers::new(context, self.translator.as_ref(), self.functions.as_ref());
        self.render_isolated(&vars, &helpers)
            .map_err(RenderError::internal)
    }

    /// Execute the body in an isolated scope inside one capture frame
    fn render_isolated(&self, vars: &Vars, helpers: &Helpers<'_>) -> Result<String, EvalError> {
        let body = self.source.load()?;
        let segments = parse_with_syntax(&body, &self.syntax).map_err(EvalError::Parse)?;
        let env = Environment::new(vars, helpers);

        let mut out = OutputCapture::new();
        out.capture(|out| execute(&segments, &env, out))
    }

    /// Derive the variable bag for one render: fixed vars first, then
    /// imported context keys without overwriting
    fn template_vars(&self, context: &dyn Context) -> Result<Vars, RenderError> {
        let mut vars = self.fixed_vars.clone();
        for key in &self.imports {
            if !context.has(key) {
                continue;
            }
            let value = context
                .get(key)
                .map_err(|e| RenderError::internal(e.into()))?;
            vars.insert_if_absent(key.clone(), value);
        }
        Ok(vars)
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("source", &self.source.describe())
            .field("fixed_vars", &self.fixed_vars)
            .field("imports", &self.imports)
            .field("syntax", &self.syntax)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::MapContext;
    use crate::error::EvalError;
    use crate::functions::FunctionError;

    #[test]
    fn test_render_fixed_var() {
        let template = Template::inline("t", "{{ output(v) }}").with_var("v", "hello-1");
        let out = template.render(&MapContext::new()).unwrap();
        assert_eq!(out, "hello-1");
    }

    #[test]
    fn test_render_imported_var() {
        let template = Template::inline("t", "{{ output(user) }}").import("user");
        let ctx = MapContext::new().with("user", "ada");
        assert_eq!(template.render(&ctx).unwrap(), "ada");
    }

    #[test]
    fn test_imports_do_not_overwrite_fixed_vars() {
        let template = Template::inline("t", "{{ output(v) }}")
            .with_var("v", "fixed")
            .import("v");
        let ctx = MapContext::new().with("v", "from-context");
        assert_eq!(template.render(&ctx).unwrap(), "fixed");
    }

    #[test]
    fn test_missing_import_is_skipped() {
        let template = Template::inline("t", "ok").import("ghost");
        assert_eq!(template.render(&MapContext::new()).unwrap(), "ok");
    }

    #[test]
    fn test_validation_failure_surfaces_directly() {
        let template = Template::from_file("/no/such/file.tpl");
        let err = template.render(&MapContext::new()).unwrap_err();
        match err {
            RenderError::Validation { subject, errors } => {
                assert_eq!(subject, "/no/such/file.tpl");
                assert_eq!(errors, vec!["source does not exist".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_execution_fault_is_wrapped_internal() {
        let template = Template::inline("t", "{{ output(ghost) }}");
        let err = template.render(&MapContext::new()).unwrap_err();
        match err {
            RenderError::Internal { message, cause } => {
                assert!(message.contains("ghost"));
                assert!(matches!(*cause, EvalError::Undefined { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_fault_is_wrapped_internal() {
        let template = Template::inline("t", "{{ output( }}");
        let err = template.render(&MapContext::new()).unwrap_err();
        match err {
            RenderError::Internal { cause, .. } => {
                assert!(matches!(*cause, EvalError::Parse(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unlexable_directive_is_rejected() {
        // Stray characters inside a tag must fail the render, not vanish.
        let template = Template::inline("t", "{{ @ output(v) @@ }}").with_var("v", "x");
        let err = template.render(&MapContext::new()).unwrap_err();
        match err {
            RenderError::Internal { cause, .. } => {
                assert!(matches!(*cause, EvalError::Parse(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_custom_function_error_recoverable_from_cause() {
        let functions = FunctionRegistry::new().with("fail", |_| {
            Err(FunctionError::Failed {
                message: "nope".to_string(),
            })
        });
        let template = Template::inline("t", r#"{{ custom("fail") }}"#).with_functions(functions);
        let err = template.render(&MapContext::new()).unwrap_err();

        match err {
            RenderError::Internal { cause, .. } => match *cause {
                EvalError::CustomFunction { function_code, .. } => {
                    assert_eq!(function_code, "fail");
                }
                other => panic!("unexpected cause: {other}"),
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_custom_syntax_render() {
        let template = Template::inline("t", "<% output(v) %> and {{ v }}")
            .with_var("v", "x")
            .with_syntax(Syntax::new("<%", "%>").unwrap());
        assert_eq!(template.render(&MapContext::new()).unwrap(), "x and {{ v }}");
    }

    #[test]
    fn test_template_reusable_across_contexts() {
        let template = Template::inline("t", r#"{{ output("who") }}"#);
        let a = MapContext::new().with("who", "alpha");
        let b = MapContext::new().with("who", "beta");
        assert_eq!(template.render(&a).unwrap(), "alpha");
        assert_eq!(template.render(&b).unwrap(), "beta");
        assert_eq!(template.render(&MapContext::new()).unwrap(), "who");
    }
}
