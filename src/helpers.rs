//! The context bridge: helper operations visible inside the isolated scope
//!
//! A [`Helpers`] instance binds one read-only [`Context`] together with the
//! host translation service and custom function registry, and exposes the
//! five operations a template body may call: `output`, `translate`, `value`,
//! `check`, and `custom`. These are the only doors out of the sandbox.

use crate::context::{Context, ContextError};
use crate::error::EvalError;
use crate::functions::CustomFunctions;
use crate::output::OutputCapture;
use crate::translate::Translate;
use crate::value::{normalize, Value};

/// The helper functions for one render call, bound to one context
pub struct Helpers<'a> {
    context: &'a dyn Context,
    translator: &'a dyn Translate,
    functions: &'a dyn CustomFunctions,
}

impl<'a> Helpers<'a> {
    pub fn new(
        context: &'a dyn Context,
        translator: &'a dyn Translate,
        functions: &'a dyn CustomFunctions,
    ) -> Self {
        Self {
            context,
            translator,
            functions,
        }
    }

    /// Emit a value to the active capture buffer.
    ///
    /// A string subject that matches a context key is first replaced by that
    /// key's value; the (possibly replaced) value is then normalized and
    /// emitted.
    pub fn output(&self, subject: Value, out: &mut OutputCapture) -> Result<(), EvalError> {
        let subject = match subject {
            Value::String(key) if self.context.has(&key) => self.context.get(&key)?,
            other => other,
        };
        out.emit(&normalize(&subject)?);
        Ok(())
    }

    /// Translate a format string; interpolation is owned by the service
    pub fn translate(&self, format: &str, args: &[Value]) -> String {
        self.translator.translate(format, args)
    }

    /// Retrieve a context value, falling back to `default` when the key is
    /// absent. Lookup failures other than `NotFound` propagate.
    pub fn value(&self, key: &str, default: Value) -> Result<Value, EvalError> {
        match self.context.get(key) {
            Ok(value) => Ok(value),
            Err(ContextError::NotFound { .. }) => Ok(default),
            Err(other) => Err(other.into()),
        }
    }

    /// Whether the context holds a value for `key`. Existence only: this
    /// must never retrieve the value.
    pub fn check(&self, key: &str) -> bool {
        self.context.has(key)
    }

    /// Invoke a custom function by code. Any registry failure is rewrapped
    /// with the offending code attached.
    pub fn custom(&self, code: &str, args: &[Value]) -> Result<Value, EvalError> {
        self.functions
            .call(code, args)
            .map_err(|cause| EvalError::CustomFunction {
                function_code: code.to_string(),
                cause,
            })
    }
}
