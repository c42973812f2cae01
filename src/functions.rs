//! Custom function registry consumed by the `custom` helper

use std::collections::HashMap;

use thiserror::Error;

use crate::value::Value;

/// Errors raised by custom function invocation
#[derive(Debug, Error)]
pub enum FunctionError {
    /// No function registered under the code
    #[error("no custom function registered for code `{code}`")]
    UnknownCode { code: String },

    /// The function itself failed
    #[error("custom function failed: {message}")]
    Failed { message: String },
}

/// Host-provided registry of custom functions callable from templates
pub trait CustomFunctions: Send + Sync {
    fn call(&self, code: &str, args: &[Value]) -> Result<Value, FunctionError>;
}

/// Boxed custom function stored in a [`FunctionRegistry`]
pub type CustomFn = Box<dyn Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync>;

/// Explicit registration table mapping function codes to closures.
///
/// Dispatch is by exact code; an unregistered code is a
/// [`FunctionError::UnknownCode`], never a fallback.
#[derive(Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, CustomFn>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function under a code, replacing any previous registration
    pub fn register(
        &mut self,
        code: impl Into<String>,
        f: impl Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync + 'static,
    ) {
        self.functions.insert(code.into(), Box::new(f));
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(
        mut self,
        code: impl Into<String>,
        f: impl Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync + 'static,
    ) -> Self {
        self.register(code, f);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut codes: Vec<_> = self.functions.keys().collect();
        codes.sort();
        f.debug_struct("FunctionRegistry")
            .field("codes", &codes)
            .finish()
    }
}

impl CustomFunctions for FunctionRegistry {
    fn call(&self, code: &str, args: &[Value]) -> Result<Value, FunctionError> {
        match self.functions.get(code) {
            Some(f) => f(args),
            None => Err(FunctionError::UnknownCode {
                code: code.to_string(),
            }),
        }
    }
}
