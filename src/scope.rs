//! Scope-isolated execution of template bodies
//!
//! The evaluator receives an explicit [`Environment`] — the variable bag for
//! this render plus the helper bridge — and nothing else. It holds no
//! reference to the template, the engine, or any global state, so a body can
//! resolve exactly the names it was given and call exactly the five helpers.

use std::collections::BTreeMap;

use crate::error::EvalError;
use crate::helpers::Helpers;
use crate::output::OutputCapture;
use crate::parser::{Expr, Segment};
use crate::value::{normalize, Value};

/// The variable bag: name→value bindings for one render call.
///
/// Immutable for the duration of an execution; the evaluator only reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vars {
    entries: BTreeMap<String, Value>,
}

impl Vars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, builder-style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }

    /// Add a binding in place, replacing any previous one
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Add a binding only if the name is not already bound
    pub fn insert_if_absent(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.entry(name.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Vars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The closed environment a body executes against: the variable bag plus the
/// helper bridge, and nothing else.
pub struct Environment<'a> {
    vars: &'a Vars,
    helpers: &'a Helpers<'a>,
}

impl<'a> Environment<'a> {
    pub fn new(vars: &'a Vars, helpers: &'a Helpers<'a>) -> Self {
        Self { vars, helpers }
    }

    fn lookup(&self, name: &str) -> Result<Value, EvalError> {
        self.vars
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::Undefined {
                name: name.to_string(),
            })
    }
}

/// Execute parsed body segments against an environment, emitting into `out`.
///
/// Literal segments are emitted verbatim. A directive's resulting value,
/// when non-null, is normalized and emitted; `output` returns null and emits
/// internally. Faults propagate unmodified — wrapping is the pipeline's job.
pub fn execute(
    segments: &[Segment],
    env: &Environment<'_>,
    out: &mut OutputCapture,
) -> Result<(), EvalError> {
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.emit(text),
            Segment::Directive(expr) => {
                let result = eval(expr, env, out)?;
                if !result.is_null() {
                    out.emit(&normalize(&result)?);
                }
            }
        }
    }
    Ok(())
}

fn eval(expr: &Expr, env: &Environment<'_>, out: &mut OutputCapture) -> Result<Value, EvalError> {
    match expr {
        Expr::Null => Ok(Value::Null),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Int(n) => Ok(Value::Int(*n)),
        Expr::Float(n) => Ok(Value::Float(*n)),
        Expr::Str(s) => Ok(Value::String(s.clone())),

        Expr::List(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(eval(item, env, out)?);
            }
            Ok(Value::List(values))
        }

        Expr::Var(name) => env.lookup(name),

        Expr::Output(subject) => {
            let subject = eval(subject, env, out)?;
            env.helpers.output(subject, out)?;
            Ok(Value::Null)
        }

        Expr::Translate { format, args } => {
            let format = string_arg(eval(format, env, out)?, "translate() format")?;
            let args = match args {
                Some(args) => list_arg(eval(args, env, out)?, "translate() arguments")?,
                None => Vec::new(),
            };
            Ok(Value::String(env.helpers.translate(&format, &args)))
        }

        Expr::Value { key, default } => {
            let key = string_arg(eval(key, env, out)?, "value() key")?;
            let default = match default {
                Some(default) => eval(default, env, out)?,
                None => Value::Null,
            };
            env.helpers.value(&key, default)
        }

        Expr::Check(key) => {
            let key = string_arg(eval(key, env, out)?, "check() key")?;
            Ok(Value::Bool(env.helpers.check(&key)))
        }

        Expr::Custom { code, args } => {
            let code = string_arg(eval(code, env, out)?, "custom() code")?;
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval(arg, env, out)?);
            }
            env.helpers.custom(&code, &values)
        }
    }
}

fn string_arg(value: Value, what: &str) -> Result<String, EvalError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(EvalError::InvalidArgument {
            argument: format!("{} must be a string, got {}", what, other.type_name()),
        }),
    }
}

fn list_arg(value: Value, what: &str) -> Result<Vec<Value>, EvalError> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(EvalError::InvalidArgument {
            argument: format!("{} must be a list, got {}", what, other.type_name()),
        }),
    }
}
