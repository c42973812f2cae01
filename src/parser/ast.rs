//! Abstract syntax tree for template bodies

/// One piece of a parsed template body
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text emitted verbatim
    Literal(String),
    /// A directive tag holding one expression
    Directive(Expr),
}

/// A directive expression.
///
/// Helper invocations are distinct nodes with arity fixed by the grammar;
/// there are no user-defined calls, so an unknown call shape is a parse
/// error rather than a runtime one.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A list literal, e.g. `[name, "x", 3]`
    List(Vec<Expr>),
    /// A variable reference, resolved against the render's variable bag only
    Var(String),
    /// `output(subject)`
    Output(Box<Expr>),
    /// `translate(format)` or `translate(format, args)`
    Translate {
        format: Box<Expr>,
        args: Option<Box<Expr>>,
    },
    /// `value(key)` or `value(key, default)`
    Value {
        key: Box<Expr>,
        default: Option<Box<Expr>>,
    },
    /// `check(key)`
    Check(Box<Expr>),
    /// `custom(code, args...)`
    Custom {
        code: Box<Expr>,
        args: Vec<Expr>,
    },
}
