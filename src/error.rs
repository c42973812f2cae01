//! Error types for template parsing and execution

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::context::ContextError;
use crate::functions::FunctionError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// An error in the directive grammar of a template body
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("Unclosed directive at {span:?}: missing `{close}`")]
    UnclosedDirective { span: Span, close: String },
}

impl ParseError {
    /// Byte range of the offending source text
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. } => span,
            ParseError::UnclosedDirective { span, .. } => span,
        }
    }

    /// Shift the error span by `offset` bytes.
    ///
    /// Directive contents are parsed in isolation, so their spans start at
    /// the tag body; the splitter rebases them onto the whole source.
    pub(crate) fn offset(self, offset: usize) -> Self {
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => ParseError::Syntax {
                span: span.start + offset..span.end + offset,
                message,
                expected,
            },
            other => other,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let (span, message, note) = match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => {
                let note = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };
                (span, message.clone(), note)
            }
            ParseError::UnclosedDirective { span, close } => (
                span,
                format!("directive is never closed with `{}`", close),
                String::new(),
            ),
        };

        Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(format!("{}{}", message, note))
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .ok();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl<'a> From<chumsky::error::Rich<'a, crate::parser::lexer::Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, crate::parser::lexer::Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => match found {
                Some(tok) => format!("Unexpected {}", format_token(tok)),
                None => "Unexpected end of directive".to_string(),
            },
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of directive".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &crate::parser::lexer::Token) -> String {
    use crate::parser::lexer::Token;
    match tok {
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::Str(s) => format!("string \"{}\"", s),
        Token::Int(n) => format!("number {}", n),
        Token::Float(n) => format!("number {}", n),
        Token::Output => "helper 'output'".to_string(),
        Token::Translate => "helper 'translate'".to_string(),
        Token::Value => "helper 'value'".to_string(),
        Token::Check => "helper 'check'".to_string(),
        Token::Custom => "helper 'custom'".to_string(),
        Token::Null => "keyword 'null'".to_string(),
        Token::True => "keyword 'true'".to_string(),
        Token::False => "keyword 'false'".to_string(),
        Token::ParenOpen => "'('".to_string(),
        Token::ParenClose => "')'".to_string(),
        Token::BracketOpen => "'['".to_string(),
        Token::BracketClose => "']'".to_string(),
        Token::Comma => "','".to_string(),
    }
}

/// Errors raised while executing a template body in its isolated scope.
///
/// These never reach the caller directly: the render pipeline wraps the
/// whole chain into [`crate::RenderError::Internal`] at one point.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A body name that is not in the variable bag
    #[error("no variable named `{name}` in template scope")]
    Undefined { name: String },

    /// A context lookup failed
    #[error(transparent)]
    Context(#[from] ContextError),

    /// A custom function invocation failed
    #[error("problem calling custom function `{function_code}`")]
    CustomFunction {
        function_code: String,
        #[source]
        cause: FunctionError,
    },

    /// A helper received a malformed argument, or a value could not be
    /// normalized to text
    #[error("invalid argument: {argument}")]
    InvalidArgument { argument: String },

    /// The template body does not conform to the directive grammar
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// The template body could not be read after validation passed
    #[error("failed to read template source: {0}")]
    Io(#[from] std::io::Error),
}

pub(crate) fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
