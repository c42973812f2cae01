//! Directive expression parser using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ParseError;
use crate::parser::ast::Expr;
use crate::parser::lexer::Token;

/// Parse one directive body into an expression
pub fn parse_expr(input: &str) -> Result<Expr, Vec<ParseError>> {
    let len = input.len();

    // Lex first; unlexable input is a parse error, never dropped.
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    for (tok, span) in crate::parser::lexer::lex(input) {
        match tok {
            Ok(t) => tokens.push((t, SimpleSpan::from(span))),
            Err(()) => errors.push(ParseError::Syntax {
                message: format!("Unrecognized input `{}`", &input[span.clone()]),
                span,
                expected: Vec::new(),
            }),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let token_stream =
        Stream::from_iter(tokens.into_iter()).map((len..len).into(), |(t, s): (_, _)| (t, s));

    expr_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Wrap a parser in `(` ... `)`
fn parens<'a, I, O>(
    inner: impl Parser<'a, I, O, extra::Err<Rich<'a, Token>>> + Clone,
) -> impl Parser<'a, I, O, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    inner.delimited_by(just(Token::ParenOpen), just(Token::ParenClose))
}

fn expr_parser<'a, I>() -> impl Parser<'a, I, Expr, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    recursive(|expr| {
        let literal = select! {
            Token::Null => Expr::Null,
            Token::True => Expr::Bool(true),
            Token::False => Expr::Bool(false),
            Token::Int(n) => Expr::Int(n),
            Token::Float(n) => Expr::Float(n),
            Token::Str(s) => Expr::Str(s),
        };

        let variable = select! {
            Token::Ident(name) => Expr::Var(name),
        };

        let list = expr
            .clone()
            .separated_by(just(Token::Comma))
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
            .map(Expr::List);

        let output = just(Token::Output)
            .ignore_then(parens(expr.clone()))
            .map(|subject| Expr::Output(Box::new(subject)));

        let translate = just(Token::Translate)
            .ignore_then(parens(
                expr.clone()
                    .then(just(Token::Comma).ignore_then(expr.clone()).or_not()),
            ))
            .map(|(format, args)| Expr::Translate {
                format: Box::new(format),
                args: args.map(Box::new),
            });

        let value = just(Token::Value)
            .ignore_then(parens(
                expr.clone()
                    .then(just(Token::Comma).ignore_then(expr.clone()).or_not()),
            ))
            .map(|(key, default)| Expr::Value {
                key: Box::new(key),
                default: default.map(Box::new),
            });

        let check = just(Token::Check)
            .ignore_then(parens(expr.clone()))
            .map(|key| Expr::Check(Box::new(key)));

        let custom = just(Token::Custom)
            .ignore_then(parens(expr.clone().then(
                just(Token::Comma)
                    .ignore_then(expr.clone())
                    .repeated()
                    .collect::<Vec<_>>(),
            )))
            .map(|(code, args)| Expr::Custom {
                code: Box::new(code),
                args,
            });

        choice((
            output,
            translate,
            value,
            check,
            custom,
            list,
            literal,
            variable,
        ))
    })
}
