//! Translation service consumed by the `translate` helper

use crate::value::{normalize, Value};

/// Host-provided translation service.
///
/// The service owns placeholder interpolation: the `translate` helper hands
/// it the format string and arguments verbatim and emits whatever comes back.
pub trait Translate: Send + Sync {
    fn translate(&self, format: &str, args: &[Value]) -> String;
}

/// Default translator: no catalog lookup, positional `%s` interpolation.
///
/// Each `%s` is replaced by the next argument's text form; `%%` produces a
/// literal `%`. Arguments with no text form are rendered as their type name
/// in brackets rather than failing, since translation output is display-only.
#[derive(Debug, Clone, Default)]
pub struct PassthroughTranslator;

impl Translate for PassthroughTranslator {
    fn translate(&self, format: &str, args: &[Value]) -> String {
        let mut result = String::with_capacity(format.len());
        let mut args = args.iter();
        let mut chars = format.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                result.push(c);
                continue;
            }
            match chars.peek() {
                Some('%') => {
                    chars.next();
                    result.push('%');
                }
                Some('s') => {
                    chars.next();
                    match args.next() {
                        Some(arg) => result.push_str(&text_form(arg)),
                        None => result.push_str("%s"),
                    }
                }
                _ => result.push('%'),
            }
        }
        result
    }
}

fn text_form(value: &Value) -> String {
    normalize(value).unwrap_or_else(|_| format!("[{}]", value.type_name()))
}
