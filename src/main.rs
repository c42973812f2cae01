//! Stencil CLI
//!
//! Usage:
//!   stencil [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --context <FILE>  Context values for rendering (TOML format)
//!   -s, --syntax <FILE>   Directive delimiter configuration (TOML format)
//!   -g, --grammar         Show directive grammar reference
//!   -h, --help            Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use stencil::{MapContext, Syntax, Template, Value};

#[derive(Parser)]
#[command(name = "stencil")]
#[command(about = "Scope-isolated template rendering engine")]
struct Cli {
    /// Template file (reads the body from stdin if not provided)
    input: Option<PathBuf>,

    /// Context values for rendering (TOML file of key = value pairs)
    #[arg(short, long)]
    context: Option<PathBuf>,

    /// Directive delimiter configuration (TOML file)
    #[arg(short, long)]
    syntax: Option<PathBuf>,

    /// Show directive grammar reference
    #[arg(short, long)]
    grammar: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.grammar {
        print_grammar();
        return;
    }

    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    let context = match &cli.context {
        Some(path) => match load_context(path) {
            Ok(ctx) => ctx,
            Err(e) => {
                eprintln!("Error loading context '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => MapContext::new(),
    };

    let syntax = match &cli.syntax {
        Some(path) => match Syntax::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading syntax '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Syntax::default(),
    };

    let template = match &cli.input {
        Some(path) => Template::from_file(path),
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => Template::inline("<stdin>", buffer),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    match template.with_syntax(syntax).render(&context) {
        Ok(text) => print!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Load a flat TOML table into a context
fn load_context(path: &PathBuf) -> Result<MapContext, String> {
    let content = std::fs::read_to_string(path).map_err(|e| e.to_string());
    let table: toml::Table = toml::from_str(&content?).map_err(|e| e.to_string())?;

    let mut context = MapContext::new();
    for (key, value) in table {
        context.insert(key, toml_value(value));
    }
    Ok(context)
}

fn toml_value(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(n) => Value::Int(n),
        toml::Value::Float(n) => Value::Float(n),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::List(items.into_iter().map(toml_value).collect()),
        toml::Value::Table(table) => Value::Map(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_value(v)))
                .collect(),
        ),
    }
}

fn print_intro() {
    println!(
        r#"Stencil - scope-isolated template rendering

USAGE:
    stencil [OPTIONS] [FILE]
    echo '<template>' | stencil

OPTIONS:
    -c, --context   Context values (TOML file of key = value pairs)
    -s, --syntax    Directive delimiters (TOML file)
    -g, --grammar   Show directive grammar reference
    -h, --help      Print help

QUICK START:
    echo 'Hi {{{{ output("name") }}}}' | stencil -c ctx.toml
"#
    );
}

fn print_grammar() {
    println!(
        r#"STENCIL DIRECTIVE GRAMMAR

A template is literal text with directive tags ({{{{ ... }}}} by default).
Each tag holds one expression; a non-null result is written to the output.

Helpers (the only callable names):
    output(subject)            Emit a value. A string subject matching a
                               context key emits that key's value; otherwise
                               the subject itself is emitted.
    translate(format)          Translate a format string.
    translate(format, [args])  ... with interpolation arguments.
    value(key)                 Context value for key, or null.
    value(key, default)        ... or the given default.
    check(key)                 true when the context has key.
    custom(code, args...)      Invoke a registered custom function.

Other expressions:
    name                       A template variable (must be passed in).
    "text", 42, 1.5,           Literals.
    true, false, null
    [a, b, c]                  A list.

EXAMPLES:
    Hello {{{{ output(user) }}}}!
    {{{{ translate("Hi %s, %s new", [user, count]) }}}}
    {{{{ value("title", "untitled") }}}}
    {{{{ custom("upper", value("title", "")) }}}}
"#
    );
}
