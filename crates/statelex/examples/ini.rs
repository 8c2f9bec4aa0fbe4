//! Tokenizes an INI-style configuration file.
//!
//! The grammar is four states: line start, section header, key/value pair,
//! and comment. Tokens are printed as the driver produces them; an error
//! token stops the scan and is reported with the key it followed.
//!
//! Run with
//!
//! ```bash
//! cargo run -p statelex --example ini -- path/to/file.ini
//! RUST_LOG=statelex=trace cargo run -p statelex --example ini
//! ```

use std::{env, fs, process::ExitCode};

use statelex::{Lexer, Scanner, StateFn, Transition};
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = "\
; server settings
[server]
host = example.org
port = 8080

[paths]
root=/srv/www
logs   =   /var/log/www
broken
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ini {
    Comment,
    Section,
    Key,
    Equals,
    Value,
}

fn inline_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn lex_line(s: &mut Scanner<Ini>) -> Transition<Ini> {
    s.ignore_up_to(|c| !c.is_whitespace());
    match s.peek()? {
        ';' | '#' => Some(StateFn::new(lex_comment)),
        '[' => Some(StateFn::new(lex_section)),
        _ => Some(StateFn::new(lex_key)),
    }
}

fn lex_comment(s: &mut Scanner<Ini>) -> Transition<Ini> {
    s.next_up_to(|c| c == '\n');
    s.emit(Ini::Comment);
    Some(StateFn::new(lex_line))
}

fn lex_section(s: &mut Scanner<Ini>) -> Transition<Ini> {
    s.ignore();
    if s.next_up_to(|c| c == ']' || c == '\n') != Some(']') {
        return s.errorf(format_args!("unterminated section header at offset {}", s.start()));
    }
    s.emit(Ini::Section);
    s.ignore();
    Some(StateFn::new(lex_line))
}

fn lex_key(s: &mut Scanner<Ini>) -> Transition<Ini> {
    s.next_up_to(|c| c == '=' || c.is_whitespace());
    s.emit(Ini::Key);
    s.ignore_up_to(|c| !inline_space(c));
    if !s.accept_char('=') {
        let key = s.last_token().map(|t| t.value.clone()).unwrap_or_default();
        return statelex::errorf!(s, "expected '=' after key {key:?}");
    }
    s.emit(Ini::Equals);
    s.ignore_up_to(|c| !inline_space(c));
    Some(StateFn::new(lex_value))
}

fn lex_value(s: &mut Scanner<Ini>) -> Transition<Ini> {
    s.next_up_to(|c| c == '\n');
    s.emit(Ini::Value);
    Some(StateFn::new(lex_line))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let input = match env::args().nth(1) {
        Some(path) => match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("cannot read {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => SAMPLE.to_owned(),
    };

    let lexer = match Lexer::new(input, lex_line) {
        Ok(lexer) => lexer,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut failed = false;
    while let Some(token) = lexer.next_token() {
        if let Some(message) = token.error_message() {
            let after = lexer
                .previous_token()
                .map_or_else(|| String::from("start of input"), |t| t.to_string());
            eprintln!("error: {message} (after {after})");
            failed = true;
            break;
        }
        println!("{token}");
    }

    match lexer.finish() {
        Ok(()) if !failed => ExitCode::SUCCESS,
        Ok(()) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
