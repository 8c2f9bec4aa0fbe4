#![allow(missing_docs)]
#![allow(dead_code)]

use std::fmt::Write;

use statelex::{Scanner, StateFn, Token, Transition};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[ctor::ctor]
fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Token kinds of a small calculator language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Calc {
    Number,
    Ident,
    Op,
    Assign,
    LParen,
    RParen,
}

pub fn lex_expr(s: &mut Scanner<Calc>) -> Transition<Calc> {
    s.ignore_up_to(|c| !c.is_whitespace());
    match s.peek()? {
        c if c.is_ascii_digit() || c == '.' => Some(StateFn::new(lex_number)),
        c if c.is_alphabetic() || c == '_' => Some(StateFn::new(lex_ident)),
        '(' => single(s, Calc::LParen),
        ')' => single(s, Calc::RParen),
        '=' => single(s, Calc::Assign),
        '+' | '-' | '*' | '/' | '^' => single(s, Calc::Op),
        other => {
            let at = s.position();
            statelex::errorf!(s, "unexpected {other:?} at offset {at}")
        }
    }
}

fn single(s: &mut Scanner<Calc>, kind: Calc) -> Transition<Calc> {
    s.next();
    s.emit(kind);
    Some(StateFn::new(lex_expr))
}

fn lex_number(s: &mut Scanner<Calc>) -> Transition<Calc> {
    s.next_up_to(|c| !(c.is_ascii_digit() || c == '.'));
    if s.pending().matches('.').count() > 1 {
        let text = s.pending().to_owned();
        return statelex::errorf!(s, "malformed number {text:?}");
    }
    s.emit(Calc::Number);
    Some(StateFn::new(lex_expr))
}

fn lex_ident(s: &mut Scanner<Calc>) -> Transition<Calc> {
    s.next_up_to(|c| !(c.is_alphanumeric() || c == '_'));
    s.emit(Calc::Ident);
    Some(StateFn::new(lex_expr))
}

pub fn render(tokens: &[Token<Calc>]) -> String {
    let mut out = String::new();
    for t in tokens {
        writeln!(out, "{t}").unwrap();
    }
    out
}

/// Builds an input of roughly `target_len` bytes of assignments.
pub fn make_program(target_len: usize) -> String {
    let mut s = String::with_capacity(target_len + 32);
    let mut i = 0usize;
    while s.len() < target_len {
        writeln!(s, "x_{i} = (a{i} + 3.25) * b^2 - {i}").unwrap();
        i += 1;
    }
    s
}
