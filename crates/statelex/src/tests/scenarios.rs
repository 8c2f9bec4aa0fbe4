//! End-to-end scans driven through [`Lexer`], one per cursor operation.
//!
//! Probes report positions and characters from the driver thread over
//! unbounded channels, so they never interfere with the single token slot.

use core::time::Duration;
use std::sync::mpsc;

use rstest::rstest;

use super::{Kind, numeric};
use crate::{EOF, Lexer, Scanner, Token, TokenType};

fn token(value: &str) -> Token<Kind> {
    Token::new(Kind::Token, value)
}

#[rstest]
#[timeout(Duration::from_secs(5))]
fn next_token_returns_emitted_token() {
    let l = Lexer::new("E = m * c^2", |s: &mut Scanner<Kind>| {
        s.next();
        s.emit(Kind::Token);
        None
    })
    .unwrap();
    assert_eq!(l.next_token(), Some(token("E")));
    assert_eq!(l.next_token(), None);
}

#[rstest]
#[timeout(Duration::from_secs(5))]
fn next_moves_ahead() {
    let (rt, r) = mpsc::channel();
    let (pt, p) = mpsc::channel();
    let l = Lexer::new("a^2 + b^2 = c^2", move |s: &mut Scanner<Kind>| {
        pt.send(s.position()).unwrap();
        rt.send(s.next()).unwrap();
        pt.send(s.position()).unwrap();
        rt.send(s.next()).unwrap();
        pt.send(s.position()).unwrap();
        rt.send(s.next()).unwrap();
        pt.send(s.position()).unwrap();
        s.emit(Kind::Token);
        None
    })
    .unwrap();

    assert_eq!(p.recv().unwrap(), 0);
    assert_eq!(r.recv().unwrap(), Some('a'));
    assert_eq!(p.recv().unwrap(), 1);
    assert_eq!(r.recv().unwrap(), Some('^'));
    assert_eq!(p.recv().unwrap(), 2);
    assert_eq!(r.recv().unwrap(), Some('2'));
    assert_eq!(p.recv().unwrap(), 3);
    assert_eq!(l.next_token(), Some(token("a^2")));
}

#[rstest]
#[timeout(Duration::from_secs(5))]
fn next_up_to_stops_at_eof() {
    let (rt, r) = mpsc::channel();
    let (pt, p) = mpsc::channel();
    let l = Lexer::new("3.14", move |s: &mut Scanner<Kind>| {
        pt.send(s.position()).unwrap();
        rt.send(s.next_up_to(|c| !numeric(c))).unwrap();
        pt.send(s.position()).unwrap();
        s.emit(Kind::Token);
        None
    })
    .unwrap();

    assert_eq!(p.recv().unwrap(), 0);
    assert_eq!(r.recv().unwrap(), EOF);
    assert_eq!(p.recv().unwrap(), 4);
    assert_eq!(l.next_token(), Some(token("3.14")));
}

#[rstest]
#[timeout(Duration::from_secs(5))]
fn peek_does_not_move() {
    let (rt, r) = mpsc::channel();
    let (pt, p) = mpsc::channel();
    let l = Lexer::new("E = m * c^2", move |s: &mut Scanner<Kind>| {
        pt.send(s.position()).unwrap();
        rt.send(s.peek()).unwrap();
        pt.send(s.position()).unwrap();
        s.emit(Kind::Token);
        None
    })
    .unwrap();

    assert_eq!(p.recv().unwrap(), 0);
    assert_eq!(r.recv().unwrap(), Some('E'));
    assert_eq!(p.recv().unwrap(), 0);
    assert_eq!(l.next_token(), Some(token("")));
}

#[rstest]
#[timeout(Duration::from_secs(5))]
fn previous_moves_behind() {
    let (rt, r) = mpsc::channel();
    let (pt, p) = mpsc::channel();
    let l = Lexer::new("C = 2 * Pi * r", move |s: &mut Scanner<Kind>| {
        pt.send(s.position()).unwrap();
        rt.send(s.next()).unwrap();
        pt.send(s.position()).unwrap();
        s.emit(Kind::Token);
        rt.send(s.previous()).unwrap();
        pt.send(s.position()).unwrap();
        None
    })
    .unwrap();

    assert_eq!(p.recv().unwrap(), 0);
    assert_eq!(r.recv().unwrap(), Some('C'));
    assert_eq!(p.recv().unwrap(), 1);
    assert_eq!(l.next_token(), Some(token("C")));
    assert_eq!(r.recv().unwrap(), Some('C'));
    assert_eq!(p.recv().unwrap(), 0);
}

#[rstest]
#[timeout(Duration::from_secs(5))]
fn ignore_skips_next() {
    let (rt, r) = mpsc::channel();
    let l = Lexer::new("e = 2.71", move |s: &mut Scanner<Kind>| {
        rt.send(s.next()).unwrap();
        s.emit(Kind::Token);
        rt.send(s.ignore()).unwrap();
        rt.send(s.next()).unwrap();
        s.emit(Kind::Token);
        rt.send(s.ignore()).unwrap();
        s.next_up_to(|c| !numeric(c));
        s.emit(Kind::Token);
        None
    })
    .unwrap();

    assert_eq!(r.recv().unwrap(), Some('e'));
    assert_eq!(l.next_token(), Some(token("e")));
    assert_eq!(r.recv().unwrap(), Some(' '));
    assert_eq!(r.recv().unwrap(), Some('='));
    assert_eq!(l.next_token(), Some(token("=")));
    assert_eq!(r.recv().unwrap(), Some(' '));
    assert_eq!(l.next_token(), Some(token("2.71")));
}

#[rstest]
#[timeout(Duration::from_secs(5))]
fn ignore_up_to_skips_until_predicate() {
    let (rt, r) = mpsc::channel();
    let (pt, p) = mpsc::channel();
    let l = Lexer::new("E = m * c^2", move |s: &mut Scanner<Kind>| {
        rt.send(s.ignore_up_to(|c| c == 'c')).unwrap();
        pt.send(s.position()).unwrap();
        for _ in 0..3 {
            rt.send(s.next()).unwrap();
            pt.send(s.position()).unwrap();
        }
        s.emit(Kind::Token);
        None
    })
    .unwrap();

    assert_eq!(r.recv().unwrap(), Some('c'));
    assert_eq!(p.recv().unwrap(), 8);
    assert_eq!(r.recv().unwrap(), Some('c'));
    assert_eq!(p.recv().unwrap(), 9);
    assert_eq!(r.recv().unwrap(), Some('^'));
    assert_eq!(p.recv().unwrap(), 10);
    assert_eq!(r.recv().unwrap(), Some('2'));
    assert_eq!(p.recv().unwrap(), 11);
    assert_eq!(l.next_token(), Some(token("c^2")));
}

#[rstest]
#[timeout(Duration::from_secs(5))]
fn previous_token_lags_by_one() {
    let l = Lexer::new("a^2 + b^2 = c^2", |s: &mut Scanner<Kind>| {
        let term = |c: char| !matches!(c, 'a' | 'b' | 'c' | '^' | '2');
        s.next_up_to(term);
        s.emit(Kind::Token);
        s.ignore();
        s.next();
        s.emit(Kind::Token);
        s.ignore();
        s.next_up_to(term);
        s.emit(Kind::Token);
        s.ignore();
        s.next();
        s.emit(Kind::Token);
        s.ignore();
        s.next_up_to(term);
        s.emit(Kind::Token);
        None
    })
    .unwrap();

    assert_eq!(l.previous_token(), None);
    assert_eq!(l.next_token(), Some(token("a^2")));
    assert_eq!(l.previous_token(), None);
    assert_eq!(l.next_token(), Some(token("+")));
    assert_eq!(l.previous_token(), Some(token("a^2")));
    assert_eq!(l.next_token(), Some(token("b^2")));
    assert_eq!(l.previous_token(), Some(token("+")));
    assert_eq!(l.next_token(), Some(token("=")));
    assert_eq!(l.previous_token(), Some(token("b^2")));
    assert_eq!(l.next_token(), Some(token("c^2")));
    assert_eq!(l.previous_token(), Some(token("=")));
    assert_eq!(l.current_token(), Some(token("c^2")));
}

#[rstest]
#[timeout(Duration::from_secs(5))]
fn errorf_emits_error_and_ends_scan() {
    let l = Lexer::new("E = m * c^2", |s: &mut Scanner<Kind>| {
        s.errorf("Unexpected input")
    })
    .unwrap();

    let t = l.next_token().unwrap();
    assert_eq!(t.ty, TokenType::Error);
    assert_eq!(t, Token::error("Unexpected input"));
    assert_eq!(l.next_token(), None);
    l.finish().unwrap();
}

#[rstest]
#[timeout(Duration::from_secs(5))]
fn errorf_after_tokens_is_last() {
    let l = Lexer::new("ab!", |s: &mut Scanner<Kind>| {
        s.next_up_to(|c| !c.is_alphabetic());
        s.emit(Kind::Word);
        let bad = s.next();
        crate::errorf!(s, "unexpected {bad:?} at {}", s.start())
    })
    .unwrap();

    let tokens: Vec<_> = l.collect();
    assert_eq!(
        tokens,
        [
            Token::new(Kind::Word, "ab"),
            Token::error("unexpected Some('!') at 2"),
        ]
    );
}
