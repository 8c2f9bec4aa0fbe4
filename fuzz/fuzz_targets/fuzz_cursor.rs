#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use statelex::{Lexer, LexerOptions, Scanner};

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Class {
    Whitespace,
    Alphanumeric,
    Ascii,
    Exactly(char),
}

impl Class {
    fn matches(self, c: char) -> bool {
        match self {
            Class::Whitespace => c.is_whitespace(),
            Class::Alphanumeric => c.is_alphanumeric(),
            Class::Ascii => c.is_ascii(),
            Class::Exactly(x) => c == x,
        }
    }
}

/// Operations that stay within the cursor's contract.
#[derive(Debug, Clone, Copy, Arbitrary)]
enum Op {
    Next,
    Peek,
    Ignore,
    NextUpTo(Class),
    IgnoreUpTo(Class),
    Accept(Class),
    StepBack,
    Emit,
}

#[derive(Debug, Arbitrary)]
struct Script {
    input: String,
    ops: Vec<Op>,
}

fn run(s: &mut Scanner<u8>, ops: &[Op]) {
    for &op in ops {
        match op {
            Op::Next => {
                s.next();
            }
            Op::Peek => {
                let before = s.position();
                s.peek();
                assert_eq!(before, s.position());
            }
            Op::Ignore => {
                s.ignore();
                assert_eq!(s.start(), s.position());
            }
            Op::NextUpTo(class) => {
                let stop = s.next_up_to(|c| class.matches(c));
                assert!(stop.is_none_or(|c| class.matches(c)));
            }
            Op::IgnoreUpTo(class) => {
                let (start, position) = (s.start(), s.position());
                s.ignore_up_to(|c| class.matches(c));
                if s.position() == position {
                    // Immediate match: nothing ignored, pending text kept.
                    assert_eq!(s.start(), start);
                } else {
                    assert_eq!(s.start(), s.position());
                }
            }
            Op::Accept(class) => {
                s.accept(|c| class.matches(c));
            }
            Op::StepBack => {
                let before = s.position();
                if s.next().is_some() {
                    s.previous();
                }
                assert_eq!(before, s.position());
            }
            Op::Emit => s.emit(0),
        }
        assert!(s.start() <= s.position());
        assert!(s.input().is_char_boundary(s.position()));
        let _ = s.pending();
    }
}

fuzz_target!(|script: Script| {
    let Script { input, ops } = script;
    let expected_len = input.len();
    let options = LexerOptions {
        panic_on_error: true,
        ..Default::default()
    };
    let lexer = Lexer::with_options(
        input,
        move |s: &mut Scanner<u8>| {
            run(s, &ops);
            assert!(s.position() <= expected_len);
            None
        },
        options,
    )
    .unwrap();

    let tokens: Vec<_> = lexer.iter().collect();
    assert!(tokens.iter().all(|t| !t.is_error()));
    if let Err(e) = lexer.finish() {
        panic!("{e}");
    }
});
