mod scenarios;

use crate::{Scanner, StateFn, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub(crate) enum Kind {
    Token,
    Word,
    Space,
}

pub(crate) fn numeric(ch: char) -> bool {
    ch == '.' || ch.is_ascii_digit()
}

/// Splits input into alternating `Word` and `Space` tokens without dropping
/// a single byte.
pub(crate) fn lex_words(s: &mut Scanner<Kind>) -> Transition<Kind> {
    let first = s.peek()?;
    if first.is_whitespace() {
        s.next_up_to(|c| !c.is_whitespace());
        s.emit(Kind::Space);
    } else {
        s.next_up_to(char::is_whitespace);
        s.emit(Kind::Word);
    }
    Some(StateFn::new(lex_words))
}
