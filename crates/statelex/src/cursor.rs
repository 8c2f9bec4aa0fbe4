//! Cursor: a position/width-tracked read head over immutable input.
//!
//! Positions are byte offsets into the input. The cursor remembers the width
//! of exactly one decoded character, which is what makes [`Cursor::previous`]
//! possible and also what limits it: only one step back is defined after a
//! forward step. There is no history stack.
//!
//! The span `start..position` is the pending token text. Consuming steps
//! ([`Cursor::next`], [`Cursor::next_up_to`]) extend it; ignoring steps
//! ([`Cursor::ignore`], [`Cursor::ignore_up_to`]) drop everything scanned so
//! far by moving `start` up to the cursor.

use crate::token::EOF;

/// Read head over the input of a single scan.
#[derive(Debug, Clone)]
pub struct Cursor {
    input: String,
    pos: usize,
    width: usize,
    start: usize,
}

impl Cursor {
    /// Creates a cursor at the beginning of `input`.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            pos: 0,
            width: 0,
            start: 0,
        }
    }

    /// The complete input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Byte offset of the next character to be read.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Byte width of the most recently decoded character; `0` after a step
    /// that hit the end of input.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Byte offset where the pending token begins.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns `true` once every character has been read.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The text scanned since the last emit or ignore.
    ///
    /// # Panics
    ///
    /// Panics if `start..position` is not an ordered range of character
    /// boundaries. That only happens after [`Cursor::previous`] has been used
    /// outside of its contract.
    #[must_use]
    pub fn pending(&self) -> &str {
        match self.input.get(self.start..self.pos) {
            Some(text) => text,
            None => panic!(
                "pending span {}..{} is not a character range of the input",
                self.start, self.pos
            ),
        }
    }

    /// Reads the next character and moves past it.
    ///
    /// Returns [`EOF`] at the end of input, in which case the remembered
    /// width becomes zero and the position does not move.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<char> {
        let Some((ch, len)) = decode_at(&self.input, self.pos) else {
            self.width = 0;
            return EOF;
        };
        self.width = len;
        self.pos += len;
        Some(ch)
    }

    /// Returns the next character without moving.
    ///
    /// Implemented as [`Cursor::next`] followed by [`Cursor::previous`], so
    /// the remembered width afterwards is the width of the peeked character.
    pub fn peek(&mut self) -> Option<char> {
        let ch = self.next();
        self.previous();
        ch
    }

    /// Steps back by the width of the last decoded character and returns the
    /// character now under the cursor.
    ///
    /// Only one step back is defined after a forward step. Calling this twice
    /// in a row steps back by the same width again, which leaves the cursor
    /// at an unspecified offset; a later [`Cursor::pending`] may then panic.
    ///
    /// # Panics
    ///
    /// Panics if the step would move before the beginning of the input.
    pub fn previous(&mut self) -> Option<char> {
        let Some(pos) = self.pos.checked_sub(self.width) else {
            panic!(
                "stepped back {} bytes from offset {}, past the beginning of input",
                self.width, self.pos
            );
        };
        self.pos = pos;
        decode_at(&self.input, pos).map(|(ch, _)| ch)
    }

    /// Reads the next character and drops everything scanned so far from the
    /// pending token, including that character.
    pub fn ignore(&mut self) -> Option<char> {
        let ch = self.next();
        self.start = self.pos;
        ch
    }

    /// Consumes characters into the pending token until `predicate` holds for
    /// the next one or the input ends.
    ///
    /// Returns the character that stopped the scan, which is left unread, or
    /// [`EOF`].
    pub fn next_up_to<P>(&mut self, predicate: P) -> Option<char>
    where
        P: FnMut(char) -> bool,
    {
        self.scan_up_to(predicate, Self::next)
    }

    /// Like [`Cursor::next_up_to`], but discards the scanned characters.
    pub fn ignore_up_to<P>(&mut self, predicate: P) -> Option<char>
    where
        P: FnMut(char) -> bool,
    {
        self.scan_up_to(predicate, Self::ignore)
    }

    /// Consumes the next character if `predicate` holds for it.
    pub fn accept<P>(&mut self, predicate: P) -> bool
    where
        P: FnOnce(char) -> bool,
    {
        match self.peek() {
            Some(ch) if predicate(ch) => {
                self.next();
                true
            }
            _ => false,
        }
    }

    /// Consumes the next character if it is `expected`.
    pub fn accept_char(&mut self, expected: char) -> bool {
        self.accept(|ch| ch == expected)
    }

    /// Starts a new pending span at the cursor.
    pub(crate) fn mark_start(&mut self) {
        self.start = self.pos;
    }

    fn scan_up_to<P>(
        &mut self,
        mut predicate: P,
        step: fn(&mut Self) -> Option<char>,
    ) -> Option<char>
    where
        P: FnMut(char) -> bool,
    {
        loop {
            match self.peek() {
                Some(ch) if !predicate(ch) => {
                    step(self);
                }
                stop => return stop,
            }
        }
    }
}

/// Decodes the character starting at byte `offset`.
///
/// Offsets inside a multi-byte sequence decode as U+FFFD with width one.
fn decode_at(input: &str, offset: usize) -> Option<(char, usize)> {
    let bytes = input.as_bytes().get(offset..)?;
    let (ch, len) = bstr::decode_utf8(bytes);
    if len == 0 {
        return None;
    }
    Some((ch.unwrap_or('\u{FFFD}'), len))
}
