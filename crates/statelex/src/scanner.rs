//! Scanner: the driver-side view of a scan.
//!
//! State functions receive a `&mut Scanner`. It owns the [`Cursor`] and the
//! sending half of the token channel, and it lives on the driver thread for
//! the whole scan, so none of its fields need a lock.

use core::fmt;
use std::sync::mpsc::SyncSender;

use crate::{LexerOptions, cursor::Cursor, state::Transition, token::Token};

/// Cursor plus token output, handed to every state function.
#[derive(Debug)]
pub struct Scanner<K> {
    cursor: Cursor,
    tokens: SyncSender<Token<K>>,
    last: Option<Token<K>>,
    emitted: usize,
    disconnected: bool,
    #[cfg(any(test, feature = "fuzzing"))]
    panic_on_error: bool,
}

impl<K: Clone> Scanner<K> {
    pub(crate) fn new(input: String, tokens: SyncSender<Token<K>>, options: &LexerOptions) -> Self {
        #[cfg(not(any(test, feature = "fuzzing")))]
        let _ = options;
        Self {
            cursor: Cursor::new(input),
            tokens,
            last: None,
            emitted: 0,
            disconnected: false,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: options.panic_on_error,
        }
    }

    /// Sends the pending text as a token of type `kind` and starts a new
    /// pending span at the cursor.
    ///
    /// Blocks while the previous token is still waiting for a reader. If all
    /// readers are gone the token is dropped and the driver stops once the
    /// current state returns.
    ///
    /// # Panics
    ///
    /// Panics if the pending span is not a character range, which can only
    /// follow a misuse of [`Scanner::previous`].
    pub fn emit(&mut self, kind: K) {
        let token = Token::new(kind, self.cursor.pending());
        if self.send(token.clone()) {
            self.last = Some(token);
            self.emitted += 1;
        }
        self.cursor.mark_start();
    }

    /// Sends an error token carrying `message` and returns the terminal
    /// state.
    ///
    /// Reporting an error always ends the scan, so the usual call site is
    /// `return s.errorf(...)`. Pass `format_args!` (or use
    /// [`errorf!`](crate::errorf)) to format without an intermediate string.
    pub fn errorf(&mut self, message: impl fmt::Display) -> Transition<K> {
        let message = message.to_string();
        #[cfg(any(test, feature = "fuzzing"))]
        if self.panic_on_error {
            panic!("lexical error at offset {}: {message}", self.cursor.position());
        }
        tracing::debug!(position = self.cursor.position(), %message, "lexical error");
        self.send(Token::error(message));
        None
    }

    /// Returns `true` if a reader can still receive `token`.
    fn send(&mut self, token: Token<K>) -> bool {
        if self.disconnected {
            return false;
        }
        tracing::trace!(
            value = %token.value,
            error = token.is_error(),
            start = self.cursor.start(),
            end = self.cursor.position(),
            "emit"
        );
        if self.tokens.send(token).is_err() {
            self.disconnected = true;
        }
        !self.disconnected
    }
}

impl<K> Scanner<K> {
    /// See [`Cursor::next`].
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<char> {
        self.cursor.next()
    }

    /// See [`Cursor::peek`].
    pub fn peek(&mut self) -> Option<char> {
        self.cursor.peek()
    }

    /// See [`Cursor::previous`].
    ///
    /// # Panics
    ///
    /// Panics if the step would move before the beginning of the input.
    pub fn previous(&mut self) -> Option<char> {
        self.cursor.previous()
    }

    /// See [`Cursor::ignore`].
    pub fn ignore(&mut self) -> Option<char> {
        self.cursor.ignore()
    }

    /// See [`Cursor::next_up_to`].
    pub fn next_up_to<P>(&mut self, predicate: P) -> Option<char>
    where
        P: FnMut(char) -> bool,
    {
        self.cursor.next_up_to(predicate)
    }

    /// See [`Cursor::ignore_up_to`].
    pub fn ignore_up_to<P>(&mut self, predicate: P) -> Option<char>
    where
        P: FnMut(char) -> bool,
    {
        self.cursor.ignore_up_to(predicate)
    }

    /// See [`Cursor::accept`].
    pub fn accept<P>(&mut self, predicate: P) -> bool
    where
        P: FnOnce(char) -> bool,
    {
        self.cursor.accept(predicate)
    }

    /// See [`Cursor::accept_char`].
    pub fn accept_char(&mut self, expected: char) -> bool {
        self.cursor.accept_char(expected)
    }

    /// The underlying cursor.
    #[must_use]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// The complete input.
    #[must_use]
    pub fn input(&self) -> &str {
        self.cursor.input()
    }

    /// Byte offset of the next character to be read.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Byte offset where the pending token begins.
    #[must_use]
    pub fn start(&self) -> usize {
        self.cursor.start()
    }

    /// Returns `true` once every character has been read.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.cursor.is_eof()
    }

    /// See [`Cursor::pending`].
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Cursor::pending`].
    #[must_use]
    pub fn pending(&self) -> &str {
        self.cursor.pending()
    }

    /// The last token this scanner handed to the channel, if any.
    ///
    /// Tokens dropped after every reader hung up are not recorded. This is
    /// the driver's own record and is independent of what readers
    /// have received so far.
    #[must_use]
    pub fn last_token(&self) -> Option<&Token<K>> {
        self.last.as_ref()
    }

    /// Number of tokens handed to the channel so far, not counting errors or
    /// tokens dropped after every reader hung up.
    #[must_use]
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Returns `true` once a send has failed because every reader is gone.
    #[must_use]
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }
}
