//! A lexer engine built from state functions.
//!
//! A grammar is a set of functions, each taking a [`Scanner`] and returning
//! the next function to run (or `None` to stop). [`Lexer::new`] starts a
//! driver thread that runs those functions over the input; each call to
//! [`Scanner::emit`] hands one [`Token`] to the reader through a channel that
//! holds a single token. Readers pull tokens with [`Lexer::next_token`].
//!
//! ```rust
//! use statelex::{Lexer, Scanner, StateFn, Token, Transition};
//!
//! #[derive(Debug, Clone, PartialEq)]
//! enum Kind {
//!     Number,
//!     Op,
//! }
//!
//! fn lex_any(s: &mut Scanner<Kind>) -> Transition<Kind> {
//!     s.ignore_up_to(|c| !c.is_whitespace());
//!     match s.peek()? {
//!         c if c.is_ascii_digit() => Some(StateFn::new(lex_number)),
//!         '+' | '-' | '*' | '/' => {
//!             s.next();
//!             s.emit(Kind::Op);
//!             Some(StateFn::new(lex_any))
//!         }
//!         c => statelex::errorf!(s, "unexpected {c:?}"),
//!     }
//! }
//!
//! fn lex_number(s: &mut Scanner<Kind>) -> Transition<Kind> {
//!     s.next_up_to(|c| !(c == '.' || c.is_ascii_digit()));
//!     s.emit(Kind::Number);
//!     Some(StateFn::new(lex_any))
//! }
//!
//! let lexer = Lexer::new("3.14 * 2", lex_any).unwrap();
//! let tokens: Vec<_> = lexer.collect();
//! assert_eq!(
//!     tokens,
//!     [
//!         Token::new(Kind::Number, "3.14"),
//!         Token::new(Kind::Op, "*"),
//!         Token::new(Kind::Number, "2"),
//!     ]
//! );
//! ```

mod cursor;
mod error;
mod history;
mod lexer;
mod options;
mod scanner;
mod state;
mod token;

#[cfg(test)]
mod tests;

pub use cursor::Cursor;
pub use error::LexError;
pub use lexer::Lexer;
pub use options::LexerOptions;
pub use scanner::Scanner;
pub use state::{StateFn, Transition};
pub use token::{EOF, Token, TokenType};

/// Formats an error message, sends it as an error token and evaluates to the
/// terminal state.
///
/// ```rust
/// # use statelex::{Scanner, Transition};
/// fn lex_digit(s: &mut Scanner<()>) -> Transition<()> {
///     match s.next() {
///         Some(c) if c.is_ascii_digit() => None,
///         other => statelex::errorf!(s, "expected a digit, found {other:?}"),
///     }
/// }
/// ```
#[macro_export]
macro_rules! errorf {
    ($scanner:expr, $($arg:tt)+) => {
        $scanner.errorf(::core::format_args!($($arg)+))
    };
}
