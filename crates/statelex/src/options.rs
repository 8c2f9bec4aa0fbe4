/// Configuration for the driver thread of a [`Lexer`](crate::Lexer).
///
/// The token channel is not configurable: it always holds exactly one token,
/// so the driver can never run more than one token ahead of its readers.
///
/// # Examples
///
/// ```rust
/// use statelex::{Lexer, LexerOptions, Scanner, Transition};
///
/// fn done(_: &mut Scanner<()>) -> Transition<()> {
///     None
/// }
///
/// let options = LexerOptions {
///     thread_name: "config-lexer".into(),
///     ..Default::default()
/// };
/// let lexer = Lexer::with_options("", done, options).unwrap();
/// assert_eq!(lexer.next_token(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LexerOptions {
    /// Name given to the driver thread.
    ///
    /// Shows up in panic messages and in debuggers.
    ///
    /// # Default
    ///
    /// `"statelex-driver"`
    pub thread_name: String,

    /// Stack size of the driver thread in bytes.
    ///
    /// Deeply recursive state functions may need more than the platform
    /// default.
    ///
    /// # Default
    ///
    /// `None`, which uses the standard library's default.
    pub stack_size: Option<usize>,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on the driver thread instead of emitting error tokens.
    ///
    /// Enabled only in test and fuzzing builds to get a backtrace at the
    /// point a grammar rejects its input.
    #[cfg_attr(feature = "serde", serde(default))]
    pub panic_on_error: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            thread_name: String::from("statelex-driver"),
            stack_size: None,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}
