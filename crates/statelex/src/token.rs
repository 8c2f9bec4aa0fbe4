use core::fmt;

/// End of input.
///
/// Stepping operations return `Option<char>`; `EOF` is the `None` case. It
/// never compares equal to a decoded character, so scans can treat it as an
/// ordinary terminating value.
pub const EOF: Option<char> = None;

/// The discriminant of a [`Token`].
///
/// `K` is the caller's own classification (usually a fieldless enum). The
/// `Error` variant is reserved for lexical errors and cannot collide with any
/// value of `K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenType<K> {
    /// A lexical error; the token value is the error message.
    Error,
    /// A caller-defined kind.
    Kind(K),
}

impl<K> TokenType<K> {
    /// Returns `true` for the reserved error discriminant.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, TokenType::Error)
    }

    /// Returns the caller-defined kind, or `None` for an error.
    #[must_use]
    pub fn kind(&self) -> Option<&K> {
        match self {
            TokenType::Error => None,
            TokenType::Kind(k) => Some(k),
        }
    }
}

impl<K> From<K> for TokenType<K> {
    fn from(kind: K) -> Self {
        TokenType::Kind(kind)
    }
}

/// A classified piece of input produced by the driver.
///
/// For ordinary tokens `value` is the exact input text between the start of
/// the pending span and the cursor at the time of the emit. For error tokens
/// it is the formatted message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token<K> {
    /// Classification of this token.
    pub ty: TokenType<K>,
    /// Matched text, or the error message for error tokens.
    pub value: String,
}

impl<K> Token<K> {
    /// Creates a token of a caller-defined kind.
    pub fn new(kind: K, value: impl Into<String>) -> Self {
        Self {
            ty: TokenType::Kind(kind),
            value: value.into(),
        }
    }

    /// Creates an error token carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ty: TokenType::Error,
            value: message.into(),
        }
    }

    /// Returns `true` if this token reports a lexical error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.ty.is_error()
    }

    /// The caller-defined kind, or `None` for an error token.
    #[must_use]
    pub fn kind(&self) -> Option<&K> {
        self.ty.kind()
    }

    /// The error message if this is an error token.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.is_error().then_some(self.value.as_str())
    }
}

impl<K: fmt::Debug> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ty {
            TokenType::Error => write!(f, "error: {}", self.value),
            TokenType::Kind(k) => write!(f, "{k:?} {:?}", self.value),
        }
    }
}
