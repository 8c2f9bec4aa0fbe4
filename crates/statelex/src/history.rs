use std::sync::{Mutex, PoisonError};

use crate::token::Token;

#[derive(Debug)]
struct Slots<K> {
    previous: Option<Token<K>>,
    current: Option<Token<K>>,
}

/// The two most recently delivered tokens.
///
/// Shared by every reader of a [`Lexer`](crate::Lexer). The lock is held only
/// for the swap or the clone, never across a channel receive.
#[derive(Debug)]
pub(crate) struct TokenHistory<K> {
    slots: Mutex<Slots<K>>,
}

impl<K> Default for TokenHistory<K> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(Slots {
                previous: None,
                current: None,
            }),
        }
    }
}

impl<K: Clone> TokenHistory<K> {
    /// Records `token` as current and demotes the old current to previous.
    pub(crate) fn rotate(&self, token: &Token<K>) {
        // A reader that panicked mid-clone leaves both slots intact.
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.previous = slots.current.replace(token.clone());
    }

    pub(crate) fn previous(&self) -> Option<Token<K>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.previous.clone()
    }

    pub(crate) fn current(&self) -> Option<Token<K>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.current.clone()
    }
}
