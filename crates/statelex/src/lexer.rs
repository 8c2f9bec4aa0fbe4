//! The reader-side handle of a scan.
//!
//! Construction spawns the driver thread and returns immediately. Tokens
//! travel through a channel that holds exactly one token: `emit` blocks
//! until the slot is free and `next_token` blocks until it is full, so the
//! driver runs at most one token ahead of its readers.
//!
//! Readers may share one `Lexer` (it is `Sync`). Receiving and updating the
//! token history happen under the same receiver lock, so the history always
//! matches delivery order.

use core::{any::Any, fmt, time::Duration};
use std::{
    sync::{
        Mutex, MutexGuard, PoisonError, TryLockError,
        mpsc::{self, Receiver, RecvTimeoutError, TryRecvError},
    },
    thread::{self, JoinHandle},
    time::Instant,
};

use crate::{
    LexError, LexerOptions,
    history::TokenHistory,
    scanner::Scanner,
    state::{self, StateFn, Transition},
    token::Token,
};

/// How often a bounded receive retries the receiver lock while another
/// reader is waiting on it.
const LOCK_POLL: Duration = Duration::from_millis(1);

/// A running scan of one input.
///
/// ```rust
/// use statelex::{Lexer, Scanner, Token, Transition};
///
/// #[derive(Debug, Clone, PartialEq)]
/// enum Kind {
///     Ident,
/// }
///
/// fn first_char(s: &mut Scanner<Kind>) -> Transition<Kind> {
///     s.next();
///     s.emit(Kind::Ident);
///     None
/// }
///
/// let lexer = Lexer::new("E = m * c^2", first_char).unwrap();
/// assert_eq!(lexer.next_token(), Some(Token::new(Kind::Ident, "E")));
/// assert_eq!(lexer.next_token(), None);
/// ```
pub struct Lexer<K> {
    tokens: Mutex<Receiver<Token<K>>>,
    history: TokenHistory<K>,
    driver: JoinHandle<()>,
}

impl<K: Clone + Send + 'static> Lexer<K> {
    /// Starts scanning `input` from `initial` with default options.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::Spawn`] if the driver thread cannot be started.
    pub fn new<F>(input: impl Into<String>, initial: F) -> Result<Self, LexError>
    where
        F: FnOnce(&mut Scanner<K>) -> Transition<K> + Send + 'static,
    {
        Self::with_options(input, initial, LexerOptions::default())
    }

    /// Starts scanning `input` from `initial`.
    ///
    /// # Errors
    ///
    /// Returns [`LexError::Spawn`] if the driver thread cannot be started.
    pub fn with_options<F>(
        input: impl Into<String>,
        initial: F,
        options: LexerOptions,
    ) -> Result<Self, LexError>
    where
        F: FnOnce(&mut Scanner<K>) -> Transition<K> + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel(1);
        let scanner = Scanner::new(input.into(), tx, &options);
        let initial = StateFn::new(initial);

        let mut builder = thread::Builder::new().name(options.thread_name);
        if let Some(size) = options.stack_size {
            builder = builder.stack_size(size);
        }
        let driver = builder.spawn(move || state::drive(scanner, initial))?;

        Ok(Self {
            tokens: Mutex::new(rx),
            history: TokenHistory::default(),
            driver,
        })
    }

    /// Waits for the next token.
    ///
    /// Returns `None` once the driver has stopped and every token it emitted
    /// has been received.
    pub fn next_token(&self) -> Option<Token<K>> {
        let tokens = self.receiver();
        let token = tokens.recv().ok()?;
        self.history.rotate(&token);
        Some(token)
    }

    /// Takes the next token if one is already waiting.
    ///
    /// Never blocks, not even while another reader is waiting in
    /// [`Lexer::next_token`].
    ///
    /// # Errors
    ///
    /// [`LexError::Empty`] if the driver has not emitted yet or another
    /// reader holds the slot, and [`LexError::Finished`] if the driver never
    /// will emit again.
    pub fn try_next_token(&self) -> Result<Token<K>, LexError> {
        let tokens = self.try_receiver().ok_or(LexError::Empty)?;
        let token = tokens.try_recv().map_err(|e| match e {
            TryRecvError::Empty => LexError::Empty,
            TryRecvError::Disconnected => LexError::Finished,
        })?;
        self.history.rotate(&token);
        Ok(token)
    }

    /// Waits at most `timeout` for the next token.
    ///
    /// Time spent waiting for another reader to release the slot counts
    /// against `timeout`.
    ///
    /// # Errors
    ///
    /// [`LexError::Timeout`] if nothing arrived in time, and
    /// [`LexError::Finished`] if the driver has stopped and the slot is empty.
    pub fn next_token_timeout(&self, timeout: Duration) -> Result<Token<K>, LexError> {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return self.next_token().ok_or(LexError::Finished);
        };
        let tokens = loop {
            if let Some(tokens) = self.try_receiver() {
                break tokens;
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(LexError::Timeout);
            }
            thread::sleep(LOCK_POLL.min(deadline - now));
        };
        let remaining = deadline.saturating_duration_since(Instant::now());
        let token = tokens.recv_timeout(remaining).map_err(|e| match e {
            RecvTimeoutError::Timeout => LexError::Timeout,
            RecvTimeoutError::Disconnected => LexError::Finished,
        })?;
        self.history.rotate(&token);
        Ok(token)
    }

    /// The token delivered just before the most recent one.
    ///
    /// Lags [`Lexer::next_token`] by exactly one delivery: `None` until two
    /// tokens have been received.
    pub fn previous_token(&self) -> Option<Token<K>> {
        self.history.previous()
    }

    /// The most recently delivered token.
    pub fn current_token(&self) -> Option<Token<K>> {
        self.history.current()
    }

    /// Blocking iterator over the remaining tokens.
    pub fn iter(&self) -> impl Iterator<Item = Token<K>> + '_ {
        std::iter::from_fn(move || self.next_token())
    }

    /// Stops reading and waits for the driver thread to exit.
    ///
    /// Tokens not yet received are discarded; a driver blocked in `emit`
    /// wakes up and stops. A state function that loops forever without
    /// emitting keeps this call waiting.
    ///
    /// # Errors
    ///
    /// [`LexError::DriverPanicked`] if a state function panicked.
    pub fn finish(self) -> Result<(), LexError> {
        let Self { tokens, driver, .. } = self;
        drop(tokens);
        driver
            .join()
            .map_err(|payload| LexError::DriverPanicked(panic_message(payload.as_ref())))
    }
}

impl<K> Lexer<K> {
    /// Returns `true` once the driver thread has exited.
    ///
    /// Tokens may still be waiting in the slot.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.driver.is_finished()
    }

    fn receiver(&self) -> MutexGuard<'_, Receiver<Token<K>>> {
        // The guarded receiver is never left half-updated.
        self.tokens.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The receiver, unless another reader is holding it.
    fn try_receiver(&self) -> Option<MutexGuard<'_, Receiver<Token<K>>>> {
        match self.tokens.try_lock() {
            Ok(tokens) => Some(tokens),
            Err(TryLockError::Poisoned(poisoned)) => Some(poisoned.into_inner()),
            Err(TryLockError::WouldBlock) => None,
        }
    }
}

impl<K: Clone + Send + 'static> Iterator for Lexer<K> {
    type Item = Token<K>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl<K> fmt::Debug for Lexer<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("driver_finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        String::from("non-string panic payload")
    }
}
