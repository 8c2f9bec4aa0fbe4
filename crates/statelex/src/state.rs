//! State functions and the driver loop that runs them.
//!
//! A state is whatever the grammar author says it is: any function or
//! closure that takes the [`Scanner`] and returns the next state. `None` is
//! the one terminal state. There is no registry, so states may recurse into
//! themselves or into each other freely.

use core::fmt;

use crate::scanner::Scanner;

/// What a state function hands back to the driver: the next state, or `None`
/// to stop.
pub type Transition<K> = Option<StateFn<K>>;

/// A boxed state function.
///
/// Plain `fn` items convert without allocating; closures may capture
/// whatever they need as long as it can move to the driver thread.
///
/// ```rust
/// use statelex::{Scanner, StateFn, Transition};
///
/// #[derive(Clone)]
/// enum Kind {
///     Word,
/// }
///
/// fn lex_word(s: &mut Scanner<Kind>) -> Transition<Kind> {
///     s.next_up_to(char::is_whitespace);
///     s.emit(Kind::Word);
///     s.ignore();
///     if s.is_eof() { None } else { Some(StateFn::new(lex_word)) }
/// }
///
/// let _start: StateFn<Kind> = lex_word.into();
/// ```
pub struct StateFn<K>(Box<dyn FnOnce(&mut Scanner<K>) -> Transition<K> + Send + 'static>);

impl<K> StateFn<K> {
    /// Wraps a function or closure as a state.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(&mut Scanner<K>) -> Transition<K> + Send + 'static,
    {
        Self(Box::new(f))
    }

    /// Runs this state against `scanner`.
    pub fn run(self, scanner: &mut Scanner<K>) -> Transition<K> {
        (self.0)(scanner)
    }
}

impl<K, F> From<F> for StateFn<K>
where
    F: FnOnce(&mut Scanner<K>) -> Transition<K> + Send + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl<K> fmt::Debug for StateFn<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateFn(..)")
    }
}

/// Runs states until one returns `None` or every reader has gone away.
#[tracing::instrument(
    level = "debug",
    name = "driver",
    skip_all,
    fields(input_len = scanner.input().len())
)]
pub(crate) fn drive<K: Clone>(mut scanner: Scanner<K>, initial: StateFn<K>) {
    let mut state = Some(initial);
    let mut steps = 0usize;
    while let Some(current) = state.take() {
        state = current.run(&mut scanner);
        steps += 1;
        if scanner.is_disconnected() {
            tracing::debug!(steps, "token channel closed; stopping");
            return;
        }
    }
    tracing::debug!(
        steps,
        tokens = scanner.emitted(),
        position = scanner.position(),
        "reached terminal state"
    );
}
