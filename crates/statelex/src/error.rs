use thiserror::Error;

/// Failures of the token hand-off between the driver and its readers.
///
/// Problems with the input itself are never reported here; they arrive as
/// error tokens (see [`TokenType::Error`](crate::TokenType::Error)).
#[derive(Debug, Error)]
pub enum LexError {
    /// The operating system refused to start the driver thread.
    #[error("failed to spawn the driver thread: {0}")]
    Spawn(#[from] std::io::Error),
    /// A non-blocking receive found the slot empty.
    #[error("no token is ready yet")]
    Empty,
    /// A bounded receive gave up.
    #[error("timed out waiting for the next token")]
    Timeout,
    /// The driver has stopped and the slot is drained.
    #[error("the driver has finished and every token has been delivered")]
    Finished,
    /// A state function panicked; holds the panic message.
    #[error("a state function panicked: {0}")]
    DriverPanicked(String),
}
