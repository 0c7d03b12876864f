//! Error types for the GS-232 workspace.
//!
//! Transport failures and rotator hardware failures are reported through
//! [`Error`]. Protocol-level rejections never surface here: the wire protocol
//! answers every bad frame with a single `?>` reply, so the parser keeps its
//! own diagnostic taxonomy in `gs232-protocol`.

/// The error type for all fallible GS-232 operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport-level error (serial port, pty).
    #[error("transport error: {0}")]
    Transport(String),

    /// Timed out waiting for bytes from the controller.
    ///
    /// The serve loop treats this as an idle tick rather than a failure.
    #[error("timeout waiting for data")]
    Timeout,

    /// The rotator hardware rejected or failed an operation.
    #[error("hardware error: {0}")]
    Hardware(String),

    /// The requested operation is not supported by the attached hardware.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// No connection has been established.
    #[error("not connected")]
    NotConnected,

    /// The connection was lost unexpectedly.
    #[error("connection lost")]
    ConnectionLost,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
