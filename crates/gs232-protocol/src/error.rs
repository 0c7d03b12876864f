//! Diagnostic rejection taxonomy for the GS-232 parser.
//!
//! On the wire every rejection looks the same (`?>\r`). These variants exist
//! so logs and callers of [`try_parse`](crate::commands::try_parse) can tell
//! why a frame was refused.

/// Why a frame did not resolve to a valid command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// Missing carriage return or a frame shorter than two bytes.
    #[error("framing error: {0}")]
    Framing(String),

    /// The numeric payload of `M`/`W` violates the `ddd ddd ...` grouping.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// More 3-digit groups than the waypoint memory can hold.
    #[error("too many values (capacity {capacity})")]
    TooManyValues { capacity: usize },

    /// A decoded value exceeds its mode-dependent bound.
    #[error("value {value} out of range (max {limit})")]
    OutOfRange { value: u16, limit: u16 },

    /// Leading byte(s) do not name a command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The command exists only in GS-232B and the link speaks GS-232A.
    #[error("{0} requires GS-232B")]
    VariantGated(&'static str),
}
