//! GS-232 wire framing.
//!
//! Commands are short ASCII strings terminated by a carriage return. Some
//! controller software appends a line feed as well, which is tolerated.
//!
//! # Command format
//!
//! ```text
//! <letter>[<modifier>][<ddd>[ <ddd>...]]\r[\n]
//! ```
//!
//! - `letter`: command family, matched case-insensitively (`R`, `C`, `M`, ...).
//! - `modifier`: optional second byte (`C2`, `X3`, `H2`, `P45`, ...).
//! - `ddd`: fixed-width 3-digit decimal fields separated by single spaces
//!   (only `M` and `W`).
//!
//! # Reply format
//!
//! Acknowledgements are a bare `\r`. Position queries answer with `+0ddd`
//! (GS-232A) or `AZ=ddd` / `EL=ddd` (GS-232B). Every rejected frame is
//! answered with `?>\r`.

use crate::error::Rejection;

/// Frame terminator.
pub const TERMINATOR: u8 = b'\r';

/// Tolerated trailing byte after the terminator.
pub const LINE_FEED: u8 = b'\n';

/// Separator between numeric fields.
pub const FIELD_SEPARATOR: u8 = b' ';

/// Digits per numeric field.
pub const FIELD_DIGITS: usize = 3;

/// Bytes per numeric field including its separator or terminator.
pub const FIELD_WIDTH: usize = FIELD_DIGITS + 1;

/// Shortest acceptable frame: one letter plus the terminator.
pub const MIN_FRAME_LEN: usize = 2;

/// Shortest `M`/`W` frame: letter, one field, terminator.
pub const MIN_PAYLOAD_FRAME_LEN: usize = 1 + FIELD_WIDTH;

/// Reply to every rejected frame: `?>\r`.
pub const REJECTION_REPLY: &[u8] = b"?>\r";

/// Validate framing and return the frame without its optional line feed.
///
/// The returned slice always ends with [`TERMINATOR`] and is at least
/// [`MIN_FRAME_LEN`] bytes long.
///
/// # Example
///
/// ```
/// use gs232_protocol::protocol::strip_frame;
///
/// assert_eq!(strip_frame(b"R\r\n").unwrap(), b"R\r");
/// assert!(strip_frame(b"R").is_err());
/// ```
pub fn strip_frame(frame: &[u8]) -> Result<&[u8], Rejection> {
    let frame = frame.strip_suffix(&[LINE_FEED]).unwrap_or(frame);

    if frame.len() < MIN_FRAME_LEN {
        return Err(Rejection::Framing(format!(
            "frame of {} byte(s) is too short",
            frame.len()
        )));
    }

    if frame.last() != Some(&TERMINATOR) {
        return Err(Rejection::Framing("missing carriage return".into()));
    }

    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_plain_frame() {
        assert_eq!(strip_frame(b"C2\r").unwrap(), b"C2\r");
    }

    #[test]
    fn strip_trailing_line_feed() {
        assert_eq!(strip_frame(b"S\r\n").unwrap(), b"S\r");
    }

    #[test]
    fn only_one_line_feed_is_tolerated() {
        assert!(matches!(
            strip_frame(b"S\r\n\n"),
            Err(Rejection::Framing(_))
        ));
    }

    #[test]
    fn reject_missing_terminator() {
        assert_eq!(
            strip_frame(b"C2"),
            Err(Rejection::Framing("missing carriage return".into()))
        );
    }

    #[test]
    fn reject_short_frames() {
        assert!(strip_frame(b"").is_err());
        assert!(strip_frame(b"\r").is_err());
        assert!(strip_frame(b"\n").is_err());
        assert!(strip_frame(b"\r\n").is_err());
    }
}
