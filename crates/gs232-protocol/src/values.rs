//! Numeric payload extraction and range validation for `M` and `W`.
//!
//! Payloads are runs of fixed-width 3-digit fields, each followed by a space
//! or, for the last one, the carriage return:
//!
//! ```text
//! M045\r               -> [45]
//! M010 090 180 270\r   -> [10, 90, 180, 270]
//! W120 045\r           -> [120, 45]
//! ```

use std::fmt;

use gs232_core::types::{AngleMode, MAX_ELEVATION, MAX_STEP};
use tracing::trace;

use crate::error::Rejection;
use crate::memory::{MEMORY_CAPACITY, WaypointMemory};
use crate::protocol::{FIELD_DIGITS, FIELD_SEPARATOR, FIELD_WIDTH, TERMINATOR};

/// How the decoded values of a payload are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueShape {
    /// `aaa`
    Azimuth,
    /// `ttt aaa aaa ...`
    TimeAzimuth,
    /// `aaa eee [aaa eee ...]`
    AzimuthElevation,
    /// `ttt aaa eee aaa eee ...`
    TimeAzimuthElevation,
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueShape::Azimuth => "AZIMUTH",
            ValueShape::TimeAzimuth => "TIME_AZIMUTH",
            ValueShape::AzimuthElevation => "AZIMUTH_ELEVATION",
            ValueShape::TimeAzimuthElevation => "TIME_AZIMUTH_ELEVATION",
        };
        write!(f, "{s}")
    }
}

/// Decode the numeric fields of a payload.
///
/// `fields` is the frame after the command letter, terminator included
/// (`b"045 090\r"`). Its length must be a non-zero multiple of
/// [`FIELD_WIDTH`].
///
/// # Example
///
/// ```
/// use gs232_protocol::values::extract_values;
///
/// let memory = extract_values(b"010 090 180\r").unwrap();
/// assert_eq!(memory.as_slice(), &[10, 90, 180]);
/// ```
pub fn extract_values(fields: &[u8]) -> Result<WaypointMemory, Rejection> {
    if fields.is_empty() || fields.len() % FIELD_WIDTH != 0 {
        return Err(Rejection::MalformedPayload(format!(
            "payload length {} is not a multiple of {FIELD_WIDTH}",
            fields.len()
        )));
    }

    let group_count = fields.len() / FIELD_WIDTH;
    let mut memory = WaypointMemory::new();

    for (index, group) in fields.chunks_exact(FIELD_WIDTH).enumerate() {
        if memory.is_full() {
            return Err(Rejection::TooManyValues {
                capacity: MEMORY_CAPACITY,
            });
        }

        let value = decode_field(&group[..FIELD_DIGITS])?;
        memory
            .push(value)
            .map_err(|e| Rejection::TooManyValues {
                capacity: e.capacity,
            })?;

        let is_last = index + 1 == group_count;
        match (group[FIELD_DIGITS], is_last) {
            (FIELD_SEPARATOR, false) | (TERMINATOR, true) => {}
            (byte, _) => {
                return Err(Rejection::MalformedPayload(format!(
                    "unexpected byte {byte:#04x} after field {index}"
                )));
            }
        }
    }

    trace!(count = memory.len(), "decoded payload values");
    Ok(memory)
}

fn decode_field(digits: &[u8]) -> Result<u16, Rejection> {
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(Rejection::MalformedPayload(format!(
            "non-digit in field {:?}",
            String::from_utf8_lossy(digits)
        )));
    }

    // Three digits always fit; the parse keeps a guard on the conversion.
    std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .ok_or(Rejection::OutOfRange {
            value: u16::MAX,
            limit: MAX_STEP,
        })
}

/// Check decoded values against the bounds of `shape` in `mode`.
///
/// In the paired shapes a trailing azimuth without its elevation is only
/// checked as an azimuth.
pub fn validate(values: &[u16], shape: ValueShape, mode: AngleMode) -> Result<(), Rejection> {
    let Some((&head, rest)) = values.split_first() else {
        return Err(Rejection::MalformedPayload("no values".into()));
    };

    match shape {
        ValueShape::Azimuth => check_azimuth(head, mode),
        ValueShape::TimeAzimuth => {
            check(head, MAX_STEP)?;
            rest.iter().try_for_each(|&az| check_azimuth(az, mode))
        }
        ValueShape::AzimuthElevation => check_pairs(values, mode),
        ValueShape::TimeAzimuthElevation => {
            check(head, MAX_STEP)?;
            check_pairs(rest, mode)
        }
    }
}

fn check_pairs(values: &[u16], mode: AngleMode) -> Result<(), Rejection> {
    for pair in values.chunks(2) {
        check_azimuth(pair[0], mode)?;
        if let Some(&el) = pair.get(1) {
            check(el, MAX_ELEVATION)?;
        }
    }
    Ok(())
}

fn check_azimuth(value: u16, mode: AngleMode) -> Result<(), Rejection> {
    check(value, mode.max_azimuth())
}

fn check(value: u16, limit: u16) -> Result<(), Rejection> {
    if value > limit {
        return Err(Rejection::OutOfRange { value, limit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // Extraction
    // ---------------------------------------------------------------

    #[test]
    fn extract_single_field() {
        let mem = extract_values(b"045\r").unwrap();
        assert_eq!(mem.as_slice(), &[45]);
    }

    #[test]
    fn extract_multiple_fields() {
        let mem = extract_values(b"005 000 090 359\r").unwrap();
        assert_eq!(mem.as_slice(), &[5, 0, 90, 359]);
    }

    #[test]
    fn extract_max_field_value() {
        let mem = extract_values(b"999\r").unwrap();
        assert_eq!(mem.first(), Some(999));
    }

    #[test]
    fn extract_rejects_bad_length() {
        assert!(matches!(
            extract_values(b"45\r"),
            Err(Rejection::MalformedPayload(_))
        ));
        assert!(matches!(
            extract_values(b""),
            Err(Rejection::MalformedPayload(_))
        ));
    }

    #[test]
    fn extract_rejects_non_digits() {
        assert!(matches!(
            extract_values(b"0a5\r"),
            Err(Rejection::MalformedPayload(_))
        ));
        assert!(matches!(
            extract_values(b"010 -90\r"),
            Err(Rejection::MalformedPayload(_))
        ));
    }

    #[test]
    fn extract_rejects_bad_separator() {
        assert!(matches!(
            extract_values(b"010,090\r"),
            Err(Rejection::MalformedPayload(_))
        ));
    }

    #[test]
    fn extract_rejects_early_terminator() {
        assert!(matches!(
            extract_values(b"010\r090\r"),
            Err(Rejection::MalformedPayload(_))
        ));
    }

    #[test]
    fn extract_rejects_missing_final_terminator() {
        assert!(matches!(
            extract_values(b"010 090 "),
            Err(Rejection::MalformedPayload(_))
        ));
    }

    fn payload_with_fields(count: usize) -> Vec<u8> {
        let mut out = Vec::with_capacity(count * FIELD_WIDTH);
        for i in 0..count {
            out.extend_from_slice(b"100");
            out.push(if i + 1 == count { b'\r' } else { b' ' });
        }
        out
    }

    #[test]
    fn extract_accepts_full_capacity() {
        let mem = extract_values(&payload_with_fields(MEMORY_CAPACITY)).unwrap();
        assert_eq!(mem.len(), MEMORY_CAPACITY);
        assert!(mem.is_full());
    }

    #[test]
    fn extract_rejects_over_capacity() {
        assert_eq!(
            extract_values(&payload_with_fields(MEMORY_CAPACITY + 1)),
            Err(Rejection::TooManyValues {
                capacity: MEMORY_CAPACITY
            })
        );
    }

    // ---------------------------------------------------------------
    // Validation
    // ---------------------------------------------------------------

    #[test]
    fn azimuth_bound_follows_mode() {
        assert!(validate(&[360], ValueShape::Azimuth, AngleMode::Mode360).is_ok());
        assert_eq!(
            validate(&[361], ValueShape::Azimuth, AngleMode::Mode360),
            Err(Rejection::OutOfRange {
                value: 361,
                limit: 360
            })
        );
        assert!(validate(&[450], ValueShape::Azimuth, AngleMode::Mode450).is_ok());
        assert!(validate(&[451], ValueShape::Azimuth, AngleMode::Mode450).is_err());
    }

    #[test]
    fn time_azimuth_checks_every_azimuth() {
        let mode = AngleMode::Mode360;
        assert!(validate(&[999, 0, 90, 360], ValueShape::TimeAzimuth, mode).is_ok());
        assert!(validate(&[10, 0, 361, 90], ValueShape::TimeAzimuth, mode).is_err());
    }

    #[test]
    fn time_field_is_not_an_azimuth() {
        // 500 is a valid step count even though it exceeds 360.
        assert!(validate(&[500, 45], ValueShape::TimeAzimuth, AngleMode::Mode360).is_ok());
    }

    #[test]
    fn azimuth_elevation_pairs() {
        let mode = AngleMode::Mode360;
        assert!(validate(&[180, 90], ValueShape::AzimuthElevation, mode).is_ok());
        assert!(validate(&[180, 180, 360, 0], ValueShape::AzimuthElevation, mode).is_ok());
        assert_eq!(
            validate(&[180, 181], ValueShape::AzimuthElevation, mode),
            Err(Rejection::OutOfRange {
                value: 181,
                limit: 180
            })
        );
        assert!(validate(&[400, 10], ValueShape::AzimuthElevation, mode).is_err());
        assert!(validate(&[400, 10], ValueShape::AzimuthElevation, AngleMode::Mode450).is_ok());
    }

    #[test]
    fn unpaired_azimuth_is_checked_alone() {
        let mode = AngleMode::Mode360;
        assert!(validate(&[45], ValueShape::AzimuthElevation, mode).is_ok());
        assert!(validate(&[361], ValueShape::AzimuthElevation, mode).is_err());
    }

    #[test]
    fn time_azimuth_elevation_pairs_start_after_time() {
        let mode = AngleMode::Mode360;
        assert!(validate(&[5, 90, 45, 180, 10], ValueShape::TimeAzimuthElevation, mode).is_ok());
        assert!(validate(&[5, 90, 181], ValueShape::TimeAzimuthElevation, mode).is_err());
        // The time field is not treated as an azimuth.
        assert!(validate(&[900, 90, 45], ValueShape::TimeAzimuthElevation, mode).is_ok());
    }

    #[test]
    fn empty_values_are_rejected() {
        assert!(matches!(
            validate(&[], ValueShape::Azimuth, AngleMode::Mode360),
            Err(Rejection::MalformedPayload(_))
        ));
    }

    #[test]
    fn shape_display() {
        assert_eq!(ValueShape::TimeAzimuthElevation.to_string(), "TIME_AZIMUTH_ELEVATION");
    }
}
