//! GS-232 command set and frame parser.
//!
//! [`parse`] turns one carriage-return-terminated frame into a [`Command`].
//! Parsing also applies the immediate state changes a command implies:
//! `X1`..`X4` select the rotation speed, `P36`/`P45` switch the angle mode,
//! `Z` toggles the center reference, and accepted `M`/`W` commands replace
//! the waypoint memory.
//!
//! # GS-232 command reference
//!
//! | Frame | Command | Variant |
//! |-------|---------|---------|
//! | `R` / `L` / `A` | clockwise / counter-clockwise / stop azimuth | A, B |
//! | `U` / `D` / `E` | up / down / stop elevation | A, B |
//! | `C` / `C2` / `B` | read azimuth / azimuth+elevation / elevation | A, B |
//! | `Maaa` | turn to azimuth | A, B |
//! | `Mttt aaa aaa ...` | timed azimuth tracking | A, B |
//! | `Waaa eee` | turn to azimuth and elevation | A, B |
//! | `Wttt aaa eee ...` | timed azimuth/elevation tracking | A, B |
//! | `N` / `T` | memorized point count / start timed tracking | A, B |
//! | `X1`..`X4` | rotation speed | A, B |
//! | `O` / `O2` / `F` / `F2` | offset / full scale calibration | A, B |
//! | `S` | all stop | A, B |
//! | `H` / `H2` | help pages | A, B |
//! | `H3` / `P36` / `P45` / `Z` | help page 3 / 360 / 450 mode / N-S center | B |

use std::fmt;

use gs232_core::types::{AngleMode, RotationSpeed};
use tracing::{debug, trace};

use crate::context::ProtocolContext;
use crate::error::Rejection;
use crate::protocol::{FIELD_DIGITS, MIN_PAYLOAD_FRAME_LEN, TERMINATOR, strip_frame};
use crate::values::{ValueShape, extract_values, validate};

const FULL_TURN: u16 = 360;

/// Index of the byte that follows the first numeric field of `M`/`W`.
const FIRST_SEPARATOR: usize = 1 + FIELD_DIGITS;

/// A parsed GS-232 command.
///
/// Commands carry no payload; decoded numeric fields live in the context's
/// waypoint memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `R`
    ClockwiseRotation,
    /// `U`
    UpRotation,
    /// `L`
    CounterClockwiseRotation,
    /// `D`
    DownRotation,
    /// `A`
    AzimuthStop,
    /// `E`
    ElevationStop,
    /// `C`
    ReadAzimuth,
    /// `C2`
    ReadAzimuthElevation,
    /// `Maaa`
    TurnAzimuth,
    /// `Mttt aaa aaa ...`
    TimedTrackingAzimuth,
    /// `Waaa eee`
    TurnAzimuthElevation,
    /// `Wttt aaa eee aaa eee ...`
    TimedTrackingAzimuthElevation,
    /// `N`
    WaypointCount,
    /// `T`
    StartTimedTracking,
    /// `X1`..`X4`
    SetSpeed(RotationSpeed),
    /// `O`
    OffsetCalibrationAzimuth,
    /// `O2`
    OffsetCalibrationElevation,
    /// `F`
    FullScaleCalibrationAzimuth,
    /// `F2`
    FullScaleCalibrationElevation,
    /// `B`
    ReadElevation,
    /// `S`
    AllStop,
    /// `H`
    Help1,
    /// `H2`
    Help2,
    /// `H3` (GS-232B)
    Help3,
    /// `P36` (GS-232B)
    AzimuthMode360,
    /// `P45` (GS-232B)
    AzimuthMode450,
    /// `Z` (GS-232B)
    ToggleCenter,
    /// Anything rejected, answered with `?>`.
    Unknown,
}

impl Command {
    /// Stable descriptive name, suitable for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::ClockwiseRotation => "CLOCKWISE_ROTATION",
            Command::UpRotation => "UP_DIRECTION_ROTATION",
            Command::CounterClockwiseRotation => "COUNTER_CLOCKWISE_ROTATION",
            Command::DownRotation => "DOWN_DIRECTION_ROTATION",
            Command::AzimuthStop => "CW_CCW_ROTATION_STOP",
            Command::ElevationStop => "UP_DOWN_DIRECTION_ROTATION_STOP",
            Command::ReadAzimuth => "RETURN_CURRENT_AZIMUTH",
            Command::ReadAzimuthElevation => "RETURN_AZIMUTH_AND_ELEVATION",
            Command::TurnAzimuth => "TURN_DEGREES_AZIMUTH",
            Command::TimedTrackingAzimuth => "AUTOMATIC_TIMED_TRACKING_AZIMUTH",
            Command::TurnAzimuthElevation => "TURN_DEGREES_AZIMUTH_AND_ELEVATION",
            Command::TimedTrackingAzimuthElevation => {
                "AUTOMATIC_TIMED_TRACKING_AZIMUTH_AND_ELEVATION"
            }
            Command::WaypointCount => "TOTAL_NUMBER_OF_SETTING_ANGLES",
            Command::StartTimedTracking => "START_COMMAND_IN_TIME_INTERVAL",
            Command::SetSpeed(RotationSpeed::Low) => "ROTATION_SPEED_LOW",
            Command::SetSpeed(RotationSpeed::Middle1) => "ROTATION_SPEED_MIDDLE1",
            Command::SetSpeed(RotationSpeed::Middle2) => "ROTATION_SPEED_MIDDLE2",
            Command::SetSpeed(RotationSpeed::High) => "ROTATION_SPEED_HIGH",
            Command::OffsetCalibrationAzimuth => "OFFSET_CALIBRATION_AZIMUTH",
            Command::OffsetCalibrationElevation => "OFFSET_CALIBRATION_ELEVATION",
            Command::FullScaleCalibrationAzimuth => "FULL_SCALE_CALIBRATION_AZIMUTH",
            Command::FullScaleCalibrationElevation => "FULL_SCALE_CALIBRATION_ELEVATION",
            Command::ReadElevation => "RETURN_CURRENT_ELEVATION",
            Command::AllStop => "ALL_STOP",
            Command::Help1 => "LIST_OF_COMMANDS1",
            Command::Help2 => "LIST_OF_COMMANDS2",
            Command::Help3 => "LIST_OF_COMMANDS3",
            Command::AzimuthMode360 => "AZIMUTH_TO_360",
            Command::AzimuthMode450 => "AZIMUTH_TO_450",
            Command::ToggleCenter => "TOGGLE_AZIMUTH_NORTH_SOUTH",
            Command::Unknown => "UNKNOWN_COMMAND",
        }
    }

    /// Wire mnemonic of the command (`"C2"`, `"X3"`, `"P45"`, ...).
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Command::ClockwiseRotation => "R",
            Command::UpRotation => "U",
            Command::CounterClockwiseRotation => "L",
            Command::DownRotation => "D",
            Command::AzimuthStop => "A",
            Command::ElevationStop => "E",
            Command::ReadAzimuth => "C",
            Command::ReadAzimuthElevation => "C2",
            Command::TurnAzimuth | Command::TimedTrackingAzimuth => "M",
            Command::TurnAzimuthElevation | Command::TimedTrackingAzimuthElevation => "W",
            Command::WaypointCount => "N",
            Command::StartTimedTracking => "T",
            Command::SetSpeed(RotationSpeed::Low) => "X1",
            Command::SetSpeed(RotationSpeed::Middle1) => "X2",
            Command::SetSpeed(RotationSpeed::Middle2) => "X3",
            Command::SetSpeed(RotationSpeed::High) => "X4",
            Command::OffsetCalibrationAzimuth => "O",
            Command::OffsetCalibrationElevation => "O2",
            Command::FullScaleCalibrationAzimuth => "F",
            Command::FullScaleCalibrationElevation => "F2",
            Command::ReadElevation => "B",
            Command::AllStop => "S",
            Command::Help1 => "H",
            Command::Help2 => "H2",
            Command::Help3 => "H3",
            Command::AzimuthMode360 => "P36",
            Command::AzimuthMode450 => "P45",
            Command::ToggleCenter => "Z",
            Command::Unknown => "?",
        }
    }

    /// Whether the command exists only in GS-232B.
    pub fn is_b_only(&self) -> bool {
        matches!(
            self,
            Command::Help3
                | Command::AzimuthMode360
                | Command::AzimuthMode450
                | Command::ToggleCenter
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// Parse one frame, collapsing every rejection into [`Command::Unknown`].
///
/// This never fails: each frame yields exactly one command. Use
/// [`try_parse`] to find out why a frame was rejected.
///
/// # Example
///
/// ```
/// use gs232_protocol::{Command, ProtocolContext, parse};
///
/// let mut ctx = ProtocolContext::default();
/// assert_eq!(parse(&mut ctx, b"M045\r"), Command::TurnAzimuth);
/// assert_eq!(ctx.memory.as_slice(), &[45]);
/// assert_eq!(parse(&mut ctx, b"M500\r"), Command::Unknown);
/// ```
pub fn parse(ctx: &mut ProtocolContext, frame: &[u8]) -> Command {
    trace!(frame = %frame.escape_ascii(), "parsing frame");

    match try_parse(ctx, frame) {
        Ok(command) => {
            debug!(command = command.name(), "parsed command");
            command
        }
        Err(rejection) => {
            debug!(reason = %rejection, "rejected frame");
            Command::Unknown
        }
    }
}

/// Parse one frame, reporting the reason for a rejection.
///
/// State side effects are applied only when the frame is accepted.
pub fn try_parse(ctx: &mut ProtocolContext, frame: &[u8]) -> Result<Command, Rejection> {
    let frame = strip_frame(frame)?;
    // strip_frame guarantees at least the letter and the terminator.
    let modifier = frame[1];

    let command = match frame[0].to_ascii_uppercase() {
        b'R' => Command::ClockwiseRotation,
        b'U' => Command::UpRotation,
        b'L' => Command::CounterClockwiseRotation,
        b'D' => Command::DownRotation,
        b'A' => Command::AzimuthStop,
        b'E' => Command::ElevationStop,
        b'C' if modifier == b'2' => Command::ReadAzimuthElevation,
        b'C' => Command::ReadAzimuth,
        b'M' => parse_payload(
            ctx,
            frame,
            (Command::TurnAzimuth, ValueShape::Azimuth),
            (Command::TimedTrackingAzimuth, ValueShape::TimeAzimuth),
        )?,
        b'W' => parse_payload(
            ctx,
            frame,
            (Command::TurnAzimuthElevation, ValueShape::AzimuthElevation),
            (
                Command::TimedTrackingAzimuthElevation,
                ValueShape::TimeAzimuthElevation,
            ),
        )?,
        b'N' => Command::WaypointCount,
        b'T' => Command::StartTimedTracking,
        b'X' => {
            let speed = RotationSpeed::from_digit(modifier).ok_or_else(|| unknown(frame))?;
            ctx.rotation_speed = speed;
            Command::SetSpeed(speed)
        }
        b'O' if modifier == b'2' => Command::OffsetCalibrationElevation,
        b'O' => Command::OffsetCalibrationAzimuth,
        b'F' if modifier == b'2' => Command::FullScaleCalibrationElevation,
        b'F' => Command::FullScaleCalibrationAzimuth,
        b'B' => Command::ReadElevation,
        b'S' => Command::AllStop,
        b'H' => match modifier {
            TERMINATOR => Command::Help1,
            b'2' => Command::Help2,
            b'3' => {
                require_b(ctx, "H3")?;
                Command::Help3
            }
            _ => return Err(unknown(frame)),
        },
        b'P' => {
            require_b(ctx, "P")?;
            match &frame[1..] {
                [b'3', b'6', ..] => {
                    ctx.angle_mode = AngleMode::Mode360;
                    // An overlap position points the same way as azimuth - 360.
                    let limit = ctx.angle_mode.max_azimuth();
                    if ctx.azimuth > limit {
                        ctx.azimuth -= FULL_TURN;
                    }
                    Command::AzimuthMode360
                }
                [b'4', b'5', ..] => {
                    ctx.angle_mode = AngleMode::Mode450;
                    Command::AzimuthMode450
                }
                _ => return Err(unknown(frame)),
            }
        }
        b'Z' => {
            require_b(ctx, "Z")?;
            ctx.center = ctx.center.toggled();
            Command::ToggleCenter
        }
        _ => return Err(unknown(frame)),
    };

    Ok(command)
}

/// Decode and validate an `M`/`W` payload, committing it to memory on success.
///
/// The byte after the first field picks the form: the terminator means a
/// single target, anything else a timed tracking list.
fn parse_payload(
    ctx: &mut ProtocolContext,
    frame: &[u8],
    single: (Command, ValueShape),
    timed: (Command, ValueShape),
) -> Result<Command, Rejection> {
    if frame.len() < MIN_PAYLOAD_FRAME_LEN {
        return Err(Rejection::MalformedPayload(format!(
            "{}-byte frame is too short for a payload",
            frame.len()
        )));
    }

    let memory = extract_values(&frame[1..])?;
    let (command, shape) = if frame[FIRST_SEPARATOR] == TERMINATOR {
        single
    } else {
        timed
    };

    validate(memory.as_slice(), shape, ctx.angle_mode)?;

    debug!(%shape, count = memory.len(), "waypoint memory programmed");
    ctx.memory = memory;
    Ok(command)
}

fn require_b(ctx: &ProtocolContext, mnemonic: &'static str) -> Result<(), Rejection> {
    if ctx.variant.is_b() {
        Ok(())
    } else {
        Err(Rejection::VariantGated(mnemonic))
    }
}

fn unknown(frame: &[u8]) -> Rejection {
    let body = frame.strip_suffix(&[TERMINATOR]).unwrap_or(frame);
    Rejection::UnknownCommand(body.escape_ascii().to_string())
}
