//! Frame processing with hardware actuation.
//!
//! [`parse`] and [`build_response`] are pure with respect to hardware. The
//! engine sits between them and calls the context's [`RotatorHardware`] at
//! these points, after the frame is parsed and before the reply is built:
//!
//! | Command | Hardware call |
//! |---------|---------------|
//! | `C` | `azimuth()` into the context |
//! | `C2` | `azimuth()` and `elevation()` into the context |
//! | `B` | `elevation()` into the context |
//! | `Maaa` | `set_azimuth(aaa)` |
//! | `Waaa` | `set_azimuth(aaa)` |
//! | `O` / `O2` / `F` / `F2` | the matching calibration |
//!
//! No command drives `set_elevation()`: a single-target `W` frame carries
//! only an azimuth, and timed tracking lists are stored but not actuated.
//! Hardware failures are logged and never change the reply. Readbacks outside
//! the current azimuth bound or above 180 degrees are discarded.
//!
//! [`RotatorHardware`]: gs232_core::hardware::RotatorHardware

use gs232_core::error::{Error, Result};
use gs232_core::types::MAX_ELEVATION;
use tracing::{debug, warn};

use crate::commands::{Command, parse};
use crate::context::ProtocolContext;
use crate::response::build_response;

/// Parse a frame, actuate the hardware, and return the reply bytes.
///
/// # Example
///
/// ```
/// use gs232_protocol::{ProtocolContext, process_frame};
///
/// let mut ctx = ProtocolContext::default();
/// assert_eq!(process_frame(&mut ctx, b"X2\r"), b"\r");
/// assert_eq!(process_frame(&mut ctx, b"C\r\n"), b"+0000\r");
/// ```
pub fn process_frame(ctx: &mut ProtocolContext, frame: &[u8]) -> Vec<u8> {
    let command = parse(ctx, frame);
    actuate(ctx, command);
    build_response(ctx, command)
}

/// Invoke the hardware for a parsed command.
pub fn actuate(ctx: &mut ProtocolContext, command: Command) {
    match command {
        Command::ReadAzimuth => sync_azimuth(ctx),
        Command::ReadAzimuthElevation => {
            sync_azimuth(ctx);
            sync_elevation(ctx);
        }
        Command::ReadElevation => sync_elevation(ctx),
        Command::TurnAzimuth | Command::TurnAzimuthElevation => {
            if let Some(azimuth) = ctx.memory.first() {
                report("set azimuth", ctx.hardware_mut().set_azimuth(azimuth));
            }
        }
        Command::OffsetCalibrationAzimuth => report(
            "azimuth offset calibration",
            ctx.hardware_mut().calibrate_offset_azimuth(),
        ),
        Command::OffsetCalibrationElevation => report(
            "elevation offset calibration",
            ctx.hardware_mut().calibrate_offset_elevation(),
        ),
        Command::FullScaleCalibrationAzimuth => report(
            "azimuth full scale calibration",
            ctx.hardware_mut().calibrate_full_scale_azimuth(),
        ),
        Command::FullScaleCalibrationElevation => report(
            "elevation full scale calibration",
            ctx.hardware_mut().calibrate_full_scale_elevation(),
        ),
        _ => {}
    }
}

fn sync_azimuth(ctx: &mut ProtocolContext) {
    let limit = ctx.angle_mode.max_azimuth();
    match ctx.hardware_mut().azimuth() {
        Ok(azimuth) if azimuth <= limit => ctx.azimuth = azimuth,
        Ok(azimuth) => warn!(
            azimuth,
            limit,
            kept = ctx.azimuth,
            "hardware azimuth out of range, ignoring"
        ),
        Err(e) => report("read azimuth", Err(e)),
    }
}

fn sync_elevation(ctx: &mut ProtocolContext) {
    match ctx.hardware_mut().elevation() {
        Ok(elevation) if elevation <= MAX_ELEVATION => ctx.elevation = elevation,
        Ok(elevation) => warn!(
            elevation,
            limit = MAX_ELEVATION,
            kept = ctx.elevation,
            "hardware elevation out of range, ignoring"
        ),
        Err(e) => report("read elevation", Err(e)),
    }
}

fn report(operation: &'static str, result: Result<()>) {
    match result {
        Ok(()) => debug!(operation, "hardware operation completed"),
        Err(Error::Unsupported(_)) => debug!(operation, "hardware operation not supported"),
        Err(e) => warn!(operation, error = %e, "hardware operation failed"),
    }
}
