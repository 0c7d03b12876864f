//! Capability trait for the physical rotator behind the protocol.
//!
//! The protocol core never reaches for hardware on its own. Position
//! accessors and calibration operations are injected through
//! [`RotatorHardware`] and invoked only by the actuation engine in
//! `gs232-protocol`, at fixed points of the parse/respond cycle.

use crate::error::{Error, Result};

/// Motion and calibration capabilities of a rotator.
///
/// Every method has a default body returning [`Error::Unsupported`], so an
/// implementation only overrides what its hardware can actually do.
pub trait RotatorHardware: Send {
    /// Read the current azimuth in degrees.
    fn azimuth(&mut self) -> Result<u16> {
        Err(Error::Unsupported("read azimuth".into()))
    }

    /// Command the rotator to an azimuth in degrees.
    fn set_azimuth(&mut self, _azimuth: u16) -> Result<()> {
        Err(Error::Unsupported("set azimuth".into()))
    }

    /// Read the current elevation in degrees.
    fn elevation(&mut self) -> Result<u16> {
        Err(Error::Unsupported("read elevation".into()))
    }

    /// Command the rotator to an elevation in degrees.
    fn set_elevation(&mut self, _elevation: u16) -> Result<()> {
        Err(Error::Unsupported("set elevation".into()))
    }

    /// Azimuth offset calibration (`O`).
    fn calibrate_offset_azimuth(&mut self) -> Result<()> {
        Err(Error::Unsupported("azimuth offset calibration".into()))
    }

    /// Elevation offset calibration (`O2`).
    fn calibrate_offset_elevation(&mut self) -> Result<()> {
        Err(Error::Unsupported("elevation offset calibration".into()))
    }

    /// Azimuth full scale calibration (`F`).
    fn calibrate_full_scale_azimuth(&mut self) -> Result<()> {
        Err(Error::Unsupported("azimuth full scale calibration".into()))
    }

    /// Elevation full scale calibration (`F2`).
    fn calibrate_full_scale_elevation(&mut self) -> Result<()> {
        Err(Error::Unsupported("elevation full scale calibration".into()))
    }
}

/// Hardware stand-in for a context with nothing attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedHardware;

impl RotatorHardware for DetachedHardware {}
