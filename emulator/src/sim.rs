//! Simulated rotator hardware for the emulator.

use gs232::{Error, Result, RotatorHardware};
use tracing::info;

/// A rotator that reaches every commanded position instantly.
#[derive(Debug, Clone, Default)]
pub struct SimulatedRotator {
    azimuth: u16,
    elevation: u16,
    azimuth_offset_calibrated: bool,
    elevation_offset_calibrated: bool,
}

#[cfg(test)]
impl SimulatedRotator {
    pub fn new(azimuth: u16, elevation: u16) -> Self {
        SimulatedRotator {
            azimuth,
            elevation,
            ..Default::default()
        }
    }
}

impl RotatorHardware for SimulatedRotator {
    fn azimuth(&mut self) -> Result<u16> {
        Ok(self.azimuth)
    }

    fn set_azimuth(&mut self, azimuth: u16) -> Result<()> {
        info!(from = self.azimuth, to = azimuth, "simulated azimuth move");
        self.azimuth = azimuth;
        Ok(())
    }

    fn elevation(&mut self) -> Result<u16> {
        Ok(self.elevation)
    }

    fn set_elevation(&mut self, elevation: u16) -> Result<()> {
        info!(from = self.elevation, to = elevation, "simulated elevation move");
        self.elevation = elevation;
        Ok(())
    }

    fn calibrate_offset_azimuth(&mut self) -> Result<()> {
        self.azimuth = 0;
        self.azimuth_offset_calibrated = true;
        Ok(())
    }

    fn calibrate_offset_elevation(&mut self) -> Result<()> {
        self.elevation = 0;
        self.elevation_offset_calibrated = true;
        Ok(())
    }

    fn calibrate_full_scale_azimuth(&mut self) -> Result<()> {
        if !self.azimuth_offset_calibrated {
            return Err(Error::Hardware(
                "azimuth full scale needs offset calibration first".into(),
            ));
        }
        Ok(())
    }

    fn calibrate_full_scale_elevation(&mut self) -> Result<()> {
        if !self.elevation_offset_calibrated {
            return Err(Error::Hardware(
                "elevation full scale needs offset calibration first".into(),
            ));
        }
        Ok(())
    }
}
