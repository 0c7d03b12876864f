//! Per-link protocol state.

use std::fmt;

use gs232_core::hardware::{DetachedHardware, RotatorHardware};
use gs232_core::types::{AngleMode, CenterReference, ProtocolVariant, RotationSpeed};

use crate::memory::WaypointMemory;

/// Mutable state threaded through parsing and reply building.
///
/// One context belongs to one rotator link. It has no internal locking;
/// callers that share a rotator between connections must serialize access.
///
/// The protocol variant is chosen when the context is created. No GS-232
/// command switches it.
pub struct ProtocolContext {
    /// Command/reply vocabulary in use on this link.
    pub variant: ProtocolVariant,
    /// Azimuth wrap convention, switched by `P36`/`P45`.
    pub angle_mode: AngleMode,
    /// Zero-crossing reference, toggled by `Z`.
    pub center: CenterReference,
    /// Last speed selected with `X1`..`X4`.
    pub rotation_speed: RotationSpeed,
    /// Current azimuth in degrees.
    pub azimuth: u16,
    /// Current elevation in degrees.
    pub elevation: u16,
    /// Values programmed by the last accepted `M`/`W` command.
    pub memory: WaypointMemory,
    /// Index of the selected memorized point, reported by `N`.
    pub current_point: u16,
    hardware: Box<dyn RotatorHardware>,
}

impl ProtocolContext {
    /// Create a context with default state and no hardware attached.
    pub fn new(variant: ProtocolVariant) -> Self {
        Self::with_hardware(variant, Box::new(DetachedHardware))
    }

    /// Create a context driving the given hardware.
    pub fn with_hardware(variant: ProtocolVariant, hardware: Box<dyn RotatorHardware>) -> Self {
        ProtocolContext {
            variant,
            angle_mode: AngleMode::default(),
            center: CenterReference::default(),
            rotation_speed: RotationSpeed::default(),
            azimuth: 0,
            elevation: 0,
            memory: WaypointMemory::new(),
            current_point: 0,
            hardware,
        }
    }

    /// Number of valid entries in the waypoint memory.
    pub fn memory_count(&self) -> usize {
        self.memory.len()
    }

    /// Swap in different hardware, returning the previous one.
    pub fn replace_hardware(
        &mut self,
        hardware: Box<dyn RotatorHardware>,
    ) -> Box<dyn RotatorHardware> {
        std::mem::replace(&mut self.hardware, hardware)
    }

    pub(crate) fn hardware_mut(&mut self) -> &mut dyn RotatorHardware {
        self.hardware.as_mut()
    }

    /// Return all session state to its defaults.
    ///
    /// The protocol variant and the attached hardware are kept.
    pub fn reset(&mut self) {
        self.angle_mode = AngleMode::default();
        self.center = CenterReference::default();
        self.rotation_speed = RotationSpeed::default();
        self.azimuth = 0;
        self.elevation = 0;
        self.memory.clear();
        self.current_point = 0;
    }
}

impl Default for ProtocolContext {
    fn default() -> Self {
        Self::new(ProtocolVariant::default())
    }
}

impl fmt::Debug for ProtocolContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProtocolContext")
            .field("variant", &self.variant)
            .field("angle_mode", &self.angle_mode)
            .field("center", &self.center)
            .field("rotation_speed", &self.rotation_speed)
            .field("azimuth", &self.azimuth)
            .field("elevation", &self.elevation)
            .field("memory_count", &self.memory.len())
            .field("current_point", &self.current_point)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_state() {
        let ctx = ProtocolContext::default();
        assert_eq!(ctx.variant, ProtocolVariant::A);
        assert_eq!(ctx.angle_mode, AngleMode::Mode360);
        assert_eq!(ctx.center, CenterReference::North);
        assert_eq!(ctx.rotation_speed.level(), 1);
        assert_eq!(ctx.azimuth, 0);
        assert_eq!(ctx.elevation, 0);
        assert_eq!(ctx.memory_count(), 0);
        assert_eq!(ctx.current_point, 0);
    }

    #[test]
    fn reset_keeps_variant() {
        let mut ctx = ProtocolContext::new(ProtocolVariant::B);
        ctx.angle_mode = AngleMode::Mode450;
        ctx.center = CenterReference::South;
        ctx.rotation_speed = RotationSpeed::High;
        ctx.azimuth = 270;
        ctx.elevation = 45;
        ctx.memory = WaypointMemory::from_values(&[1, 2, 3]).unwrap();

        ctx.reset();

        assert_eq!(ctx.variant, ProtocolVariant::B);
        assert_eq!(ctx.angle_mode, AngleMode::Mode360);
        assert_eq!(ctx.center, CenterReference::North);
        assert_eq!(ctx.rotation_speed, RotationSpeed::Low);
        assert_eq!(ctx.azimuth, 0);
        assert_eq!(ctx.memory_count(), 0);
    }

    #[test]
    fn debug_omits_hardware() {
        let ctx = ProtocolContext::new(ProtocolVariant::B);
        let dbg = format!("{ctx:?}");
        assert!(dbg.contains("variant: B"));
        assert!(dbg.contains("memory_count: 0"));
        assert!(!dbg.contains("hardware"));
    }
}
