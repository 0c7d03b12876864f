//! Protocol-level value types shared across the GS-232 crates.

use std::fmt;
use std::str::FromStr;

/// Upper bound of the time/step field in timed tracking commands.
pub const MAX_STEP: u16 = 999;

/// Upper bound of elevation in degrees, independent of the angle mode.
pub const MAX_ELEVATION: u16 = 180;

/// GS-232 command/reply vocabulary.
///
/// Variant B adds the `P36`/`P45` mode commands, the `Z` center toggle and
/// the `H3` help page, and replies with `AZ=`/`EL=` prefixes instead of `+0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolVariant {
    /// GS-232A.
    #[default]
    A,
    /// GS-232B.
    B,
}

impl ProtocolVariant {
    /// Whether this is the B vocabulary.
    pub fn is_b(&self) -> bool {
        matches!(self, ProtocolVariant::B)
    }
}

impl fmt::Display for ProtocolVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolVariant::A => write!(f, "GS-232A"),
            ProtocolVariant::B => write!(f, "GS-232B"),
        }
    }
}

/// Error returned when a string cannot be parsed into a [`ProtocolVariant`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVariantError(String);

impl fmt::Display for ParseVariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown protocol variant: {}", self.0)
    }
}

impl std::error::Error for ParseVariantError {}

impl FromStr for ProtocolVariant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" | "GS-232A" | "GS232A" => Ok(ProtocolVariant::A),
            "B" | "GS-232B" | "GS232B" => Ok(ProtocolVariant::B),
            _ => Err(ParseVariantError(s.to_string())),
        }
    }
}

/// Azimuth wrap convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AngleMode {
    /// Azimuth wraps at due north; 0..=360.
    #[default]
    Mode360,
    /// Overlap tracking past north; 0..=450.
    Mode450,
}

impl AngleMode {
    /// Largest azimuth accepted in this mode.
    pub fn max_azimuth(&self) -> u16 {
        match self {
            AngleMode::Mode360 => 360,
            AngleMode::Mode450 => 450,
        }
    }

    /// Two-digit label used by the `H3` help page (`"36"` or `"45"`).
    pub fn label(&self) -> &'static str {
        match self {
            AngleMode::Mode360 => "36",
            AngleMode::Mode450 => "45",
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} degree", self.max_azimuth())
    }
}

/// Which compass direction is the zero-crossing reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CenterReference {
    #[default]
    North,
    South,
}

impl CenterReference {
    /// The opposite reference.
    pub fn toggled(&self) -> Self {
        match self {
            CenterReference::North => CenterReference::South,
            CenterReference::South => CenterReference::North,
        }
    }

    /// Single-letter form used by the `H3` help page.
    pub fn letter(&self) -> char {
        match self {
            CenterReference::North => 'N',
            CenterReference::South => 'S',
        }
    }
}

impl fmt::Display for CenterReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CenterReference::North => write!(f, "North"),
            CenterReference::South => write!(f, "South"),
        }
    }
}

/// Rotation speed selected by `X1`..`X4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum RotationSpeed {
    /// `X1`.
    #[default]
    Low,
    /// `X2`.
    Middle1,
    /// `X3`.
    Middle2,
    /// `X4`.
    High,
}

impl RotationSpeed {
    /// Map the digit following `X` to a speed.
    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            b'1' => Some(RotationSpeed::Low),
            b'2' => Some(RotationSpeed::Middle1),
            b'3' => Some(RotationSpeed::Middle2),
            b'4' => Some(RotationSpeed::High),
            _ => None,
        }
    }

    /// Numeric level, 1 through 4.
    pub fn level(&self) -> u8 {
        match self {
            RotationSpeed::Low => 1,
            RotationSpeed::Middle1 => 2,
            RotationSpeed::Middle2 => 3,
            RotationSpeed::High => 4,
        }
    }
}

impl fmt::Display for RotationSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RotationSpeed::Low => "Low",
            RotationSpeed::Middle1 => "Middle 1",
            RotationSpeed::Middle2 => "Middle 2",
            RotationSpeed::High => "High",
        };
        write!(f, "{s}")
    }
}
