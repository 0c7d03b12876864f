//! gs232-core: Core traits, types, and error definitions for the GS-232
//! rotator protocol.
//!
//! # Key types
//!
//! - [`Transport`] -- byte-level link to the controlling software
//! - [`RotatorHardware`] -- injectable motion and calibration capabilities
//! - [`ProtocolVariant`], [`AngleMode`], [`CenterReference`], [`RotationSpeed`]
//! - [`Error`] / [`Result`] -- error handling

pub mod error;
pub mod hardware;
pub mod transport;
pub mod types;

pub use error::{Error, Result};
pub use hardware::{DetachedHardware, RotatorHardware};
pub use transport::Transport;
pub use types::*;
