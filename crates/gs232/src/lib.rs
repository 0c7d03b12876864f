//! # gs232 -- Yaesu GS-232 A/B rotator protocol
//!
//! `gs232` implements the rotator side of the GS-232 serial command
//! language used by satellite and contest tracking software to steer
//! azimuth/elevation antenna rotators.
//!
//! ## Quick Start
//!
//! ```
//! use gs232::{ProtocolContext, ProtocolVariant, process_frame};
//!
//! let mut ctx = ProtocolContext::new(ProtocolVariant::B);
//! assert_eq!(process_frame(&mut ctx, b"P45\r"), b"\r");
//! assert_eq!(process_frame(&mut ctx, b"M420\r"), b"\r");
//! assert_eq!(process_frame(&mut ctx, b"N\r"), b"=0001=0001\r\n");
//! ```
//!
//! ## Architecture
//!
//! | Crate                | Purpose                                           |
//! |----------------------|---------------------------------------------------|
//! | `gs232-core`         | Errors, [`Transport`], [`RotatorHardware`], enums |
//! | `gs232-protocol`     | Parser, value extractor/validator, replies        |
//! | `gs232-server`       | Frame accumulator and serve loop                  |
//! | `gs232-transport`    | Serial port transport                             |
//! | **`gs232`**          | This facade crate                                 |
//!
//! ## Feature Flags
//!
//! | Feature  | Enables                              | Default |
//! |----------|--------------------------------------|---------|
//! | `server` | [`server`] module (serve loop)       | yes     |
//! | `serial` | [`transport`] module (tokio-serial)  | yes     |

pub use gs232_core::*;
pub use gs232_protocol::{
    Command, MEMORY_CAPACITY, ProtocolContext, Rejection, ValueShape, WaypointMemory, actuate,
    build_response, parse, process_frame, try_parse,
};

/// Protocol engine modules (framing, values, commands, replies).
pub mod protocol {
    pub use gs232_protocol::*;
}

/// Serve loop running a [`ProtocolContext`] over a [`Transport`].
#[cfg(feature = "server")]
pub mod server {
    pub use gs232_server::*;
}

/// Serial transport.
#[cfg(feature = "serial")]
pub mod transport {
    pub use gs232_transport::*;
}
