//! Yaesu GS-232 A/B rotator protocol engine.
//!
//! GS-232 is a fixed-width ASCII command language between a controller and
//! an antenna rotator. This crate implements the rotator side:
//!
//! - **Framing** ([`protocol`]) -- carriage-return terminated frames, with
//!   line-feed tolerance.
//! - **Payload values** ([`values`]) -- 3-digit field extraction and
//!   mode-dependent range validation for `M`/`W`.
//! - **Parser** ([`commands`]) -- frame to [`Command`], applying speed,
//!   angle-mode and center side effects.
//! - **Replies** ([`response`]) -- exact reply bytes per command and variant.
//! - **Engine** ([`engine`]) -- parse, actuate attached hardware, reply.
//! - **State** ([`context`], [`memory`]) -- per-link protocol context and
//!   capacity-bounded waypoint memory.
//!
//! Every frame yields exactly one command and every command exactly one
//! reply. All rejections are answered with `?>\r`.
//!
//! # Example
//!
//! ```
//! use gs232_protocol::{Command, ProtocolContext, build_response, parse};
//! use gs232_protocol::ProtocolVariant;
//!
//! let mut ctx = ProtocolContext::new(ProtocolVariant::B);
//!
//! let cmd = parse(&mut ctx, b"P45\r");
//! assert_eq!(cmd, Command::AzimuthMode450);
//! assert_eq!(build_response(&ctx, cmd), b"\r");
//!
//! let cmd = parse(&mut ctx, b"C2\r");
//! assert_eq!(build_response(&ctx, cmd), b"AZ=000EL=000\r\n");
//! ```

pub mod commands;
pub mod context;
pub mod engine;
pub mod error;
pub mod memory;
pub mod protocol;
pub mod response;
pub mod values;

pub use commands::{Command, parse, try_parse};
pub use context::ProtocolContext;
pub use engine::{actuate, process_frame};
pub use error::Rejection;
pub use memory::{CapacityExceeded, MEMORY_CAPACITY, WaypointMemory};
pub use response::build_response;
pub use values::{ValueShape, extract_values, validate};

pub use gs232_core::types::{AngleMode, CenterReference, ProtocolVariant, RotationSpeed};
