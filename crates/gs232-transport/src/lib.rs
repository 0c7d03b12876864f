//! Transport implementations for GS-232 rotator links.
//!
//! - [`SerialTransport`]: USB virtual COM ports, RS-232 adapters, and
//!   pseudo-terminals (for pairing the emulator with local tracking software)
//!
//! # Example
//!
//! ```no_run
//! use gs232_core::transport::Transport;
//! use gs232_transport::SerialTransport;
//! use std::time::Duration;
//!
//! # async fn example() -> gs232_core::Result<()> {
//! let mut transport = SerialTransport::open("/dev/ttyUSB0", 9600).await?;
//!
//! let mut buf = [0u8; 256];
//! let n = transport.receive(&mut buf, Duration::from_secs(1)).await?;
//! transport.send(b"AZ=000\r").await?;
//! # Ok(())
//! # }
//! ```

pub mod serial;

pub use serial::{DataBits, FlowControl, Parity, SerialConfig, SerialTransport, StopBits};
