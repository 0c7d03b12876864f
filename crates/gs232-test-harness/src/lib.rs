//! gs232-test-harness: Mock transports for testing GS-232 protocol engines.
//!
//! [`MockTransport`] plays the controller side of a rotator link: it feeds
//! scripted inbound chunks to the serve loop and records every reply.

pub mod mock_serial;

pub use mock_serial::{MockTransport, SentLog};
