//! Serve loop for an emulated GS-232 rotator.
//!
//! # Architecture
//!
//! - [`framer`] -- splits the incoming byte stream into `\r` frames
//! - [`server`] -- the single task that owns the transport and the protocol
//!   context, answering frames one at a time

pub mod framer;
pub mod server;

pub use framer::FrameAccumulator;
pub use server::{RotatorServer, ServerConfig, ServerHandle};
