//! Transport trait for the controller link.
//!
//! The [`Transport`] trait abstracts over the physical link between the
//! controlling software (the GS-232 master) and the emulated rotator. The
//! serve loop in `gs232-server` runs against a `Transport`, so the same code
//! drives a real serial port or the scripted `MockTransport` from
//! `gs232-test-harness`.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Asynchronous byte-level transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send raw bytes to the controller.
    ///
    /// Implementations should not return until all bytes have been handed
    /// to the underlying link.
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive bytes into the provided buffer.
    ///
    /// Returns the number of bytes read. Waits up to `timeout` and returns
    /// [`Error::Timeout`](crate::error::Error::Timeout) if nothing arrives.
    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Close the transport.
    ///
    /// After `close()`, `send()` and `receive()` should return
    /// [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn close(&mut self) -> Result<()>;

    /// Check whether the transport is currently connected.
    fn is_connected(&self) -> bool;
}
