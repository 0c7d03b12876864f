//! Scripted mock transport for deterministic serve-loop tests.
//!
//! [`MockTransport`] hands out pre-loaded inbound chunks one `receive()` at a
//! time, the way bytes trickle in from a serial port, and records every
//! `send()` in a [`SentLog`] that stays readable after the transport has been
//! moved into a server.
//!
//! # Example
//!
//! ```
//! use gs232_test_harness::MockTransport;
//!
//! let mut mock = MockTransport::new();
//! mock.push_inbound(b"C2\r");
//! mock.push_inbound(b"S\r");
//! mock.disconnect_when_drained(true);
//! let sent = mock.sent_log();
//! assert!(sent.is_empty());
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use gs232_core::error::{Error, Result};
use gs232_core::transport::Transport;

/// Shared record of everything sent through a [`MockTransport`].
#[derive(Debug, Clone, Default)]
pub struct SentLog {
    inner: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl SentLog {
    fn record(&self, data: &[u8]) {
        if let Ok(mut log) = self.inner.lock() {
            log.push(data.to_vec());
        }
    }

    /// Each element is the byte slice from one `send()` call.
    pub fn entries(&self) -> Vec<Vec<u8>> {
        self.inner.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// All sent bytes concatenated.
    pub fn concatenated(&self) -> Vec<u8> {
        self.entries().concat()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|log| log.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A mock [`Transport`] driven by a script of inbound chunks.
///
/// Once the script is exhausted, `receive()` waits for the requested timeout
/// and returns [`Error::Timeout`], or
/// [`Error::ConnectionLost`] if [`disconnect_when_drained`](Self::disconnect_when_drained)
/// was enabled.
#[derive(Debug)]
pub struct MockTransport {
    /// Chunks returned by successive `receive()` calls.
    inbound: VecDeque<Vec<u8>>,
    /// Whether the transport is "connected".
    connected: bool,
    /// Report a lost connection once `inbound` is empty.
    disconnect_when_drained: bool,
    sent: SentLog,
}

impl MockTransport {
    /// Create a new mock transport in the connected state.
    pub fn new() -> Self {
        MockTransport {
            inbound: VecDeque::new(),
            connected: true,
            disconnect_when_drained: false,
            sent: SentLog::default(),
        }
    }

    /// Queue a chunk for a future `receive()` call.
    pub fn push_inbound(&mut self, chunk: &[u8]) {
        self.inbound.push_back(chunk.to_vec());
    }

    /// Report [`Error::ConnectionLost`] instead of timing out once drained.
    pub fn disconnect_when_drained(&mut self, enable: bool) {
        self.disconnect_when_drained = enable;
    }

    /// Handle to the record of sent data.
    pub fn sent_log(&self) -> SentLog {
        self.sent.clone()
    }

    /// Number of inbound chunks not yet delivered.
    pub fn remaining_inbound(&self) -> usize {
        self.inbound.len()
    }

    /// When set to `false`, `send()` and `receive()` return [`Error::NotConnected`].
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        self.sent.record(data);
        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        if !self.connected {
            return Err(Error::NotConnected);
        }

        let Some(mut chunk) = self.inbound.pop_front() else {
            if self.disconnect_when_drained {
                return Err(Error::ConnectionLost);
            }
            // Nothing will ever arrive; wait out the timeout like a real port.
            tokio::time::sleep(timeout).await;
            return Err(Error::Timeout);
        };

        let n = chunk.len().min(buf.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            // Deliver the rest on the next call.
            self.inbound.push_front(chunk.split_off(n));
        }
        Ok(n)
    }

    async fn close(&mut self) -> Result<()> {
        self.connected = false;
        self.inbound.clear();
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(10);

    #[tokio::test]
    async fn delivers_chunks_in_order() {
        let mut mock = MockTransport::new();
        mock.push_inbound(b"C");
        mock.push_inbound(b"2\r");

        let mut buf = [0u8; 16];
        let n = mock.receive(&mut buf, TICK).await.unwrap();
        assert_eq!(&buf[..n], b"C");
        let n = mock.receive(&mut buf, TICK).await.unwrap();
        assert_eq!(&buf[..n], b"2\r");
        assert_eq!(mock.remaining_inbound(), 0);
    }

    #[tokio::test]
    async fn splits_chunks_larger_than_buffer() {
        let mut mock = MockTransport::new();
        mock.push_inbound(b"M010 020\r");

        let mut buf = [0u8; 4];
        let n = mock.receive(&mut buf, TICK).await.unwrap();
        assert_eq!(&buf[..n], b"M010");
        let n = mock.receive(&mut buf, TICK).await.unwrap();
        assert_eq!(&buf[..n], b" 020");
        let n = mock.receive(&mut buf, TICK).await.unwrap();
        assert_eq!(&buf[..n], b"\r");
    }

    #[tokio::test]
    async fn drained_script_times_out() {
        let mut mock = MockTransport::new();
        let mut buf = [0u8; 4];
        assert!(matches!(
            mock.receive(&mut buf, TICK).await,
            Err(Error::Timeout)
        ));
    }

    #[tokio::test]
    async fn drained_script_waits_out_the_timeout() {
        let mut mock = MockTransport::new();
        let mut buf = [0u8; 4];
        let start = tokio::time::Instant::now();
        let timeout = Duration::from_millis(20);

        assert!(matches!(
            mock.receive(&mut buf, timeout).await,
            Err(Error::Timeout)
        ));
        assert!(start.elapsed() >= timeout);
    }

    #[tokio::test]
    async fn drained_script_can_disconnect() {
        let mut mock = MockTransport::new();
        mock.disconnect_when_drained(true);
        let mut buf = [0u8; 4];
        assert!(matches!(
            mock.receive(&mut buf, TICK).await,
            Err(Error::ConnectionLost)
        ));
    }

    #[tokio::test]
    async fn records_sent_data_through_shared_log() {
        let mut mock = MockTransport::new();
        let log = mock.sent_log();

        mock.send(b"+0000\r").await.unwrap();
        mock.send(b"\r").await.unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0], b"+0000\r");
        assert_eq!(log.concatenated(), b"+0000\r\r");
    }

    #[tokio::test]
    async fn close_disconnects() {
        let mut mock = MockTransport::new();
        mock.push_inbound(b"S\r");
        mock.close().await.unwrap();

        assert!(!mock.is_connected());
        assert!(matches!(mock.send(b"\r").await, Err(Error::NotConnected)));
        let mut buf = [0u8; 4];
        assert!(matches!(
            mock.receive(&mut buf, TICK).await,
            Err(Error::NotConnected)
        ));
    }
}
