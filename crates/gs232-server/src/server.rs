//! Single-task serve loop for an emulated rotator.
//!
//! One tokio task owns the transport and the [`ProtocolContext`]. It reads
//! bytes, splits them into frames, runs each frame through
//! [`process_frame`], and writes the reply back before handling the next
//! frame. Frames are therefore answered strictly in order.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use gs232_core::error::{Error, Result};
use gs232_core::transport::Transport;
use gs232_protocol::{ProtocolContext, process_frame};

use crate::framer::{DEFAULT_MAX_FRAME_LEN, FrameAccumulator};

/// Configuration for the serve loop.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// How long one `receive()` waits before the loop re-checks cancellation.
    pub poll_interval: Duration,
    /// Largest frame buffered while waiting for a terminator.
    pub max_frame_len: usize,
    /// Size of the receive buffer handed to the transport.
    pub read_buffer_len: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            poll_interval: Duration::from_millis(100),
            max_frame_len: DEFAULT_MAX_FRAME_LEN,
            read_buffer_len: 1024,
        }
    }
}

/// Rotator side of a GS-232 link.
pub struct RotatorServer {
    transport: Box<dyn Transport>,
    context: ProtocolContext,
    config: ServerConfig,
    framer: FrameAccumulator,
}

impl RotatorServer {
    pub fn new(
        transport: Box<dyn Transport>,
        context: ProtocolContext,
        config: ServerConfig,
    ) -> Self {
        let framer = FrameAccumulator::with_max_frame_len(config.max_frame_len);
        RotatorServer {
            transport,
            context,
            config,
            framer,
        }
    }

    /// Read-only view of the protocol state.
    pub fn context(&self) -> &ProtocolContext {
        &self.context
    }

    /// Serve frames until `cancel` fires or the transport fails.
    ///
    /// On cancellation the transport is closed and the final context is
    /// returned. Transport errors other than [`Error::Timeout`] end the loop
    /// and are returned.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<ProtocolContext> {
        info!(variant = %self.context.variant, "rotator server started");
        let mut buf = vec![0u8; self.config.read_buffer_len.max(1)];

        loop {
            let received = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                r = self.transport.receive(&mut buf, self.config.poll_interval) => r,
            };

            match received {
                Ok(n) => {
                    self.framer.extend(&buf[..n]);
                    self.drain_frames().await?;
                }
                Err(Error::Timeout) => {
                    // Transports may time out without suspending; let the
                    // cancellation branch run.
                    tokio::task::yield_now().await;
                }
                Err(e) => {
                    debug!(error = %e, "transport receive failed, stopping");
                    return Err(e);
                }
            }
        }

        if let Err(e) = self.transport.close().await {
            debug!(error = %e, "transport close failed");
        }
        info!("rotator server stopped");
        Ok(self.context)
    }

    /// Run on a new tokio task.
    pub fn spawn(self, cancel: CancellationToken) -> ServerHandle {
        let task = tokio::spawn(self.run(cancel.clone()));
        ServerHandle { cancel, task }
    }

    async fn drain_frames(&mut self) -> Result<()> {
        while let Some(frame) = self.framer.next_frame() {
            let reply = process_frame(&mut self.context, &frame);
            self.transport.send(&reply).await?;
        }
        Ok(())
    }
}

/// Handle to a spawned [`RotatorServer`].
pub struct ServerHandle {
    /// Cancels the serve loop.
    pub cancel: CancellationToken,
    /// Resolves to the loop's result.
    pub task: JoinHandle<Result<ProtocolContext>>,
}

impl ServerHandle {
    /// Stop the loop and wait for it, returning the final context.
    pub async fn shutdown(self) -> Result<ProtocolContext> {
        self.cancel.cancel();
        self.join().await
    }

    /// Wait for the loop to end on its own.
    pub async fn join(self) -> Result<ProtocolContext> {
        self.task
            .await
            .map_err(|e| Error::Transport(format!("server task failed: {e}")))?
    }
}
