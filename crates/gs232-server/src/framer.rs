//! Frame accumulation from a byte stream.
//!
//! Serial reads split and merge frames arbitrarily. [`FrameAccumulator`]
//! buffers incoming bytes and yields one complete carriage-return frame at a
//! time, ready for the parser.

use bytes::{Buf, BytesMut};
use gs232_protocol::protocol::{LINE_FEED, TERMINATOR};
use tracing::warn;

/// Largest frame kept while waiting for a terminator.
///
/// Large enough for a full waypoint memory upload (3800 fields of 4 bytes).
pub const DEFAULT_MAX_FRAME_LEN: usize = 32 * 1024;

/// Buffers stream bytes and splits them into frames.
#[derive(Debug)]
pub struct FrameAccumulator {
    buf: BytesMut,
    max_frame_len: usize,
}

impl FrameAccumulator {
    pub fn new() -> Self {
        Self::with_max_frame_len(DEFAULT_MAX_FRAME_LEN)
    }

    pub fn with_max_frame_len(max_frame_len: usize) -> Self {
        FrameAccumulator {
            buf: BytesMut::with_capacity(256),
            max_frame_len,
        }
    }

    /// Append received bytes.
    ///
    /// If the buffer grows past the maximum frame length without holding a
    /// terminator, it is discarded.
    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);

        if self.buf.len() > self.max_frame_len && !self.buf.contains(&TERMINATOR) {
            warn!(
                buffered = self.buf.len(),
                max = self.max_frame_len,
                "frame buffer overflow without terminator, clearing"
            );
            self.buf.clear();
        }
    }

    /// Take the next complete frame, if any.
    ///
    /// The frame includes its `\r`, plus a `\n` if one directly follows.
    /// Line feeds at the start of a frame (left over from a `\r\n` pair split
    /// across reads) are dropped.
    pub fn next_frame(&mut self) -> Option<Vec<u8>> {
        let leading = self.buf.iter().take_while(|&&b| b == LINE_FEED).count();
        self.buf.advance(leading);

        let term = self.buf.iter().position(|&b| b == TERMINATOR)?;
        let mut end = term + 1;
        if self.buf.get(end) == Some(&LINE_FEED) {
            end += 1;
        }
        Some(self.buf.split_to(end).to_vec())
    }

    /// Number of bytes waiting for a terminator.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl Default for FrameAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
