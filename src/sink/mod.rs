mod file_sink;
mod memory_sink;
mod stream_sink;

pub use file_sink::*;
pub use memory_sink::*;
pub use stream_sink::*;

use crate::*;

/// Output target of an encoder.
///
/// Writes are sequential at `position()`. `size()` is the furthest byte ever
/// written, which stays put when a seek moves the cursor backward to patch
/// an earlier header.
pub trait OutputSink {
    /// Move the write cursor to `pos` and return the new position. `size()` is unchanged.
    fn seek(&mut self, pos: u64) -> Result<u64>;

    /// Write one byte at the cursor.
    fn write_byte(&mut self, byte: u8) -> Result<()>;

    /// Write `buf[offset..offset + count]` at the cursor and return `count`.
    ///
    /// Either every byte is written or the call fails with the counters untouched.
    fn write_bytes(&mut self, buf: &[u8], offset: usize, count: usize) -> Result<usize>;

    /// Furthest byte ever written.
    fn size(&self) -> u64;

    /// Whether `seek` can move the cursor anywhere other than where it is.
    fn can_seek(&self) -> bool;

    fn position(&self) -> u64;

    /// Release the underlying handle. Every later operation fails with `SinkError::Closed`.
    fn close(&mut self) -> Result<()>;
}

/// Write cursor and high-water mark shared by every sink.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Tracker {
    pos: u64,
    size: u64,
}

impl Tracker {
    pub fn at(pos: u64) -> Self {
        Self { pos, size: 0 }
    }

    pub fn pos(&self) -> u64 {
        self.pos
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Record `len` bytes written at the cursor.
    pub fn advance(&mut self, len: u64) {
        self.pos += len;
        if self.pos > self.size {
            self.size = self.pos;
        }
    }

    pub fn moved_to(&mut self, pos: u64) {
        self.pos = pos;
    }
}

pub(crate) fn checked_range(buf: &[u8], offset: usize, count: usize) -> Result<&[u8]> {
    offset
        .checked_add(count)
        .and_then(|end| buf.get(offset..end))
        .ok_or(SinkError::InvalidRange {
            offset,
            end: offset.saturating_add(count),
            len: buf.len(),
        })
}
