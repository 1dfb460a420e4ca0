use crate::sink::{checked_range, OutputSink, Tracker};
use crate::*;
use std::convert::TryFrom;
use std::io::{self, Cursor, Write};

/// Seekable sink collecting the stream in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    buf: Cursor<Vec<u8>>,
    tracker: Tracker,
    closed: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buf.get_ref()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf.into_inner()
    }

    fn open_buf(&mut self) -> Result<&mut Cursor<Vec<u8>>> {
        if self.closed {
            return Err(SinkError::Closed);
        }
        Ok(&mut self.buf)
    }

    // Grow the buffer so `count` bytes fit at the cursor, without panicking
    fn reserve_at_cursor(&mut self, count: usize) -> Result<&mut Cursor<Vec<u8>>> {
        let buf = self.open_buf()?;
        let end = usize::try_from(buf.position())
            .ok()
            .and_then(|pos| pos.checked_add(count))
            .filter(|&end| end <= isize::MAX as usize)
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "write past addressable memory")
            })?;

        let len = buf.get_ref().len();
        if end > len {
            buf.get_mut()
                .try_reserve(end - len)
                .map_err(|e| io::Error::new(io::ErrorKind::OutOfMemory, e.to_string()))?;
        }
        Ok(buf)
    }
}

impl OutputSink for MemorySink {
    fn seek(&mut self, pos: u64) -> Result<u64> {
        self.open_buf()?.set_position(pos);
        self.tracker.moved_to(pos);
        Ok(pos)
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_bytes(&[byte], 0, 1)?;
        Ok(())
    }

    fn write_bytes(&mut self, buf: &[u8], offset: usize, count: usize) -> Result<usize> {
        let data = checked_range(buf, offset, count)?;
        self.reserve_at_cursor(count)?.write_all(data)?;
        self.tracker.advance(count as u64);
        Ok(count)
    }

    fn size(&self) -> u64 {
        self.tracker.size()
    }

    fn can_seek(&self) -> bool {
        true
    }

    fn position(&self) -> u64 {
        self.tracker.pos()
    }

    fn close(&mut self) -> Result<()> {
        self.open_buf()?;
        self.closed = true;
        Ok(())
    }
}
