use crate::sink::{checked_range, OutputSink, Tracker};
use crate::*;
use log::debug;
use std::io::Write;

/// Forward-only sink over a pipe, socket or any other writer.
///
/// Encoders check `can_seek()` and skip rewriting headers when it is false.
#[derive(Debug)]
pub struct StreamSink<W: Write> {
    inner: Option<W>,
    tracker: Tracker,
}

impl<W: Write> StreamSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner: Some(inner),
            tracker: Tracker::default(),
        }
    }

    pub fn get_ref(&self) -> Option<&W> {
        self.inner.as_ref()
    }

    /// Take the writer back, or `None` once closed.
    pub fn into_inner(self) -> Option<W> {
        self.inner
    }

    fn inner(&mut self) -> Result<&mut W> {
        self.inner.as_mut().ok_or(SinkError::Closed)
    }
}

impl<W: Write> OutputSink for StreamSink<W> {
    fn seek(&mut self, pos: u64) -> Result<u64> {
        self.inner()?;
        if pos == self.tracker.pos() {
            return Ok(pos);
        }
        Err(SinkError::Unseekable)
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.inner()?.write_all(&[byte])?;
        self.tracker.advance(1);
        Ok(())
    }

    fn write_bytes(&mut self, buf: &[u8], offset: usize, count: usize) -> Result<usize> {
        let data = checked_range(buf, offset, count)?;
        self.inner()?.write_all(data)?;
        self.tracker.advance(count as u64);
        Ok(count)
    }

    fn size(&self) -> u64 {
        self.tracker.size()
    }

    fn can_seek(&self) -> bool {
        false
    }

    fn position(&self) -> u64 {
        self.tracker.pos()
    }

    fn close(&mut self) -> Result<()> {
        let mut inner = self.inner.take().ok_or(SinkError::Closed)?;
        inner.flush()?;
        debug!("closed stream sink, {} bytes written", self.tracker.size());
        Ok(())
    }
}
