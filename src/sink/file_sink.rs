use crate::sink::{checked_range, OutputSink, Tracker};
use crate::*;
use log::{debug, trace, warn};
use std::fs::File;
use std::io::{self, Seek, SeekFrom, Write};
use std::path::Path;

/// Sink writing to a file on disk.
///
/// The file is released by `close()`. Dropping an open sink also releases
/// it, but any error from the final flush is lost.
#[derive(Debug)]
pub struct FileSink {
    file: Option<File>,
    tracker: Tracker,
    options: SinkOptions,
}

impl FileSink {
    /// Create the file at `path`, truncating it if it exists.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::create_with(path, &SinkOptions::default())
    }

    pub fn create_with(path: impl AsRef<Path>, options: &SinkOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = options.open_options().open(path)?;
        debug!("opened sink at {}", path.display());

        Ok(Self {
            file: Some(file),
            tracker: Tracker::default(),
            options: options.clone(),
        })
    }

    /// Adopt an already open file. Writing starts at the file's current
    /// offset; bytes written before adoption don't count toward `size()`.
    pub fn from_file(file: File) -> Result<Self> {
        Self::from_file_with(file, &SinkOptions::default())
    }

    pub fn from_file_with(mut file: File, options: &SinkOptions) -> Result<Self> {
        let pos = file.seek(SeekFrom::Current(0))?;
        debug!("adopted file at offset {}", pos);

        Ok(Self {
            file: Some(file),
            tracker: Tracker::at(pos),
            options: options.clone(),
        })
    }

    pub fn options(&self) -> &SinkOptions {
        &self.options
    }

    pub fn is_closed(&self) -> bool {
        self.file.is_none()
    }

    /// Flush written data all the way to the storage device.
    pub fn sync(&mut self) -> Result<()> {
        self.file()?.sync_all()?;
        Ok(())
    }

    fn file(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or(SinkError::Closed)
    }

    fn write_tracked(&mut self, data: &[u8]) -> Result<()> {
        let pos = self.tracker.pos();
        let file = self.file()?;

        if let Err(e) = file.write_all(data) {
            warn!("write of {} bytes at {} failed: {}", data.len(), pos, e);
            // part of `data` may have landed, put the cursor back where the counters are
            if let Err(restore) = file.seek(SeekFrom::Start(pos)) {
                warn!("could not restore cursor to {}: {}", pos, restore);
            }
            return Err(e.into());
        }

        self.tracker.advance(data.len() as u64);
        Ok(())
    }
}

impl OutputSink for FileSink {
    fn seek(&mut self, pos: u64) -> Result<u64> {
        let pos = self.file()?.seek(SeekFrom::Start(pos))?;
        trace!("seek to {}", pos);
        self.tracker.moved_to(pos);
        Ok(pos)
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write_tracked(&[byte])
    }

    fn write_bytes(&mut self, buf: &[u8], offset: usize, count: usize) -> Result<usize> {
        let data = checked_range(buf, offset, count)?;
        self.write_tracked(data)?;
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
        let mut file = self.file.take().ok_or(SinkError::Closed)?;
        file.flush()?;
        if self.options.sync_on_close {
            file.sync_all()?;
        }
        debug!("closed sink, {} bytes written", self.tracker.size());
        Ok(())
    }
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_tracked(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file()?.flush()
    }
}

// `SeekFrom::End` is relative to `size()`, not to the file length.
impl Seek for FileSink {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(pos) => Some(pos),
            SeekFrom::Current(delta) => offset_by(self.tracker.pos(), delta),
            SeekFrom::End(delta) => offset_by(self.tracker.size(), delta),
        };
        let target = target.ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "seek before start of sink")
        })?;
        Ok(OutputSink::seek(self, target)?)
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if self.file.is_some() {
            debug!("sink dropped without close");
        }
    }
}

fn offset_by(base: u64, delta: i64) -> Option<u64> {
    if delta >= 0 {
        base.checked_add(delta as u64)
    } else {
        base.checked_sub(delta.unsigned_abs())
    }
}
