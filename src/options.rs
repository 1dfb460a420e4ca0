use std::fs::OpenOptions;

/// How a [`FileSink`](crate::FileSink) opens and releases its file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkOptions {
    /// Refuse to open a path that already exists instead of truncating it.
    pub create_new: bool,

    /// Force written data to disk on `close()` so deferred write errors are reported.
    pub sync_on_close: bool,
}

impl Default for SinkOptions {
    fn default() -> Self {
        Self {
            create_new: false,
            sync_on_close: true,
        }
    }
}

impl SinkOptions {
    pub(crate) fn open_options(&self) -> OpenOptions {
        let mut open = OpenOptions::new();
        open.write(true);
        if self.create_new {
            open.create_new(true);
        } else {
            open.create(true).truncate(true);
        }
        open
    }
}
