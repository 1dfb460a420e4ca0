use failure::Fail;
use std::io;

#[derive(Debug, Fail)]
pub enum SinkError {
    #[fail(display = "IO error: {}", _0)]
    Io(#[cause] io::Error),

    #[fail(display = "sink is closed")]
    Closed,

    #[fail(display = "sink does not support seeking")]
    Unseekable,

    #[fail(
        display = "range {}..{} is outside a buffer of {} bytes",
        offset, end, len
    )]
    InvalidRange { offset: usize, end: usize, len: usize },
}

impl SinkError {
    /// Whether the error came from the output medium rather than from the
    /// caller's arguments.
    pub fn is_io_failure(&self) -> bool {
        match self {
            SinkError::Io(_) | SinkError::Closed | SinkError::Unseekable => true,
            SinkError::InvalidRange { .. } => false,
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(err: io::Error) -> SinkError {
        SinkError::Io(err)
    }
}

impl From<SinkError> for io::Error {
    fn from(err: SinkError) -> io::Error {
        let kind = match err {
            SinkError::Io(e) => return e,
            SinkError::Closed => io::ErrorKind::BrokenPipe,
            SinkError::Unseekable => io::ErrorKind::Other,
            SinkError::InvalidRange { .. } => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SinkError>;
