//! Byte sinks for an audio encoder: sequential writes, optional seeking, and
//! tracking of the write cursor and the furthest byte written.

mod error;
mod options;
mod sink;

pub use error::*;
pub use options::*;
pub use sink::*;

extern crate failure;
