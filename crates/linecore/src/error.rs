use std::io;

use thiserror::Error;

/// Ways a line read can end without an accepted line.
#[derive(Error, Debug)]
pub enum ReadLineError {
    /// `^D` was typed or the device returned a zero-length read.
    #[error("end of input")]
    EndOfInput,

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ReadLineError {
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, ReadLineError::EndOfInput)
    }
}

pub type Result<T> = std::result::Result<T, ReadLineError>;
