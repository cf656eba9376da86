//! In-memory terminal used by the tests.

use std::collections::VecDeque;
use std::io::{self, Read, Write};

use crate::channel::RawChannel;

#[derive(Debug, Default)]
pub struct ScriptedChannel {
    input: VecDeque<u8>,
    pub output: Vec<u8>,
    pub raw_calls: usize,
    pub restore_calls: usize,
    pub is_raw: bool,
    fail_set_raw: bool,
    fail_restore: bool,
    /// Fail the read that would deliver this many bytes in.
    fail_read_after: Option<usize>,
    delivered: usize,
}

impl ScriptedChannel {
    pub fn new(input: &[u8]) -> Self {
        Self {
            input: input.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn fail_set_raw(mut self) -> Self {
        self.fail_set_raw = true;
        self
    }

    pub fn fail_restore(mut self) -> Self {
        self.fail_restore = true;
        self
    }

    pub fn fail_read_after(mut self, bytes: usize) -> Self {
        self.fail_read_after = Some(bytes);
        self
    }
}

impl Read for ScriptedChannel {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.fail_read_after == Some(self.delivered) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device gone"));
        }
        if buf.is_empty() {
            return Ok(0);
        }
        match self.input.pop_front() {
            Some(byte) => {
                buf[0] = byte;
                self.delivered += 1;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

impl Write for ScriptedChannel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl RawChannel for ScriptedChannel {
    fn set_raw(&mut self) -> io::Result<()> {
        self.raw_calls += 1;
        if self.fail_set_raw {
            return Err(io::Error::new(io::ErrorKind::Other, "not a terminal"));
        }
        self.is_raw = true;
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        self.restore_calls += 1;
        if self.fail_restore {
            return Err(io::Error::new(io::ErrorKind::Other, "restore failed"));
        }
        self.is_raw = false;
        Ok(())
    }
}

/// Printable rendering of terminal output.
pub fn visible(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x1b => "<ESC>".to_string(),
            0x20..=0x7e => char::from(b).to_string(),
            _ => format!("<{:#04x}>", b),
        })
        .collect()
}
