//! One interactive line read, from prompt to accepted line.
//!
//! Lifecycle: `start` writes the prompt, takes raw mode and saves the
//! cursor; `run` consumes bytes until a terminating key, end of input or an
//! I/O error; `finish` gives cooked mode back on every path and writes the
//! trailing newline only for an accepted line.

use std::io::{self, Read, Write};

use crate::buffer::LineBuffer;
use crate::channel::{RawChannel, RawMode};
use crate::decoder::{Command, Decoder};
use crate::error::{ReadLineError, Result};
use crate::redraw;

/// Completion hook: current line in, suggested replacement out.
pub type Completer = dyn Fn(&str) -> String + Send + Sync;

pub struct EditSession<'a, C: RawChannel + ?Sized, W: Write + ?Sized> {
    tty: RawMode<'a, C>,
    prompt_out: &'a mut W,
    completer: Option<&'a Completer>,
    prompt: &'a str,
    line: LineBuffer,
    decoder: Decoder,
}

impl<'a, C: RawChannel + ?Sized, W: Write + ?Sized> EditSession<'a, C, W> {
    pub fn start(
        channel: &'a mut C,
        prompt_out: &'a mut W,
        completer: Option<&'a Completer>,
        prompt: &'a str,
    ) -> io::Result<Self> {
        prompt_out.write_all(prompt.as_bytes())?;
        prompt_out.flush()?;

        let mut tty = RawMode::acquire(channel)?;
        redraw::save_cursor(&mut *tty)?;
        log::debug!("edit session started");

        Ok(Self {
            tty,
            prompt_out,
            completer,
            prompt,
            line: LineBuffer::new(),
            decoder: Decoder::new(),
        })
    }

    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    /// Consume input until the line is accepted or input stops.
    pub fn run(&mut self) -> Result<String> {
        redraw::redraw_line(&mut *self.tty, &self.line)?;

        let mut byte = [0u8; 1];
        loop {
            if self.tty.read(&mut byte)? == 0 {
                log::debug!("zero-length read");
                return Err(ReadLineError::EndOfInput);
            }

            let Some(command) = self.decoder.feed(byte[0]) else {
                continue;
            };
            if command.is_terminal() {
                return match command {
                    Command::Accept => Ok(self.line.snapshot()),
                    _ => Err(ReadLineError::EndOfInput),
                };
            }
            if self.apply(command)? {
                redraw::redraw_line(&mut *self.tty, &self.line)?;
            }
        }
    }

    /// Apply a non-terminating command. Returns whether the line needs a redraw.
    pub fn apply(&mut self, command: Command) -> io::Result<bool> {
        let changed = match command {
            Command::Insert(byte) => self.line.insert(byte),
            Command::MoveLeft => self.line.move_left(),
            Command::MoveRight => self.line.move_right(),
            Command::MoveToStart => self.line.move_to_start(),
            Command::MoveToEnd => self.line.move_to_end(),
            Command::DeleteBefore => self.line.delete_before(),
            Command::KillToEnd => self.line.kill_to_end(),
            Command::KillWholeLine => self.line.kill_whole_line(),
            Command::Complete => match self.completer {
                Some(complete) => {
                    let suggestion = complete(&self.line.snapshot());
                    self.line.complete(&suggestion)
                }
                None => false,
            },
            Command::ClearScreen => {
                self.clear_screen()?;
                // Clearing also drops whatever was typed
                self.line.kill_whole_line();
                true
            }
            Command::Accept | Command::EndOfInput => false,
        };
        Ok(changed)
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        redraw::clear_screen(&mut *self.tty)?;
        self.prompt_out.write_all(self.prompt.as_bytes())?;
        self.prompt_out.flush()?;
        redraw::save_cursor(&mut *self.tty)
    }

    /// Leave raw mode and settle the outcome of `run`.
    pub fn finish(self, outcome: Result<String>) -> Result<String> {
        let Self {
            tty, prompt_out, ..
        } = self;
        let restored = tty.release();

        match (outcome, restored) {
            (Err(ReadLineError::Io(e)), _) => {
                log::debug!("edit session failed: {}", e);
                Err(ReadLineError::Io(e))
            }
            (_, Err(e)) => Err(ReadLineError::Io(e)),
            (Err(ReadLineError::EndOfInput), Ok(())) => {
                log::debug!("edit session reached end of input");
                Err(ReadLineError::EndOfInput)
            }
            (Ok(line), Ok(())) => {
                if let Err(e) = prompt_out.write_all(b"\n").and_then(|()| prompt_out.flush()) {
                    log::warn!("failed to terminate prompt line: {}", e);
                }
                log::debug!("edit session accepted {} bytes", line.len());
                Ok(line)
            }
        }
    }
}

/// Run one full edit session on `channel`.
pub fn read_line<C, W>(
    channel: &mut C,
    prompt_out: &mut W,
    completer: Option<&Completer>,
    prompt: &str,
) -> Result<String>
where
    C: RawChannel + ?Sized,
    W: Write + ?Sized,
{
    let mut session = EditSession::start(channel, prompt_out, completer, prompt)?;
    let outcome = session.run();
    session.finish(outcome)
}
