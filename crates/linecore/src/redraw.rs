//! Terminal redraw protocol.
//!
//! The visible line is anchored at the cursor position saved right after
//! the prompt. A redraw restores that anchor, erases to end of line, writes
//! the whole buffer, and steps back over the part after the cursor. Each
//! frame is assembled in memory and written with a single `write_all` so
//! nothing can land between its pieces.

use std::fmt;
use std::io::{self, Write};

use crossterm::cursor::{RestorePosition, SavePosition};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{queue, Command};

use crate::buffer::LineBuffer;

/// `ESC [ H`: cursor to row 1, column 1.
#[derive(Debug, Clone, Copy)]
pub struct CursorHome;

impl Command for CursorHome {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        f.write_str("\x1b[H")
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        crossterm::cursor::MoveTo(0, 0).execute_winapi()
    }
}

/// `ESC [ <N> D` for any column count.
///
/// crossterm's `MoveLeft` takes a `u16`, which cannot express every line length.
#[derive(Debug, Clone, Copy)]
pub struct CursorBack(pub usize);

impl Command for CursorBack {
    fn write_ansi(&self, f: &mut impl fmt::Write) -> fmt::Result {
        if self.0 == 0 {
            return Ok(());
        }
        write!(f, "\x1b[{}D", self.0)
    }

    #[cfg(windows)]
    fn execute_winapi(&self) -> io::Result<()> {
        let columns = u16::try_from(self.0).unwrap_or(u16::MAX);
        crossterm::cursor::MoveLeft(columns).execute_winapi()
    }
}

/// Bytes that bring the visible line in sync with `line`.
pub fn line_frame(line: &LineBuffer) -> io::Result<Vec<u8>> {
    let mut frame = Vec::with_capacity(line.len() + 16);
    queue!(frame, RestorePosition, Clear(ClearType::UntilNewLine))?;
    frame.extend_from_slice(line.as_bytes());
    let behind = line.tail_len();
    if behind > 0 {
        queue!(frame, CursorBack(behind))?;
    }
    Ok(frame)
}

pub fn redraw_line<W: Write + ?Sized>(out: &mut W, line: &LineBuffer) -> io::Result<()> {
    let frame = line_frame(line)?;
    out.write_all(&frame)?;
    out.flush()
}

pub fn save_cursor<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    let mut frame = Vec::with_capacity(2);
    queue!(frame, SavePosition)?;
    out.write_all(&frame)?;
    out.flush()
}

pub fn clear_screen<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    let mut frame = Vec::with_capacity(8);
    queue!(frame, Clear(ClearType::All), CursorHome)?;
    out.write_all(&frame)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testlib::visible;
    use insta::assert_snapshot;

    fn line(text: &str, cursor: usize) -> LineBuffer {
        let mut buffer = LineBuffer::new();
        for b in text.bytes() {
            buffer.insert(b);
        }
        buffer.move_to_start();
        for _ in 0..cursor {
            buffer.move_right();
        }
        buffer
    }

    #[test]
    fn test_frame_cursor_at_end() {
        let frame = line_frame(&line("hello", 5)).unwrap();
        assert_eq!(frame, b"\x1b8\x1b[Khello".to_vec());
    }

    #[test]
    fn test_frame_cursor_inside() {
        let frame = line_frame(&line("axbc", 2)).unwrap();
        assert_eq!(frame, b"\x1b8\x1b[Kaxbc\x1b[2D".to_vec());
        assert_snapshot!(visible(&frame), @"<ESC>8<ESC>[Kaxbc<ESC>[2D");
    }

    #[test]
    fn test_frame_empty_line() {
        let frame = line_frame(&LineBuffer::new()).unwrap();
        assert_snapshot!(visible(&frame), @"<ESC>8<ESC>[K");
    }

    #[test]
    fn test_frame_multi_digit_move() {
        let frame = line_frame(&line("0123456789abc", 0)).unwrap();
        assert!(frame.ends_with(b"\x1b[13D"));
    }

    #[test]
    fn test_frame_move_beyond_u16_columns() {
        let text = "x".repeat(70_000);
        let frame = line_frame(&line(&text, 0)).unwrap();
        assert!(frame.ends_with(b"\x1b[70000D"));
    }

    #[test]
    fn test_cursor_back_zero_writes_nothing() {
        let mut frame = Vec::new();
        queue!(frame, CursorBack(0)).unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_save_and_clear() {
        let mut out = Vec::new();
        save_cursor(&mut out).unwrap();
        clear_screen(&mut out).unwrap();
        assert_eq!(out, b"\x1b7\x1b[2J\x1b[H".to_vec());
    }

    #[test]
    fn test_redraw_line_writes_frame() {
        let mut out = Vec::new();
        redraw_line(&mut out, &line("ab", 0)).unwrap();
        assert_snapshot!(visible(&out), @"<ESC>8<ESC>[Kab<ESC>[2D");
    }
}
