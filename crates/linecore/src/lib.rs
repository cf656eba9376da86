//! Raw-input line editing core for pline.
//!
//! Bytes from a terminal in raw mode are decoded into edit commands,
//! applied to a cursor-addressed line buffer, and echoed back with a small
//! ANSI redraw protocol. The terminal itself is abstracted by
//! [`RawChannel`], so everything here runs against in-memory devices too.

pub mod buffer;
pub mod channel;
pub mod decoder;
pub mod editor;
pub mod error;
pub mod redraw;
pub mod session;

pub use buffer::LineBuffer;
pub use channel::{RawChannel, RawMode};
pub use decoder::{Command, Decoder, EscapeState};
pub use editor::{render_args, LineEditor};
pub use error::ReadLineError;
pub use session::{read_line, Completer, EditSession};

#[cfg(test)]
pub(crate) mod testlib;
