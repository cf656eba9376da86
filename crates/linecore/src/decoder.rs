//! Byte-level key decoding for raw terminal input.
//!
//! Every byte read from the terminal goes through [`EscapeState::advance`],
//! a pure transition that yields the next state and at most one [`Command`].
//! Only the two-stage `ESC [ <final>` form is understood; any other escape
//! is abandoned and the byte that broke it is classified as a plain key.

pub const ESC: u8 = 0x1b;

/// A normalized edit command produced by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insert(u8),
    MoveLeft,
    MoveRight,
    MoveToStart,
    MoveToEnd,
    DeleteBefore,
    KillToEnd,
    KillWholeLine,
    Complete,
    /// Clear the screen, redraw the prompt, then discard the line.
    ClearScreen,
    Accept,
    EndOfInput,
}

impl Command {
    /// Whether this command ends the edit session.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Command::Accept | Command::EndOfInput)
    }
}

/// Progress through an `ESC [ <final>` sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeState {
    #[default]
    None,
    SawEscape,
    SawBracket,
}

impl EscapeState {
    pub fn advance(self, byte: u8) -> (EscapeState, Option<Command>) {
        match self {
            EscapeState::SawBracket => {
                let command = match byte {
                    b'C' => Some(Command::MoveRight),
                    b'D' => Some(Command::MoveLeft),
                    _ => None,
                };
                (EscapeState::None, command)
            }
            EscapeState::SawEscape if byte == b'[' => (EscapeState::SawBracket, None),
            // A lone ESC is dropped and the byte is read as if no escape was pending.
            EscapeState::SawEscape | EscapeState::None => classify(byte),
        }
    }
}

fn classify(byte: u8) -> (EscapeState, Option<Command>) {
    let command = match byte {
        0x01 => Command::MoveToStart,
        0x02 => Command::MoveLeft,
        0x04 => Command::EndOfInput,
        0x05 => Command::MoveToEnd,
        0x06 => Command::MoveRight,
        0x08 | 0x7f => Command::DeleteBefore,
        0x09 => Command::Complete,
        0x0a | 0x0d => Command::Accept,
        0x0b => Command::KillToEnd,
        0x0c => Command::ClearScreen,
        0x15 => Command::KillWholeLine,
        ESC => return (EscapeState::SawEscape, None),
        0x20..=0x7e => Command::Insert(byte),
        // Unmapped control codes and non-ASCII bytes
        _ => return (EscapeState::None, None),
    };
    (EscapeState::None, Some(command))
}

/// Decoder wrapper that keeps its own state between bytes.
#[derive(Debug, Default)]
pub struct Decoder {
    state: EscapeState,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, byte: u8) -> Option<Command> {
        let (next, command) = self.state.advance(byte);
        log::trace!("decode {:#04x}: {:?} -> {:?}, {:?}", byte, self.state, next, command);
        self.state = next;
        command
    }

    pub fn state(&self) -> EscapeState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8]) -> Vec<Command> {
        let mut decoder = Decoder::new();
        bytes.iter().filter_map(|&b| decoder.feed(b)).collect()
    }

    #[test]
    fn test_printable_bytes_insert() {
        assert_eq!(
            decode_all(b"a Z~"),
            vec![
                Command::Insert(b'a'),
                Command::Insert(b' '),
                Command::Insert(b'Z'),
                Command::Insert(b'~'),
            ]
        );
    }

    #[test]
    fn test_control_table() {
        let table = [
            (0x01, Command::MoveToStart),
            (0x02, Command::MoveLeft),
            (0x04, Command::EndOfInput),
            (0x05, Command::MoveToEnd),
            (0x06, Command::MoveRight),
            (0x08, Command::DeleteBefore),
            (0x7f, Command::DeleteBefore),
            (0x09, Command::Complete),
            (0x0a, Command::Accept),
            (0x0d, Command::Accept),
            (0x0b, Command::KillToEnd),
            (0x0c, Command::ClearScreen),
            (0x15, Command::KillWholeLine),
        ];
        for (byte, expected) in table {
            let (state, command) = EscapeState::None.advance(byte);
            assert_eq!(state, EscapeState::None, "byte {:#04x}", byte);
            assert_eq!(command, Some(expected), "byte {:#04x}", byte);
        }
    }

    #[test]
    fn test_unmapped_controls_ignored() {
        for byte in [0x00, 0x03, 0x07, 0x0e, 0x10, 0x1a, 0x1f] {
            assert_eq!(EscapeState::None.advance(byte), (EscapeState::None, None));
        }
    }

    #[test]
    fn test_non_ascii_discarded() {
        for byte in [0x80, 0xc3, 0xff] {
            assert_eq!(EscapeState::None.advance(byte), (EscapeState::None, None));
        }
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(decode_all(b"\x1b[D"), vec![Command::MoveLeft]);
        assert_eq!(decode_all(b"\x1b[C"), vec![Command::MoveRight]);
    }

    #[test]
    fn test_escape_transitions() {
        assert_eq!(
            EscapeState::None.advance(ESC),
            (EscapeState::SawEscape, None)
        );
        assert_eq!(
            EscapeState::SawEscape.advance(b'['),
            (EscapeState::SawBracket, None)
        );
        assert_eq!(
            EscapeState::SawBracket.advance(b'A'),
            (EscapeState::None, None)
        );
    }

    #[test]
    fn test_unknown_sequence_discarded() {
        // Up and down arrows are not bound
        assert_eq!(decode_all(b"\x1b[A\x1b[Bx"), vec![Command::Insert(b'x')]);
    }

    #[test]
    fn test_lone_escape_falls_through() {
        assert_eq!(decode_all(b"\x1b\x01"), vec![Command::MoveToStart]);
        assert_eq!(decode_all(b"\x1bq"), vec![Command::Insert(b'q')]);
        assert_eq!(decode_all(b"\x1b\r"), vec![Command::Accept]);
    }

    #[test]
    fn test_double_escape_stays_pending() {
        let mut decoder = Decoder::new();
        assert_eq!(decoder.feed(ESC), None);
        assert_eq!(decoder.feed(ESC), None);
        assert_eq!(decoder.state(), EscapeState::SawEscape);
        assert_eq!(decoder.feed(b'['), None);
        assert_eq!(decoder.feed(b'C'), Some(Command::MoveRight));
        assert_eq!(decoder.state(), EscapeState::None);
    }

    #[test]
    fn test_non_ascii_aborts_escape() {
        let mut decoder = Decoder::new();
        decoder.feed(ESC);
        assert_eq!(decoder.feed(0x9b), None);
        assert_eq!(decoder.state(), EscapeState::None);
    }

    #[test]
    fn test_terminal_commands() {
        assert!(Command::Accept.is_terminal());
        assert!(Command::EndOfInput.is_terminal());
        assert!(!Command::ClearScreen.is_terminal());
    }
}
