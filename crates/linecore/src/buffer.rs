/// True for bytes the line may hold.
pub fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

/// The line being composed: printable ASCII bytes plus a cursor index.
///
/// `0 <= cursor <= len` holds after every call. Mutators return whether
/// the visible state changed so the caller can skip a redraw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            bytes: Vec::with_capacity(32),
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Columns between the cursor and the end of the line.
    pub fn tail_len(&self) -> usize {
        self.bytes.len() - self.cursor
    }

    pub fn insert(&mut self, byte: u8) -> bool {
        if !is_printable(byte) {
            return false;
        }
        // Vec::insert appends when cursor == len
        self.bytes.insert(self.cursor, byte);
        self.cursor += 1;
        true
    }

    pub fn delete_before(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.bytes.remove(self.cursor);
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor == self.bytes.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn move_to_start(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    pub fn move_to_end(&mut self) -> bool {
        let moved = self.cursor != self.bytes.len();
        self.cursor = self.bytes.len();
        moved
    }

    pub fn kill_to_end(&mut self) -> bool {
        if self.cursor == self.bytes.len() {
            return false;
        }
        self.bytes.truncate(self.cursor);
        true
    }

    pub fn kill_whole_line(&mut self) -> bool {
        let changed = !self.bytes.is_empty();
        self.bytes.clear();
        self.cursor = 0;
        changed
    }

    /// Apply a completion result.
    ///
    /// Only a result strictly longer than the current text is taken; it
    /// replaces the line, gains one trailing space, and leaves the cursor
    /// at the end. Results with bytes outside the printable range are refused.
    pub fn complete(&mut self, suggestion: &str) -> bool {
        if suggestion.len() <= self.bytes.len() {
            return false;
        }
        if !suggestion.bytes().all(is_printable) {
            log::debug!("ignoring completion with non-printable bytes");
            return false;
        }
        self.bytes.clear();
        self.bytes.extend_from_slice(suggestion.as_bytes());
        self.bytes.push(b' ');
        self.cursor = self.bytes.len();
        true
    }

    /// The current text as an owned value.
    pub fn snapshot(&self) -> String {
        self.bytes.iter().map(|&b| char::from(b)).collect()
    }
}
