use anyhow::Result;

/// Built-in commands and their help text.
const COMMANDS: &[(&str, &str)] = &[
    ("echo", "print the arguments"),
    ("exit", "leave pline"),
    ("help", "show this list"),
    ("q", "leave pline"),
    ("quit", "leave pline"),
    ("words", "list the extra completion words"),
];

pub struct CommandProcessor {
    words: Vec<String>,
}

impl CommandProcessor {
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    pub fn with_words(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn execute_command(&self, command: &str, should_quit: &mut bool) -> Result<String> {
        let cmd = command.trim();
        if cmd.is_empty() {
            return Ok(String::new());
        }

        let (name, rest) = match cmd.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (cmd, ""),
        };

        match name {
            "help" => {
                let width = COMMANDS.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
                let lines: Vec<String> = COMMANDS
                    .iter()
                    .map(|(n, help)| format!("  {:<width$}  {}", n, help, width = width))
                    .collect();
                Ok(lines.join("\n"))
            }
            "echo" => Ok(rest.to_string()),
            "words" => {
                if self.words.is_empty() {
                    Ok("(no completion words configured)".to_string())
                } else {
                    Ok(self.words.join(" "))
                }
            }
            "quit" | "exit" | "q" => {
                *should_quit = true;
                Ok(String::new())
            }
            _ => Err(anyhow::anyhow!("unknown command: {}", name)),
        }
    }

    /// Complete the last word of `line`.
    ///
    /// The first word completes against command names, later words against
    /// command names and the configured words. Only a unique match is
    /// taken; otherwise `line` comes back unchanged.
    pub fn complete(&self, line: &str) -> String {
        let split = line
            .rfind(|c: char| c.is_ascii_whitespace())
            .map_or(0, |i| i + 1);
        let (head, word) = line.split_at(split);
        let first_word = head.trim().is_empty();

        let mut candidates: Vec<&str> = self
            .vocabulary(first_word)
            .filter(|candidate| candidate.starts_with(word))
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        match candidates.as_slice() {
            [only] if only.len() > word.len() => {
                log::debug!("completed {:?} to {:?}", word, only);
                format!("{}{}", head, only)
            }
            _ => line.to_string(),
        }
    }

    fn vocabulary(&self, first_word: bool) -> impl Iterator<Item = &str> + '_ {
        let commands = COMMANDS.iter().map(|(name, _)| *name);
        let words = self
            .words
            .iter()
            .map(String::as_str)
            .filter(move |_| !first_word);
        commands.chain(words)
    }
}

impl Default for CommandProcessor {
    fn default() -> Self {
        Self::new()
    }
}
