use std::fmt;
use std::io::{self, Write};

use crate::channel::RawChannel;
use crate::error::Result;
use crate::session::{self, Completer};

/// The prompt surface handed to the command driver.
///
/// Owns the terminal channel and the completion hook; each `read_line`
/// runs a fresh edit session against them.
pub struct LineEditor<C: RawChannel> {
    channel: C,
    completer: Option<Box<Completer>>,
}

impl<C: RawChannel> LineEditor<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            completer: None,
        }
    }

    /// Read one line, writing the prompt to stdout.
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.read_line_with(prompt, &mut out)
    }

    pub fn read_line_with<W: Write + ?Sized>(
        &mut self,
        prompt: &str,
        prompt_out: &mut W,
    ) -> Result<String> {
        session::read_line(
            &mut self.channel,
            prompt_out,
            self.completer.as_deref(),
            prompt,
        )
    }

    pub fn print(&self, args: &[&dyn fmt::Display]) {
        write_diagnostic(&render_args(args));
    }

    pub fn print_err(&self, args: &[&dyn fmt::Display]) {
        write_diagnostic(&render_args(args));
    }

    /// Always false: the editor never reports terminal capabilities.
    pub fn is_terminal(&self) -> bool {
        false
    }

    pub fn set_auto_complete<F>(&mut self, complete: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.completer = Some(Box::new(complete));
    }

    pub fn into_channel(self) -> C {
        self.channel
    }
}

/// Space-joined, newline-terminated rendering of `args`.
pub fn render_args(args: &[&dyn fmt::Display]) -> String {
    let mut text = args
        .iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

fn write_diagnostic(text: &str) {
    let stderr = io::stderr();
    let mut err = stderr.lock();
    if let Err(e) = err.write_all(text.as_bytes()).and_then(|()| err.flush()) {
        log::debug!("dropping diagnostic output: {}", e);
    }
}
