use anyhow::{Context, Result};
use linecore::{LineEditor, RawChannel, ReadLineError};
use std::io::Write;
use std::sync::Arc;

use crate::command_processor::CommandProcessor;
use crate::config::Config;

pub struct App<C: RawChannel> {
    pub editor: LineEditor<C>,
    pub config: Config,
    pub command_processor: Arc<CommandProcessor>,
    should_quit: bool,
}

impl<C: RawChannel> App<C> {
    pub fn new(channel: C, config: Config) -> Self {
        let command_processor = Arc::new(CommandProcessor::with_words(
            config.completion.words.clone(),
        ));

        let mut editor = LineEditor::new(channel);
        if config.completion.enabled {
            let processor = Arc::clone(&command_processor);
            editor.set_auto_complete(move |line: &str| processor.complete(line));
        } else {
            log::info!("Completion disabled by config");
        }

        Self {
            editor,
            config,
            command_processor,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Prompt and dispatch until quit or end of input, prompting on stdout.
    pub fn run(&mut self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_with(&mut out)
    }

    pub fn run_with<W: Write>(&mut self, prompt_out: &mut W) -> Result<()> {
        while !self.should_quit {
            let line = match self.editor.read_line_with(&self.config.prompt, prompt_out) {
                Ok(line) => line,
                Err(ReadLineError::EndOfInput) => {
                    log::info!("End of input, leaving prompt loop");
                    break;
                }
                Err(e) => return Err(e).context("terminal read failed"),
            };
            self.handle_line(&line);
        }
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) {
        match self
            .command_processor
            .execute_command(line, &mut self.should_quit)
        {
            Ok(output) if output.is_empty() => {}
            Ok(output) => self.editor.print(&[&output]),
            Err(e) => {
                log::debug!("Command failed: {}", e);
                self.editor.print_err(&[&"error:", &e]);
            }
        }
    }
}
