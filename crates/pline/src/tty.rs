use anyhow::{Context, Result};
use linecore::RawChannel;
use rustix::termios::{self, OptionalActions, Termios};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// A terminal device opened read/write.
///
/// Raw mode is applied to this device's own file descriptor. The settings
/// it had before `set_raw` are kept until `restore` puts them back.
pub struct TtyChannel {
    device: File,
    path: PathBuf,
    saved: Option<Termios>,
}

impl TtyChannel {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let device = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .with_context(|| format!("failed to open terminal device {}", path.display()))?;
        log::debug!("opened terminal device {}", path.display());
        Ok(Self {
            device,
            path: path.to_path_buf(),
            saved: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Read for TtyChannel {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.device.read(buf)
    }
}

impl Write for TtyChannel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.device.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.device.flush()
    }
}

impl RawChannel for TtyChannel {
    fn set_raw(&mut self) -> io::Result<()> {
        let mut raw = termios::tcgetattr(&self.device)?;
        if self.saved.is_none() {
            self.saved = Some(raw.clone());
        }
        raw.make_raw();
        termios::tcsetattr(&self.device, OptionalActions::Now, &raw)?;
        log::trace!("raw mode on {}", self.path.display());
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        let Some(saved) = self.saved.as_ref() else {
            return Ok(());
        };
        termios::tcsetattr(&self.device, OptionalActions::Now, saved)?;
        self.saved = None;
        log::trace!("cooked mode on {}", self.path.display());
        Ok(())
    }
}
