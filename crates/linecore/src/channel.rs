use std::io::{self, Read, Write};
use std::ops::{Deref, DerefMut};

/// A terminal device that can switch between raw and cooked mode.
///
/// `read` returning `Ok(0)` signals end of input. Closing the device is
/// dropping the implementor.
pub trait RawChannel: Read + Write {
    fn set_raw(&mut self) -> io::Result<()>;
    fn restore(&mut self) -> io::Result<()>;
}

impl<C: RawChannel + ?Sized> RawChannel for &mut C {
    fn set_raw(&mut self) -> io::Result<()> {
        (**self).set_raw()
    }

    fn restore(&mut self) -> io::Result<()> {
        (**self).restore()
    }
}

impl<C: RawChannel + ?Sized> RawChannel for Box<C> {
    fn set_raw(&mut self) -> io::Result<()> {
        (**self).set_raw()
    }

    fn restore(&mut self) -> io::Result<()> {
        (**self).restore()
    }
}

/// Raw mode held for the lifetime of the guard.
///
/// `release` restores cooked mode and reports the result. A guard dropped
/// without `release` still restores, discarding any error.
pub struct RawMode<'a, C: RawChannel + ?Sized> {
    channel: &'a mut C,
    active: bool,
}

impl<'a, C: RawChannel + ?Sized> RawMode<'a, C> {
    pub fn acquire(channel: &'a mut C) -> io::Result<Self> {
        channel.set_raw()?;
        log::debug!("raw mode acquired");
        Ok(Self {
            channel,
            active: true,
        })
    }

    pub fn release(mut self) -> io::Result<()> {
        self.active = false;
        log::debug!("raw mode released");
        self.channel.restore()
    }
}

impl<C: RawChannel + ?Sized> Deref for RawMode<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        &*self.channel
    }
}

impl<C: RawChannel + ?Sized> DerefMut for RawMode<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut *self.channel
    }
}

impl<C: RawChannel + ?Sized> Drop for RawMode<'_, C> {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = self.channel.restore() {
                log::warn!("failed to restore terminal mode: {}", e);
            }
        }
    }
}
