use core::ops::{Deref, DerefMut};

use log::info;

use super::Stoppable;

/// Scope guard for a started source.
///
/// Created once the source has been started; stops it when dropped, whether
/// the owning scope ends normally, returns early or unwinds. The source stays
/// reachable through `Deref`/`DerefMut` while the guard lives.
pub struct ActiveSensor<'s, S: Stoppable + ?Sized> {
    source: &'s mut S,
    name: &'static str,
}

impl<'s, S: Stoppable + ?Sized> ActiveSensor<'s, S> {
    /// Wrap an already started source.
    pub fn new(source: &'s mut S, name: &'static str) -> Self {
        info!("{} started", name);
        Self { source, name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<S: Stoppable + ?Sized> Deref for ActiveSensor<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.source
    }
}

impl<S: Stoppable + ?Sized> DerefMut for ActiveSensor<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.source
    }
}

impl<S: Stoppable + ?Sized> Drop for ActiveSensor<'_, S> {
    fn drop(&mut self) {
        self.source.stop();
        info!("{} stopped", self.name);
    }
}
