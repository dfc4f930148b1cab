//! Exclusive timing window for the bit-synchronous single-wire decode.
//!
//! The decoder measures pulse widths by counting spin-loop iterations, so any
//! preemption during the read corrupts the measurement. Platforms provide a
//! [`TimingWindow`] that masks interrupts (or otherwise keeps the core to itself);
//! the driver holds it through an [`Exclusive`] guard that is released on every
//! exit path.

/// Something that can suppress preemption for a short critical section.
pub trait TimingWindow {
    /// Enter the window, e.g. disable interrupts.
    fn acquire(&mut self);

    /// Leave the window, e.g. re-enable interrupts.
    fn release(&mut self);
}

impl<W: TimingWindow + ?Sized> TimingWindow for &mut W {
    fn acquire(&mut self) {
        (**self).acquire()
    }

    fn release(&mut self) {
        (**self).release()
    }
}

/// Window that does nothing, for hosts where preemption is handled elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopWindow;

impl TimingWindow for NoopWindow {
    fn acquire(&mut self) {}

    fn release(&mut self) {}
}

/// Holds a [`TimingWindow`] open until dropped.
pub struct Exclusive<'a, W: TimingWindow> {
    window: &'a mut W,
}

impl<'a, W: TimingWindow> Exclusive<'a, W> {
    /// Acquires `window`; it is released when the guard drops.
    pub fn enter(window: &'a mut W) -> Self {
        window.acquire();
        Exclusive { window }
    }
}

impl<W: TimingWindow> Drop for Exclusive<'_, W> {
    fn drop(&mut self) {
        self.window.release();
    }
}
