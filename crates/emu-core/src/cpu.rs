//! CPU core trait.

use crate::Memory;

/// A CPU that executes whole instructions against a [`Memory`].
///
/// The memory is passed in, not owned, so it can be shared with other
/// components between steps. Interrupt triggers only latch a request;
/// the latch is consumed at the top of the next `step`.
pub trait Cpu<M: Memory> {
    /// Error surfaced when the instruction stream cannot continue.
    type Error;

    /// Execute one step. Returns cycles consumed.
    fn step(&mut self, memory: &mut M) -> Result<u32, Self::Error>;

    /// Reset the CPU to its initial state, loading PC from the reset vector.
    fn reset(&mut self, memory: &mut M);

    /// Request a maskable interrupt.
    fn trigger_irq(&mut self);

    /// Request a non-maskable interrupt.
    fn trigger_nmi(&mut self);

    /// Returns the current program counter.
    fn pc(&self) -> u16;
}
