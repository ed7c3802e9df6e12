//! Addressing-mode resolution and stack access.
//!
//! Resolution is a pure function of the current registers and memory: it
//! reads operand bytes at PC+1 without moving PC, which advances by the
//! decode table's instruction length afterwards. The two indexed absolute
//! modes and ($nn),Y report whether the index addition crossed a page, so
//! the step loop can charge the conditional extra cycle.

use emu_core::Memory;

use crate::Mos6502;
use crate::opcodes::AddrMode;

/// True if `a` and `b` fall in different 256-byte pages.
pub(crate) fn pages_differ(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}

impl Mos6502 {
    /// Resolve the effective address for `mode`.
    ///
    /// Returns the address (0 for Implied/Accumulator, which never
    /// dereference) and whether the computation crossed a page.
    pub(crate) fn resolve<M: Memory>(&self, memory: &mut M, mode: AddrMode) -> (u16, bool) {
        let pc = self.regs.pc;
        match mode {
            AddrMode::Implied | AddrMode::Accumulator => (0, false),
            AddrMode::Immediate => (pc.wrapping_add(1), false),
            AddrMode::ZeroPage => (u16::from(memory.read(pc.wrapping_add(1))), false),
            AddrMode::ZeroPageX => {
                // The add is masked to 8 bits, so this never leaves page zero
                let base = memory.read(pc.wrapping_add(1));
                (u16::from(base.wrapping_add(self.regs.x)), false)
            }
            AddrMode::ZeroPageY => {
                let base = memory.read(pc.wrapping_add(1));
                (u16::from(base.wrapping_add(self.regs.y)), false)
            }
            AddrMode::Absolute => (memory.read16(pc.wrapping_add(1)), false),
            AddrMode::AbsoluteX => {
                let base = memory.read16(pc.wrapping_add(1));
                let addr = base.wrapping_add(u16::from(self.regs.x));
                (addr, pages_differ(base, addr))
            }
            AddrMode::AbsoluteY => {
                let base = memory.read16(pc.wrapping_add(1));
                let addr = base.wrapping_add(u16::from(self.regs.y));
                (addr, pages_differ(base, addr))
            }
            AddrMode::Relative => {
                // Target is relative to the instruction after the branch
                let offset = memory.read(pc.wrapping_add(1)) as i8;
                (pc.wrapping_add(2).wrapping_add(offset as u16), false)
            }
            AddrMode::Indirect => {
                let ptr = memory.read16(pc.wrapping_add(1));
                (memory.read16_wrapped(ptr), false)
            }
            AddrMode::IndexedIndirect => {
                let ptr = memory.read(pc.wrapping_add(1)).wrapping_add(self.regs.x);
                (memory.read16_wrapped(u16::from(ptr)), false)
            }
            AddrMode::IndirectIndexed => {
                let ptr = memory.read(pc.wrapping_add(1));
                let base = memory.read16_wrapped(u16::from(ptr));
                let addr = base.wrapping_add(u16::from(self.regs.y));
                (addr, pages_differ(base, addr))
            }
        }
    }

    /// Push a byte onto the stack at $0100 | S.
    pub(crate) fn push<M: Memory>(&mut self, memory: &mut M, value: u8) {
        let addr = self.regs.push_addr();
        memory.write(addr, value);
    }

    /// Pull a byte from the stack.
    pub(crate) fn pull<M: Memory>(&mut self, memory: &mut M) -> u8 {
        let addr = self.regs.pull_addr();
        memory.read(addr)
    }

    /// Push a 16-bit word onto the stack (high byte first).
    pub(crate) fn push16<M: Memory>(&mut self, memory: &mut M, value: u16) {
        self.push(memory, (value >> 8) as u8);
        self.push(memory, value as u8);
    }

    /// Pull a 16-bit word from the stack (low byte first).
    pub(crate) fn pull16<M: Memory>(&mut self, memory: &mut M) -> u16 {
        let low = self.pull(memory);
        let high = self.pull(memory);
        u16::from_le_bytes([low, high])
    }
}
