//! MOS 6502 CPU interpreter.
//!
//! Executes one whole instruction per [`step`](emu_core::Cpu::step) call and
//! reports the cycles it consumed, including the addressing-dependent
//! penalties (page crossing, taken branches). Decode runs through a single
//! 256-entry table holding addressing mode, operation, length and cycle
//! counts per opcode byte.
//!
//! Decimal mode is flag bookkeeping only: D can be set and cleared and it
//! round-trips through the stack, but ADC/SBC always compute in binary.
//! Undocumented opcodes are not implemented; fetching one surfaces
//! [`IllegalOpcode`] and leaves the CPU untouched so the caller can decide
//! what to do with the stream.

mod addressing;
mod execute;
pub mod flags;
mod opcodes;
mod registers;

pub use flags::Status;
pub use registers::Registers;

use emu_core::{Cpu, Memory};
use thiserror::Error;

use crate::opcodes::{OPCODES, Op};

/// Non-maskable interrupt vector.
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector, read by [`Cpu::reset`].
pub const RESET_VECTOR: u16 = 0xFFFC;
/// Maskable interrupt vector, shared by IRQ and BRK.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// A fetched opcode with no documented semantics.
///
/// Fatal to the instruction stream: PC still points at the offending byte
/// and no cycles were charged, so the caller can treat it as a stop, a
/// diagnostic, or substitute its own recovery policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal opcode ${opcode:02X} at ${pc:04X}")]
pub struct IllegalOpcode {
    /// The undefined opcode byte.
    pub opcode: u8,
    /// Address the opcode was fetched from.
    pub pc: u16,
}

/// The MOS 6502 CPU state.
pub struct Mos6502 {
    /// Register file, public for test and debugger introspection.
    pub regs: Registers,
    /// Total cycles since reset.
    cycles: u64,
    /// Remaining stall cycles; while positive, steps only count down.
    idle: u32,
    /// NMI request latch, consumed at the top of the next step.
    nmi_pending: bool,
    /// IRQ request latch; stays set while I masks it.
    irq_pending: bool,
}

impl Mos6502 {
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            cycles: 0,
            idle: 0,
            nmi_pending: false,
            irq_pending: false,
        }
    }

    pub fn a(&self) -> u8 {
        self.regs.a
    }

    pub fn x(&self) -> u8 {
        self.regs.x
    }

    pub fn y(&self) -> u8 {
        self.regs.y
    }

    pub fn s(&self) -> u8 {
        self.regs.s
    }

    /// Assembled status byte (bit 5 reads as 1).
    pub fn status(&self) -> u8 {
        self.regs.p.to_byte()
    }

    /// Total cycles executed since reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Stall the CPU for `count` cycles without executing instructions.
    ///
    /// Each stalled cycle is consumed by one `step` call returning 1.
    /// Models bus takeover such as sprite DMA.
    pub fn add_idle_cycles(&mut self, count: u32) {
        self.idle += count;
    }
}

impl Default for Mos6502 {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Memory> Cpu<M> for Mos6502 {
    type Error = IllegalOpcode;

    fn step(&mut self, memory: &mut M) -> Result<u32, IllegalOpcode> {
        if self.idle > 0 {
            self.idle -= 1;
            self.cycles += 1;
            return Ok(1);
        }

        let start = self.cycles;

        // NMI wins when both are pending; a masked IRQ stays latched
        // until I clears.
        if self.nmi_pending {
            self.nmi_pending = false;
            log::trace!("NMI: pushing PC ${:04X}", self.regs.pc);
            self.service_interrupt(memory, NMI_VECTOR);
        } else if self.irq_pending && !self.regs.p.is_set(flags::I) {
            self.irq_pending = false;
            log::trace!("IRQ: pushing PC ${:04X}", self.regs.pc);
            self.service_interrupt(memory, IRQ_VECTOR);
        }

        let pc = self.regs.pc;
        let opcode = memory.read(pc);
        let info = &OPCODES[usize::from(opcode)];
        if info.op == Op::Ill {
            log::warn!("illegal opcode ${opcode:02X} at ${pc:04X}");
            return Err(IllegalOpcode { opcode, pc });
        }

        let (addr, page_crossed) = self.resolve(memory, info.mode);
        self.regs.pc = pc.wrapping_add(u16::from(info.bytes));

        self.cycles += u64::from(info.cycles);
        if page_crossed && info.page_penalty {
            self.cycles += 1;
        }

        let extra = self.execute(memory, info.op, info.mode, addr);
        self.cycles += u64::from(extra);

        Ok((self.cycles - start) as u32)
    }

    fn reset(&mut self, memory: &mut M) {
        self.regs = Registers::new();
        self.regs.pc = memory.read16(RESET_VECTOR);
        self.cycles = 0;
        self.idle = 0;
        self.nmi_pending = false;
        self.irq_pending = false;
        log::debug!("reset: PC=${:04X}", self.regs.pc);
    }

    fn trigger_irq(&mut self) {
        self.irq_pending = true;
    }

    fn trigger_nmi(&mut self) {
        self.nmi_pending = true;
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }
}
