//! Instruction semantics.
//!
//! Every handler receives the resolved addressing mode and effective
//! address; handlers that need the operand value read it through the
//! memory interface themselves, and the shift/rotate family works on
//! either the accumulator or memory depending on the mode. Branches
//! return their own extra cycles (1 taken, +1 on page cross); everything
//! else is covered by the decode table's base count.

use emu_core::Memory;

use crate::Mos6502;
use crate::addressing::pages_differ;
use crate::flags::{C, D, I, N, V, Z};
use crate::opcodes::{AddrMode, Op};
use crate::{IRQ_VECTOR, Status};

impl Mos6502 {
    pub(crate) fn execute<M: Memory>(
        &mut self,
        memory: &mut M,
        op: Op,
        mode: AddrMode,
        addr: u16,
    ) -> u32 {
        match op {
            // Loads and stores
            Op::Lda => {
                self.regs.a = memory.read(addr);
                self.regs.p.update_nz(self.regs.a);
                0
            }
            Op::Ldx => {
                self.regs.x = memory.read(addr);
                self.regs.p.update_nz(self.regs.x);
                0
            }
            Op::Ldy => {
                self.regs.y = memory.read(addr);
                self.regs.p.update_nz(self.regs.y);
                0
            }
            Op::Sta => {
                memory.write(addr, self.regs.a);
                0
            }
            Op::Stx => {
                memory.write(addr, self.regs.x);
                0
            }
            Op::Sty => {
                memory.write(addr, self.regs.y);
                0
            }

            // Arithmetic
            Op::Adc => {
                let value = memory.read(addr);
                self.adc(value);
                0
            }
            Op::Sbc => {
                let value = memory.read(addr);
                self.sbc(value);
                0
            }

            // Increment / decrement
            Op::Inc => {
                let value = memory.read(addr).wrapping_add(1);
                memory.write(addr, value);
                self.regs.p.update_nz(value);
                0
            }
            Op::Dec => {
                let value = memory.read(addr).wrapping_sub(1);
                memory.write(addr, value);
                self.regs.p.update_nz(value);
                0
            }
            Op::Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.p.update_nz(self.regs.x);
                0
            }
            Op::Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.p.update_nz(self.regs.y);
                0
            }
            Op::Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.x);
                0
            }
            Op::Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.y);
                0
            }

            // Shifts and rotates, on A or on memory
            Op::Asl => {
                let value = self.read_target(memory, mode, addr);
                let result = self.asl(value);
                self.write_target(memory, mode, addr, result);
                0
            }
            Op::Lsr => {
                let value = self.read_target(memory, mode, addr);
                let result = self.lsr(value);
                self.write_target(memory, mode, addr, result);
                0
            }
            Op::Rol => {
                let value = self.read_target(memory, mode, addr);
                let result = self.rol(value);
                self.write_target(memory, mode, addr, result);
                0
            }
            Op::Ror => {
                let value = self.read_target(memory, mode, addr);
                let result = self.ror(value);
                self.write_target(memory, mode, addr, result);
                0
            }

            // Logic
            Op::And => {
                self.regs.a &= memory.read(addr);
                self.regs.p.update_nz(self.regs.a);
                0
            }
            Op::Ora => {
                self.regs.a |= memory.read(addr);
                self.regs.p.update_nz(self.regs.a);
                0
            }
            Op::Eor => {
                self.regs.a ^= memory.read(addr);
                self.regs.p.update_nz(self.regs.a);
                0
            }

            // Compares and bit test
            Op::Cmp => {
                let value = memory.read(addr);
                self.compare(self.regs.a, value);
                0
            }
            Op::Cpx => {
                let value = memory.read(addr);
                self.compare(self.regs.x, value);
                0
            }
            Op::Cpy => {
                let value = memory.read(addr);
                self.compare(self.regs.y, value);
                0
            }
            Op::Bit => {
                let value = memory.read(addr);
                self.regs.p.set_if(N, value & 0x80 != 0);
                self.regs.p.set_if(V, value & 0x40 != 0);
                self.regs.p.set_if(Z, self.regs.a & value == 0);
                0
            }

            // Branches
            Op::Bcc => self.branch(addr, !self.regs.p.is_set(C)),
            Op::Bcs => self.branch(addr, self.regs.p.is_set(C)),
            Op::Bne => self.branch(addr, !self.regs.p.is_set(Z)),
            Op::Beq => self.branch(addr, self.regs.p.is_set(Z)),
            Op::Bpl => self.branch(addr, !self.regs.p.is_set(N)),
            Op::Bmi => self.branch(addr, self.regs.p.is_set(N)),
            Op::Bvc => self.branch(addr, !self.regs.p.is_set(V)),
            Op::Bvs => self.branch(addr, self.regs.p.is_set(V)),

            // Register transfers
            Op::Tax => {
                self.regs.x = self.regs.a;
                self.regs.p.update_nz(self.regs.x);
                0
            }
            Op::Txa => {
                self.regs.a = self.regs.x;
                self.regs.p.update_nz(self.regs.a);
                0
            }
            Op::Tay => {
                self.regs.y = self.regs.a;
                self.regs.p.update_nz(self.regs.y);
                0
            }
            Op::Tya => {
                self.regs.a = self.regs.y;
                self.regs.p.update_nz(self.regs.a);
                0
            }
            Op::Tsx => {
                self.regs.x = self.regs.s;
                self.regs.p.update_nz(self.regs.x);
                0
            }
            Op::Txs => {
                // The only transfer that leaves the flags alone
                self.regs.s = self.regs.x;
                0
            }

            // Stack
            Op::Pha => {
                self.push(memory, self.regs.a);
                0
            }
            Op::Pla => {
                self.regs.a = self.pull(memory);
                self.regs.p.update_nz(self.regs.a);
                0
            }
            Op::Php => {
                let value = self.regs.p.pushed(true);
                self.push(memory, value);
                0
            }
            Op::Plp => {
                let value = self.pull(memory);
                self.regs.p = Status::from_byte(value);
                0
            }

            // Jumps and subroutines
            Op::Jmp => {
                self.regs.pc = addr;
                0
            }
            Op::Jsr => {
                let return_addr = self.regs.pc.wrapping_sub(1);
                self.push16(memory, return_addr);
                self.regs.pc = addr;
                0
            }
            Op::Rts => {
                self.regs.pc = self.pull16(memory).wrapping_add(1);
                0
            }
            Op::Rti => {
                let status = self.pull(memory);
                self.regs.p = Status::from_byte(status);
                self.regs.pc = self.pull16(memory);
                0
            }

            // Flag set / clear
            Op::Clc => {
                self.regs.p.clear(C);
                0
            }
            Op::Sec => {
                self.regs.p.set(C);
                0
            }
            Op::Cli => {
                self.regs.p.clear(I);
                0
            }
            Op::Sei => {
                self.regs.p.set(I);
                0
            }
            Op::Cld => {
                self.regs.p.clear(D);
                0
            }
            Op::Sed => {
                self.regs.p.set(D);
                0
            }
            Op::Clv => {
                self.regs.p.clear(V);
                0
            }

            Op::Brk => {
                // BRK and hardware IRQ share a vector; B set marks the
                // pushed status as a software interrupt
                self.push16(memory, self.regs.pc);
                let status = self.regs.p.pushed(true);
                self.push(memory, status);
                self.regs.p.set(I);
                self.regs.pc = memory.read16(IRQ_VECTOR);
                0
            }
            Op::Nop => 0,

            // The step loop rejects illegal opcodes before dispatch
            Op::Ill => 0,
        }
    }

    /// Read the shift/rotate target: A in accumulator mode, memory otherwise.
    fn read_target<M: Memory>(&self, memory: &mut M, mode: AddrMode, addr: u16) -> u8 {
        if mode == AddrMode::Accumulator {
            self.regs.a
        } else {
            memory.read(addr)
        }
    }

    /// Write the shift/rotate result back to A or memory.
    fn write_target<M: Memory>(&mut self, memory: &mut M, mode: AddrMode, addr: u16, value: u8) {
        if mode == AddrMode::Accumulator {
            self.regs.a = value;
        } else {
            memory.write(addr, value);
        }
    }

    /// ADC - add with carry. Always binary; D is bookkeeping only.
    fn adc(&mut self, value: u8) {
        let a = u16::from(self.regs.a);
        let v = u16::from(value);
        let carry = u16::from(self.regs.p.is_set(C));

        let result = a + v + carry;
        let result8 = result as u8;

        self.regs.p.set_if(C, result > 0xFF);
        self.regs
            .p
            .set_if(V, !(self.regs.a ^ value) & (self.regs.a ^ result8) & 0x80 != 0);
        self.regs.p.update_nz(result8);
        self.regs.a = result8;
    }

    /// SBC - subtract with carry (carry clear means borrow).
    fn sbc(&mut self, value: u8) {
        let a = u16::from(self.regs.a);
        let v = u16::from(value);
        let borrow = u16::from(!self.regs.p.is_set(C));

        let result = a.wrapping_sub(v).wrapping_sub(borrow);
        let result8 = result as u8;

        self.regs.p.set_if(C, result < 0x100);
        self.regs
            .p
            .set_if(V, (self.regs.a ^ value) & (self.regs.a ^ result8) & 0x80 != 0);
        self.regs.p.update_nz(result8);
        self.regs.a = result8;
    }

    /// CMP/CPX/CPY - unsigned compare of a register against memory.
    fn compare(&mut self, register: u8, value: u8) {
        let result = register.wrapping_sub(value);
        self.regs.p.set_if(C, register >= value);
        self.regs.p.update_nz(result);
    }

    /// ASL - arithmetic shift left.
    fn asl(&mut self, value: u8) -> u8 {
        self.regs.p.set_if(C, value & 0x80 != 0);
        let result = value << 1;
        self.regs.p.update_nz(result);
        result
    }

    /// LSR - logical shift right.
    fn lsr(&mut self, value: u8) -> u8 {
        self.regs.p.set_if(C, value & 0x01 != 0);
        let result = value >> 1;
        self.regs.p.update_nz(result);
        result
    }

    /// ROL - rotate left through carry.
    fn rol(&mut self, value: u8) -> u8 {
        let carry_in = u8::from(self.regs.p.is_set(C));
        self.regs.p.set_if(C, value & 0x80 != 0);
        let result = (value << 1) | carry_in;
        self.regs.p.update_nz(result);
        result
    }

    /// ROR - rotate right through carry.
    fn ror(&mut self, value: u8) -> u8 {
        let carry_in = if self.regs.p.is_set(C) { 0x80 } else { 0 };
        self.regs.p.set_if(C, value & 0x01 != 0);
        let result = (value >> 1) | carry_in;
        self.regs.p.update_nz(result);
        result
    }

    /// Take the branch if `condition` holds.
    ///
    /// Returns the extra cycles: 1 for a taken branch, 2 if the target is
    /// on a different page than the instruction that follows the branch.
    fn branch(&mut self, target: u16, condition: bool) -> u32 {
        if !condition {
            return 0;
        }
        let crossed = pages_differ(self.regs.pc, target);
        self.regs.pc = target;
        if crossed { 2 } else { 1 }
    }

    /// Push PC and status, set I, and load PC from `vector`.
    ///
    /// Shared by IRQ and NMI service; the pushed status has B clear to
    /// mark a hardware interrupt.
    pub(crate) fn service_interrupt<M: Memory>(&mut self, memory: &mut M, vector: u16) {
        self.push16(memory, self.regs.pc);
        let status = self.regs.p.pushed(false);
        self.push(memory, status);
        self.regs.p.set(I);
        self.regs.pc = memory.read16(vector);
        self.cycles += 7;
    }
}
