//! Opcode decode table.
//!
//! One record per opcode byte, combining addressing mode, operation,
//! instruction length, base cycle count and the conditional page-cross
//! penalty. Keeping all five facts in a single table means they cannot
//! drift out of sync; a test below checks the cross-field invariants.

/// The 13 addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AddrMode {
    /// No operand; the handler touches registers only.
    Implied,
    /// Operates on the accumulator.
    Accumulator,
    /// Operand is the literal byte after the opcode.
    Immediate,
    /// One-byte address into page zero.
    ZeroPage,
    /// Zero page plus X, wrapping within page zero.
    ZeroPageX,
    /// Zero page plus Y, wrapping within page zero.
    ZeroPageY,
    /// Two-byte little-endian address.
    Absolute,
    /// Absolute plus X; may cross a page.
    AbsoluteX,
    /// Absolute plus Y; may cross a page.
    AbsoluteY,
    /// Signed branch offset relative to the next instruction.
    Relative,
    /// Pointer dereference; JMP only, with the page-wrap bug.
    Indirect,
    /// ($nn,X): pointer at (operand + X) in page zero.
    IndexedIndirect,
    /// ($nn),Y: pointer at operand in page zero, plus Y; may cross a page.
    IndirectIndexed,
}

/// Operation selector for the execute stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// Opcode with no documented semantics; `step` reports it as an error.
    Ill,
}

/// Decode record for one opcode byte.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OpInfo {
    pub mode: AddrMode,
    pub op: Op,
    /// Total instruction length in bytes; 0 marks an illegal opcode.
    pub bytes: u8,
    /// Cycles charged unconditionally.
    pub cycles: u8,
    /// Whether a page cross during address resolution costs one more cycle.
    pub page_penalty: bool,
}

const fn op(op: Op, mode: AddrMode, bytes: u8, cycles: u8, page_penalty: bool) -> OpInfo {
    OpInfo {
        mode,
        op,
        bytes,
        cycles,
        page_penalty,
    }
}

const ILL: OpInfo = op(Op::Ill, AddrMode::Implied, 0, 0, false);

#[rustfmt::skip]
pub(crate) static OPCODES: [OpInfo; 256] = {
    use AddrMode::*;
    use Op::*;
    [
        // 0x00
        op(Brk, Implied, 1, 7, false),
        op(Ora, IndexedIndirect, 2, 6, false),
        ILL,
        ILL,
        ILL,
        op(Ora, ZeroPage, 2, 3, false),
        op(Asl, ZeroPage, 2, 5, false),
        ILL,
        op(Php, Implied, 1, 3, false),
        op(Ora, Immediate, 2, 2, false),
        op(Asl, Accumulator, 1, 2, false),
        ILL,
        ILL,
        op(Ora, Absolute, 3, 4, false),
        op(Asl, Absolute, 3, 6, false),
        ILL,
        // 0x10
        op(Bpl, Relative, 2, 2, false),
        op(Ora, IndirectIndexed, 2, 5, true),
        ILL,
        ILL,
        ILL,
        op(Ora, ZeroPageX, 2, 4, false),
        op(Asl, ZeroPageX, 2, 6, false),
        ILL,
        op(Clc, Implied, 1, 2, false),
        op(Ora, AbsoluteY, 3, 4, true),
        ILL,
        ILL,
        ILL,
        op(Ora, AbsoluteX, 3, 4, true),
        op(Asl, AbsoluteX, 3, 7, false),
        ILL,
        // 0x20
        op(Jsr, Absolute, 3, 6, false),
        op(And, IndexedIndirect, 2, 6, false),
        ILL,
        ILL,
        op(Bit, ZeroPage, 2, 3, false),
        op(And, ZeroPage, 2, 3, false),
        op(Rol, ZeroPage, 2, 5, false),
        ILL,
        op(Plp, Implied, 1, 4, false),
        op(And, Immediate, 2, 2, false),
        op(Rol, Accumulator, 1, 2, false),
        ILL,
        op(Bit, Absolute, 3, 4, false),
        op(And, Absolute, 3, 4, false),
        op(Rol, Absolute, 3, 6, false),
        ILL,
        // 0x30
        op(Bmi, Relative, 2, 2, false),
        op(And, IndirectIndexed, 2, 5, true),
        ILL,
        ILL,
        ILL,
        op(And, ZeroPageX, 2, 4, false),
        op(Rol, ZeroPageX, 2, 6, false),
        ILL,
        op(Sec, Implied, 1, 2, false),
        op(And, AbsoluteY, 3, 4, true),
        ILL,
        ILL,
        ILL,
        op(And, AbsoluteX, 3, 4, true),
        op(Rol, AbsoluteX, 3, 7, false),
        ILL,
        // 0x40
        op(Rti, Implied, 1, 6, false),
        op(Eor, IndexedIndirect, 2, 6, false),
        ILL,
        ILL,
        ILL,
        op(Eor, ZeroPage, 2, 3, false),
        op(Lsr, ZeroPage, 2, 5, false),
        ILL,
        op(Pha, Implied, 1, 3, false),
        op(Eor, Immediate, 2, 2, false),
        op(Lsr, Accumulator, 1, 2, false),
        ILL,
        op(Jmp, Absolute, 3, 3, false),
        op(Eor, Absolute, 3, 4, false),
        op(Lsr, Absolute, 3, 6, false),
        ILL,
        // 0x50
        op(Bvc, Relative, 2, 2, false),
        op(Eor, IndirectIndexed, 2, 5, true),
        ILL,
        ILL,
        ILL,
        op(Eor, ZeroPageX, 2, 4, false),
        op(Lsr, ZeroPageX, 2, 6, false),
        ILL,
        op(Cli, Implied, 1, 2, false),
        op(Eor, AbsoluteY, 3, 4, true),
        ILL,
        ILL,
        ILL,
        op(Eor, AbsoluteX, 3, 4, true),
        op(Lsr, AbsoluteX, 3, 7, false),
        ILL,
        // 0x60
        op(Rts, Implied, 1, 6, false),
        op(Adc, IndexedIndirect, 2, 6, false),
        ILL,
        ILL,
        ILL,
        op(Adc, ZeroPage, 2, 3, false),
        op(Ror, ZeroPage, 2, 5, false),
        ILL,
        op(Pla, Implied, 1, 4, false),
        op(Adc, Immediate, 2, 2, false),
        op(Ror, Accumulator, 1, 2, false),
        ILL,
        op(Jmp, Indirect, 3, 5, false),
        op(Adc, Absolute, 3, 4, false),
        op(Ror, Absolute, 3, 6, false),
        ILL,
        // 0x70
        op(Bvs, Relative, 2, 2, false),
        op(Adc, IndirectIndexed, 2, 5, true),
        ILL,
        ILL,
        ILL,
        op(Adc, ZeroPageX, 2, 4, false),
        op(Ror, ZeroPageX, 2, 6, false),
        ILL,
        op(Sei, Implied, 1, 2, false),
        op(Adc, AbsoluteY, 3, 4, true),
        ILL,
        ILL,
        ILL,
        op(Adc, AbsoluteX, 3, 4, true),
        op(Ror, AbsoluteX, 3, 7, false),
        ILL,
        // 0x80
        ILL,
        op(Sta, IndexedIndirect, 2, 6, false),
        ILL,
        ILL,
        op(Sty, ZeroPage, 2, 3, false),
        op(Sta, ZeroPage, 2, 3, false),
        op(Stx, ZeroPage, 2, 3, false),
        ILL,
        op(Dey, Implied, 1, 2, false),
        ILL,
        op(Txa, Implied, 1, 2, false),
        ILL,
        op(Sty, Absolute, 3, 4, false),
        op(Sta, Absolute, 3, 4, false),
        op(Stx, Absolute, 3, 4, false),
        ILL,
        // 0x90
        op(Bcc, Relative, 2, 2, false),
        op(Sta, IndirectIndexed, 2, 6, false),
        ILL,
        ILL,
        op(Sty, ZeroPageX, 2, 4, false),
        op(Sta, ZeroPageX, 2, 4, false),
        op(Stx, ZeroPageY, 2, 4, false),
        ILL,
        op(Tya, Implied, 1, 2, false),
        op(Sta, AbsoluteY, 3, 5, false),
        op(Txs, Implied, 1, 2, false),
        ILL,
        ILL,
        op(Sta, AbsoluteX, 3, 5, false),
        ILL,
        ILL,
        // 0xA0
        op(Ldy, Immediate, 2, 2, false),
        op(Lda, IndexedIndirect, 2, 6, false),
        op(Ldx, Immediate, 2, 2, false),
        ILL,
        op(Ldy, ZeroPage, 2, 3, false),
        op(Lda, ZeroPage, 2, 3, false),
        op(Ldx, ZeroPage, 2, 3, false),
        ILL,
        op(Tay, Implied, 1, 2, false),
        op(Lda, Immediate, 2, 2, false),
        op(Tax, Implied, 1, 2, false),
        ILL,
        op(Ldy, Absolute, 3, 4, false),
        op(Lda, Absolute, 3, 4, false),
        op(Ldx, Absolute, 3, 4, false),
        ILL,
        // 0xB0
        op(Bcs, Relative, 2, 2, false),
        op(Lda, IndirectIndexed, 2, 5, true),
        ILL,
        ILL,
        op(Ldy, ZeroPageX, 2, 4, false),
        op(Lda, ZeroPageX, 2, 4, false),
        op(Ldx, ZeroPageY, 2, 4, false),
        ILL,
        op(Clv, Implied, 1, 2, false),
        op(Lda, AbsoluteY, 3, 4, true),
        op(Tsx, Implied, 1, 2, false),
        ILL,
        op(Ldy, AbsoluteX, 3, 4, true),
        op(Lda, AbsoluteX, 3, 4, true),
        op(Ldx, AbsoluteY, 3, 4, true),
        ILL,
        // 0xC0
        op(Cpy, Immediate, 2, 2, false),
        op(Cmp, IndexedIndirect, 2, 6, false),
        ILL,
        ILL,
        op(Cpy, ZeroPage, 2, 3, false),
        op(Cmp, ZeroPage, 2, 3, false),
        op(Dec, ZeroPage, 2, 5, false),
        ILL,
        op(Iny, Implied, 1, 2, false),
        op(Cmp, Immediate, 2, 2, false),
        op(Dex, Implied, 1, 2, false),
        ILL,
        op(Cpy, Absolute, 3, 4, false),
        op(Cmp, Absolute, 3, 4, false),
        op(Dec, Absolute, 3, 6, false),
        ILL,
        // 0xD0
        op(Bne, Relative, 2, 2, false),
        op(Cmp, IndirectIndexed, 2, 5, true),
        ILL,
        ILL,
        ILL,
        op(Cmp, ZeroPageX, 2, 4, false),
        op(Dec, ZeroPageX, 2, 6, false),
        ILL,
        op(Cld, Implied, 1, 2, false),
        op(Cmp, AbsoluteY, 3, 4, true),
        ILL,
        ILL,
        ILL,
        op(Cmp, AbsoluteX, 3, 4, true),
        op(Dec, AbsoluteX, 3, 7, false),
        ILL,
        // 0xE0
        op(Cpx, Immediate, 2, 2, false),
        op(Sbc, IndexedIndirect, 2, 6, false),
        ILL,
        ILL,
        op(Cpx, ZeroPage, 2, 3, false),
        op(Sbc, ZeroPage, 2, 3, false),
        op(Inc, ZeroPage, 2, 5, false),
        ILL,
        op(Inx, Implied, 1, 2, false),
        op(Sbc, Immediate, 2, 2, false),
        op(Nop, Implied, 1, 2, false),
        ILL,
        op(Cpx, Absolute, 3, 4, false),
        op(Sbc, Absolute, 3, 4, false),
        op(Inc, Absolute, 3, 6, false),
        ILL,
        // 0xF0
        op(Beq, Relative, 2, 2, false),
        op(Sbc, IndirectIndexed, 2, 5, true),
        ILL,
        ILL,
        ILL,
        op(Sbc, ZeroPageX, 2, 4, false),
        op(Inc, ZeroPageX, 2, 6, false),
        ILL,
        op(Sed, Implied, 1, 2, false),
        op(Sbc, AbsoluteY, 3, 4, true),
        ILL,
        ILL,
        ILL,
        op(Sbc, AbsoluteX, 3, 4, true),
        op(Inc, AbsoluteX, 3, 7, false),
        ILL,
    ]
};
