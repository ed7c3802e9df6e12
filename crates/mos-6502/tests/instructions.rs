//! Instruction behavior tests driven by small machine-code programs.

use emu_core::{Cpu, FlatMemory, Memory};
use mos_6502::{Mos6502, RESET_VECTOR, flags};

/// Load `program` at `origin`, point the reset vector at it, and reset.
fn setup(origin: u16, program: &[u8]) -> (Mos6502, FlatMemory) {
    let mut memory = FlatMemory::new();
    memory.load(origin, program);
    memory.write16(RESET_VECTOR, origin);
    let mut cpu = Mos6502::new();
    cpu.reset(&mut memory);
    (cpu, memory)
}

/// Step `count` instructions, returning the summed cycle counts.
fn run(cpu: &mut Mos6502, memory: &mut FlatMemory, count: usize) -> u64 {
    let mut total = 0;
    for step in 0..count {
        let cycles = cpu
            .step(memory)
            .unwrap_or_else(|err| panic!("step {step}: {err}"));
        total += u64::from(cycles);
    }
    total
}

#[test]
fn test_lda_immediate() {
    let (mut cpu, mut memory) = setup(0x0400, &[0xA9, 0x42]); // LDA #$42
    let cycles = run(&mut cpu, &mut memory, 1);

    assert_eq!(cycles, 2);
    assert_eq!(cpu.a(), 0x42);
    assert!(!cpu.regs.p.is_set(flags::Z));
    assert!(!cpu.regs.p.is_set(flags::N));
}

#[test]
fn test_lda_zero_and_negative_flags() {
    let (mut cpu, mut memory) = setup(0x0400, &[0xA9, 0x00, 0xA9, 0x80]);
    run(&mut cpu, &mut memory, 1);
    assert!(cpu.regs.p.is_set(flags::Z), "Z set for $00");

    run(&mut cpu, &mut memory, 1);
    assert!(!cpu.regs.p.is_set(flags::Z));
    assert!(cpu.regs.p.is_set(flags::N), "N set for $80");
}

#[test]
fn test_adc_signed_overflow() {
    // LDA #$50; ADC #$50: 0x50 + 0x50 overflows into the sign bit
    let (mut cpu, mut memory) = setup(0x0400, &[0xA9, 0x50, 0x69, 0x50]);
    run(&mut cpu, &mut memory, 2);

    assert_eq!(cpu.a(), 0xA0);
    assert!(cpu.regs.p.is_set(flags::V), "signed overflow");
    assert!(!cpu.regs.p.is_set(flags::C), "no unsigned carry");
    assert!(cpu.regs.p.is_set(flags::N));
    assert!(!cpu.regs.p.is_set(flags::Z));
}

#[test]
fn test_adc_carry_wraps() {
    let (mut cpu, mut memory) = setup(0x0400, &[0xA9, 0xFF, 0x69, 0x01]);
    run(&mut cpu, &mut memory, 2);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.regs.p.is_set(flags::C));
    assert!(cpu.regs.p.is_set(flags::Z));
}

#[test]
fn test_adc_uses_incoming_carry() {
    // SEC; LDA #$01; ADC #$01 = 3 with the carry in
    let (mut cpu, mut memory) = setup(0x0400, &[0x38, 0xA9, 0x01, 0x69, 0x01]);
    run(&mut cpu, &mut memory, 3);
    assert_eq!(cpu.a(), 0x03);
}

#[test]
fn test_sbc_takes_borrow() {
    // SEC; LDA #$50; SBC #$B0: subtrahend exceeds A, so carry clears
    let (mut cpu, mut memory) = setup(0x0400, &[0x38, 0xA9, 0x50, 0xE9, 0xB0]);
    run(&mut cpu, &mut memory, 3);

    assert_eq!(cpu.a(), 0xA0);
    assert!(!cpu.regs.p.is_set(flags::C), "borrow occurred");
    assert!(cpu.regs.p.is_set(flags::V));
    assert!(cpu.regs.p.is_set(flags::N));
}

#[test]
fn test_sbc_without_borrow() {
    // SEC; LDA #$50; SBC #$10
    let (mut cpu, mut memory) = setup(0x0400, &[0x38, 0xA9, 0x50, 0xE9, 0x10]);
    run(&mut cpu, &mut memory, 3);

    assert_eq!(cpu.a(), 0x40);
    assert!(cpu.regs.p.is_set(flags::C), "no borrow");
    assert!(!cpu.regs.p.is_set(flags::V));
}

#[test]
fn test_asl_shifts_top_bit_into_carry() {
    let (mut cpu, mut memory) = setup(0x0400, &[0xA9, 0x80, 0x0A]); // LDA #$80; ASL A
    run(&mut cpu, &mut memory, 2);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.regs.p.is_set(flags::C));
    assert!(cpu.regs.p.is_set(flags::Z));
}

#[test]
fn test_ror_shifts_bottom_bit_into_carry() {
    // Carry is clear after reset; ROR $01 -> $00 with carry out
    let (mut cpu, mut memory) = setup(0x0400, &[0xA9, 0x01, 0x6A]); // LDA #$01; ROR A
    run(&mut cpu, &mut memory, 2);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.regs.p.is_set(flags::C));
    assert!(cpu.regs.p.is_set(flags::Z));
}

#[test]
fn test_rol_rotates_carry_in() {
    // SEC; LDA #$40; ROL A -> $81, carry out clear
    let (mut cpu, mut memory) = setup(0x0400, &[0x38, 0xA9, 0x40, 0x2A]);
    run(&mut cpu, &mut memory, 3);

    assert_eq!(cpu.a(), 0x81);
    assert!(!cpu.regs.p.is_set(flags::C));
    assert!(cpu.regs.p.is_set(flags::N));
}

#[test]
fn test_inc_dec_memory() {
    let (mut cpu, mut memory) = setup(0x0400, &[0xE6, 0x10, 0xC6, 0x11]); // INC $10; DEC $11
    memory.write(0x0010, 0x7F);
    memory.write(0x0011, 0x01);
    run(&mut cpu, &mut memory, 2);

    assert_eq!(memory.peek(0x0010), 0x80);
    assert_eq!(memory.peek(0x0011), 0x00);
    assert!(cpu.regs.p.is_set(flags::Z), "Z from the DEC result");
}

#[test]
fn test_bit_copies_operand_bits() {
    let (mut cpu, mut memory) = setup(0x0400, &[0xA9, 0x01, 0x24, 0x10]); // LDA #$01; BIT $10
    memory.write(0x0010, 0xC0);
    run(&mut cpu, &mut memory, 2);

    assert!(cpu.regs.p.is_set(flags::N), "N from operand bit 7");
    assert!(cpu.regs.p.is_set(flags::V), "V from operand bit 6");
    assert!(cpu.regs.p.is_set(flags::Z), "A & operand is zero");
    assert_eq!(cpu.a(), 0x01, "A is not modified");
}

#[test]
fn test_compare_sets_carry_on_greater_equal() {
    let (mut cpu, mut memory) = setup(0x0400, &[0xA9, 0x40, 0xC9, 0x40, 0xC9, 0x41]);
    run(&mut cpu, &mut memory, 2); // LDA #$40; CMP #$40
    assert!(cpu.regs.p.is_set(flags::C));
    assert!(cpu.regs.p.is_set(flags::Z));

    run(&mut cpu, &mut memory, 1); // CMP #$41
    assert!(!cpu.regs.p.is_set(flags::C));
    assert!(cpu.regs.p.is_set(flags::N), "N from $40 - $41 = $FF");
}

#[test]
fn test_branch_not_taken_costs_base_cycles() {
    let (mut cpu, mut memory) = setup(0x0400, &[0xA9, 0x00, 0xD0, 0x05]); // LDA #$00; BNE +5
    run(&mut cpu, &mut memory, 1);
    let cycles = run(&mut cpu, &mut memory, 1);

    assert_eq!(cycles, 2);
    assert_eq!(Cpu::<FlatMemory>::pc(&cpu), 0x0404, "fall through");
}

#[test]
fn test_branch_taken_same_page_costs_one_extra() {
    let (mut cpu, mut memory) = setup(0x0400, &[0xA9, 0x01, 0xD0, 0x05]); // LDA #$01; BNE +5
    run(&mut cpu, &mut memory, 1);
    let cycles = run(&mut cpu, &mut memory, 1);

    assert_eq!(cycles, 3);
    assert_eq!(Cpu::<FlatMemory>::pc(&cpu), 0x0409);
}

#[test]
fn test_branch_taken_across_page_costs_two_extra() {
    // BNE at $04F2 falls through to $04F4; target $0512 is on the next page
    let (mut cpu, mut memory) = setup(0x04F0, &[0xA9, 0x01, 0xD0, 0x20]);
    run(&mut cpu, &mut memory, 1);
    let cycles = run(&mut cpu, &mut memory, 1);

    assert_eq!(cycles, 4);
    assert_eq!(Cpu::<FlatMemory>::pc(&cpu), 0x0512);
}

#[test]
fn test_branch_backward() {
    // LDX #$02; DEX; BNE -3 loops until X reaches zero
    let (mut cpu, mut memory) = setup(0x0400, &[0xA2, 0x02, 0xCA, 0xD0, 0xFD]);
    run(&mut cpu, &mut memory, 5);

    assert_eq!(cpu.x(), 0x00);
    assert_eq!(Cpu::<FlatMemory>::pc(&cpu), 0x0405);
}

#[test]
fn test_jmp_indirect_page_wrap_bug() {
    // Pointer stored at $10FF/$1100; the high byte must come from $1000
    let (mut cpu, mut memory) = setup(0x0400, &[0x6C, 0xFF, 0x10]); // JMP ($10FF)
    memory.write(0x10FF, 0x34);
    memory.write(0x1000, 0x12);
    memory.write(0x1100, 0x56); // what non-buggy arithmetic would read
    let cycles = run(&mut cpu, &mut memory, 1);

    assert_eq!(Cpu::<FlatMemory>::pc(&cpu), 0x1234);
    assert_eq!(cycles, 5);
}

#[test]
fn test_indexed_indirect_pointer_wraps_in_zero_page() {
    // LDX #$01; LDA ($FE,X): pointer at $FF with its high byte at $00
    let (mut cpu, mut memory) = setup(0x0400, &[0xA2, 0x01, 0xA1, 0xFE]);
    memory.write(0x00FF, 0x00);
    memory.write(0x0000, 0x30);
    memory.write(0x3000, 0x42);
    run(&mut cpu, &mut memory, 2);

    assert_eq!(cpu.a(), 0x42);
}

#[test]
fn test_indirect_indexed_page_cross_penalty() {
    // LDY #$01; LDA ($20),Y with the pointer at $30FF crosses into $3100
    let (mut cpu, mut memory) = setup(0x0400, &[0xA0, 0x01, 0xB1, 0x20]);
    memory.write(0x0020, 0xFF);
    memory.write(0x0021, 0x30);
    memory.write(0x3100, 0x42);
    run(&mut cpu, &mut memory, 1);
    let cycles = run(&mut cpu, &mut memory, 1);

    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cycles, 6, "5 base + 1 page-cross");
}

#[test]
fn test_zero_page_x_wraps_without_penalty() {
    // LDX #$10; LDA $F8,X reads $08, not $0108
    let (mut cpu, mut memory) = setup(0x0400, &[0xA2, 0x10, 0xB5, 0xF8]);
    memory.write(0x0008, 0x42);
    memory.write(0x0108, 0x99);
    run(&mut cpu, &mut memory, 1);
    let cycles = run(&mut cpu, &mut memory, 1);

    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cycles, 4, "never a page-cross penalty in page zero");
}

#[test]
fn test_lda_absolute_x_page_cross_penalty() {
    let (mut cpu, mut memory) = setup(0x0400, &[0xA2, 0x01, 0xBD, 0xFF, 0x10]);
    memory.write(0x1100, 0x42);
    run(&mut cpu, &mut memory, 1);
    let cycles = run(&mut cpu, &mut memory, 1); // LDA $10FF,X

    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cycles, 5);
}

#[test]
fn test_sta_absolute_x_has_no_conditional_penalty() {
    // Stores always pay the fixed 5 cycles, crossing or not
    let (mut cpu, mut memory) = setup(0x0400, &[0xA9, 0x42, 0xA2, 0x01, 0x9D, 0xFF, 0x10]);
    run(&mut cpu, &mut memory, 2);
    let cycles = run(&mut cpu, &mut memory, 1); // STA $10FF,X

    assert_eq!(memory.peek(0x1100), 0x42);
    assert_eq!(cycles, 5);
}

#[test]
fn test_stack_pha_pla() {
    // LDA #$42; LDX #$FF; TXS; PHA; LDA #$00; PLA
    let program = [0xA9, 0x42, 0xA2, 0xFF, 0x9A, 0x48, 0xA9, 0x00, 0x68];
    let (mut cpu, mut memory) = setup(0x0400, &program);
    run(&mut cpu, &mut memory, 6);

    assert_eq!(cpu.a(), 0x42, "PLA should restore A");
    assert_eq!(cpu.s(), 0xFF, "SP should be back to $FF after PLA");
}

#[test]
fn test_stack_php_plp() {
    // LDX #$FF; TXS; SEC; PHP; CLC; PLP
    let program = [0xA2, 0xFF, 0x9A, 0x38, 0x08, 0x18, 0x28];
    let (mut cpu, mut memory) = setup(0x0400, &program);
    run(&mut cpu, &mut memory, 4); // through PHP

    let pushed = memory.peek(0x01FF);
    assert_eq!(pushed & 0x30, 0x30, "PHP pushes B and U set");
    assert!(pushed & 0x01 != 0, "pushed carry");

    run(&mut cpu, &mut memory, 2); // CLC; PLP
    assert!(cpu.regs.p.is_set(flags::C), "PLP restored carry");
    assert_eq!(cpu.s(), 0xFF);
}

#[test]
fn test_plp_restores_break_bit_as_pulled() {
    // LDA #$FF; PHA; PLP: the pulled byte keeps B; bit 5 is forced
    let (mut cpu, mut memory) = setup(0x0400, &[0xA9, 0xFF, 0x48, 0x28]);
    run(&mut cpu, &mut memory, 3);

    assert_eq!(cpu.status(), 0xFF, "all bits as pulled, U forced");
}

#[test]
fn test_jsr_rts_round_trip() {
    let (mut cpu, mut memory) = setup(0x0400, &[0x20, 0x00, 0x05]); // JSR $0500
    memory.load(0x0500, &[0xA9, 0x42, 0x60]); // LDA #$42; RTS

    run(&mut cpu, &mut memory, 1);
    assert_eq!(Cpu::<FlatMemory>::pc(&cpu), 0x0500, "JSR jumps to the subroutine");
    assert_eq!(memory.peek(0x01FD), 0x04, "pushed return high byte");
    assert_eq!(memory.peek(0x01FC), 0x02, "pushed PC-1 low byte");

    run(&mut cpu, &mut memory, 2);
    assert_eq!(cpu.a(), 0x42);
    assert_eq!(Cpu::<FlatMemory>::pc(&cpu), 0x0403, "RTS resumes after the JSR");
}

#[test]
fn test_transfers() {
    // LDA #$80; TAX; TXS; TSX only TXS leaves flags alone
    let (mut cpu, mut memory) = setup(0x0400, &[0xA9, 0x80, 0xAA, 0x9A]);
    run(&mut cpu, &mut memory, 3);

    assert_eq!(cpu.x(), 0x80);
    assert_eq!(cpu.s(), 0x80);
    assert!(cpu.regs.p.is_set(flags::N), "TAX updated N, TXS left it");
}

#[test]
fn test_two_plus_two_program() {
    // LDA #2; ADC #2; STA $03 over a flat image with a zero reset vector
    let mut memory = FlatMemory::from_image(&[0xA9, 0x02, 0x69, 0x02, 0x85, 0x03]);
    let mut cpu = Mos6502::new();
    cpu.reset(&mut memory);
    assert_eq!(Cpu::<FlatMemory>::pc(&cpu), 0x0000);

    run(&mut cpu, &mut memory, 3);
    assert_eq!(memory.peek(0x0003), 0x04);
}

#[test]
fn test_shift_and_add_multiplication_routine() {
    // The classic 8x8 multiply: factor bits shift out of $20 while the
    // product accumulates through A and rotates back into $20.
    //
    //   LDA #$00        A9 00
    //   LDX #$08        A2 08
    //   LSR $20         46 20
    // loop:
    //   BCC noadd       90 03
    //   CLC             18
    //   ADC $21         65 21
    // noadd:
    //   ROR A           6A
    //   ROR $20         66 20
    //   DEX             CA
    //   BNE loop        D0 F5
    //   STA $23         85 23    ; product high byte
    //   LDA $20         A5 20
    //   STA $22         85 22    ; product low byte
    let program = [
        0xA9, 0x00, 0xA2, 0x08, 0x46, 0x20, 0x90, 0x03, 0x18, 0x65, 0x21, 0x6A, 0x66, 0x20,
        0xCA, 0xD0, 0xF5, 0x85, 0x23, 0xA5, 0x20, 0x85, 0x22,
    ];
    let (mut cpu, mut memory) = setup(0x0200, &program);
    memory.write(0x0020, 10);
    memory.write(0x0021, 10);

    // 3 setup + 8 iterations (5 or 7 instructions each) + 3 stores
    let cycles = run(&mut cpu, &mut memory, 50);

    assert_eq!(memory.peek(0x0022), 100, "10 x 10 low byte");
    assert_eq!(memory.peek(0x0023), 0, "10 x 10 high byte");
    assert_eq!(cycles, 145, "fixed cycle budget for this operand pair");
    assert_eq!(Cpu::<FlatMemory>::pc(&cpu), 0x0217, "stopped after the final store");
}
