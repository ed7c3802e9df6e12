//! Functional-test runner for flat 6502 program images.
//!
//! Loads a raw binary at address 0, resets the CPU through the image's own
//! vectors, and steps until the program traps (PC stuck in a tight loop),
//! hits an illegal opcode, or exhausts the instruction budget. Suitable for
//! Klaus Dormann-style functional test binaries, which signal failure by
//! looping in place.
//!
//! The memory map is flat RAM except for a joypad latch at $4016, so
//! programs that poll input can be exercised too.

use anyhow::{Context, Result};
use emu_core::{Cpu, FlatMemory, Memory};
use mos_6502::Mos6502;
use nes_joypad::Joypad;
use std::fs;
use std::process::ExitCode;

/// How many identical PC values in a row count as a trap.
const TRAP_THRESHOLD: u32 = 3;

/// Flat RAM with the controller latch mapped at $4016.
struct RunnerMemory {
    ram: FlatMemory,
    joypad: Joypad,
}

impl RunnerMemory {
    fn from_image(image: &[u8]) -> Self {
        Self {
            ram: FlatMemory::from_image(image),
            joypad: Joypad::new(),
        }
    }
}

impl Memory for RunnerMemory {
    fn read(&mut self, address: u16) -> u8 {
        match address {
            0x4016 => self.joypad.read(),
            0x4017 => 0, // no second controller
            _ => self.ram.read(address),
        }
    }

    fn write(&mut self, address: u16, value: u8) {
        match address {
            0x4016 => self.joypad.write_control(value),
            _ => self.ram.write(address, value),
        }
    }
}

fn dump_state(cpu: &Mos6502, memory: &RunnerMemory) {
    println!(
        "  A=${:02X} X=${:02X} Y=${:02X} S=${:02X} P=${:02X}",
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.s(),
        cpu.status()
    );
    println!("  Memory around PC:");
    let start = Cpu::<RunnerMemory>::pc(cpu).saturating_sub(8);
    print!("  ");
    for offset in 0..16 {
        print!("{:02X} ", memory.ram.peek(start.wrapping_add(offset)));
    }
    println!();
}

fn run() -> Result<ExitCode> {
    let mut args = std::env::args().skip(1);
    let image_path = args.next().context(
        "usage: m6502-test-runner <image.bin> [max-instructions]\n\
         The image is loaded at $0000 and must supply its own reset vector.",
    )?;
    let budget: u64 = match args.next() {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid instruction budget: {raw}"))?,
        None => 100_000_000,
    };

    let image = fs::read(&image_path)
        .with_context(|| format!("failed to load program image {image_path}"))?;
    println!("Image: {image_path} ({} bytes)", image.len());

    let mut memory = RunnerMemory::from_image(&image);
    let mut cpu = Mos6502::new();
    cpu.reset(&mut memory);
    log::info!("starting at PC=${:04X}", Cpu::<RunnerMemory>::pc(&cpu));

    let mut last_pc = Cpu::<RunnerMemory>::pc(&cpu);
    let mut stuck = 0;
    let mut instructions: u64 = 0;

    while instructions < budget {
        match cpu.step(&mut memory) {
            Ok(_) => instructions += 1,
            Err(err) => {
                println!("Stopped: {err}");
                dump_state(&cpu, &memory);
                return Ok(ExitCode::FAILURE);
            }
        }

        if Cpu::<RunnerMemory>::pc(&cpu) == last_pc {
            stuck += 1;
            if stuck >= TRAP_THRESHOLD {
                println!("TRAP detected at PC=${:04X}", Cpu::<RunnerMemory>::pc(&cpu));
                println!("The program is looping in place, which these test");
                println!("binaries use to flag a failed check.");
                dump_state(&cpu, &memory);
                println!("  Instructions executed: {instructions}");
                return Ok(ExitCode::FAILURE);
            }
        } else {
            stuck = 0;
        }
        last_pc = Cpu::<RunnerMemory>::pc(&cpu);
    }

    println!("Instruction budget exhausted without a trap.");
    println!("  Instructions executed: {instructions}");
    println!("  Total cycles: {}", cpu.cycles());
    println!("  Final PC: ${:04X}", Cpu::<RunnerMemory>::pc(&cpu));
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    run()
}
