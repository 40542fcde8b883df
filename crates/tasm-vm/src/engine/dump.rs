//! State dump renderers.
//!
//! Every renderer returns a `String`; [`VM::dump`] routes the result through
//! `tracing`.

use std::fmt::Write as _;

use tasm_bytecode::dump::code_window;

use super::machine::{BLANK, Machine, SCREEN_WIDTH};
use super::vm::VM;

const REGISTERS_PER_ROW: usize = 4;
const RAM_CELLS_PER_ROW: usize = 4;
const FRAMEBUFFER_CHUNK: usize = 32;
const CODE_CONTEXT_ROWS: usize = 1;

/// Integer then float registers, four per row.
pub fn registers(machine: &Machine) -> String {
    let mut out = String::new();
    for (row, chunk) in machine.x.chunks(REGISTERS_PER_ROW).enumerate() {
        let cells: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let name = format!("x{}", row * REGISTERS_PER_ROW + i);
                format!("{name:<4} {value:>20}")
            })
            .collect();
        writeln!(out, "{}", cells.join("  ")).unwrap();
    }
    for (row, chunk) in machine.fx.chunks(REGISTERS_PER_ROW).enumerate() {
        let cells: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let name = format!("fx{}", row * REGISTERS_PER_ROW + i);
                format!("{name:<4} {value:>20.6}")
            })
            .collect();
        writeln!(out, "{}", cells.join("  ")).unwrap();
    }
    out.pop();
    out
}

/// RAM rows of four cells. All-zero rows are skipped.
pub fn ram(machine: &Machine) -> String {
    let mut out = String::new();
    for (row, chunk) in machine.ram.chunks(RAM_CELLS_PER_ROW).enumerate() {
        if chunk.iter().all(|cell| cell.as_u64() == 0) {
            continue;
        }
        let values: Vec<String> = chunk.iter().map(|c| c.as_i64().to_string()).collect();
        writeln!(out, "[{:03}] {}", row * RAM_CELLS_PER_ROW, values.join(" ")).unwrap();
    }
    if out.is_empty() {
        out.push_str("(all cells zero)");
    } else {
        out.pop();
    }
    out
}

/// Framebuffer in 32-byte chunks. Blank chunks are skipped.
pub fn framebuffer(machine: &Machine) -> String {
    let mut out = String::new();
    for (i, chunk) in machine.vram.chunks(FRAMEBUFFER_CHUNK).enumerate() {
        if chunk.iter().all(|&b| b == BLANK) {
            continue;
        }
        let offset = i * FRAMEBUFFER_CHUNK;
        let text: String = chunk
            .iter()
            .map(|&b| {
                if b.is_ascii_graphic() || b == b' ' {
                    b as char
                } else {
                    '.'
                }
            })
            .collect();
        writeln!(
            out,
            "row {:>2} col {:>3} |{text}|",
            offset / SCREEN_WIDTH,
            offset % SCREEN_WIDTH
        )
        .unwrap();
    }
    if out.is_empty() {
        out.push_str("(blank)");
    } else {
        out.pop();
    }
    out
}

/// Full machine state: program counter, registers, stacks, RAM, framebuffer, code.
pub fn state<I, O>(vm: &VM<'_, I, O>) -> String {
    let machine = &vm.machine;
    let mut out = String::new();
    writeln!(out, "=== VM STATE DUMP ===").unwrap();
    writeln!(out, "version : {}", vm.version).unwrap();
    writeln!(out, "pc      : {:#06x} / {:#06x}", vm.pc, vm.code.len()).unwrap();
    writeln!(out, "--- registers ---\n{}", registers(machine)).unwrap();
    writeln!(out, "{}", machine.operand_dump()).unwrap();
    writeln!(out, "{}", machine.return_dump()).unwrap();
    writeln!(out, "--- ram ---\n{}", ram(machine)).unwrap();
    writeln!(out, "--- framebuffer ---\n{}", framebuffer(machine)).unwrap();
    writeln!(
        out,
        "--- code ---\n{}",
        code_window(vm.code, vm.pc, CODE_CONTEXT_ROWS)
    )
    .unwrap();
    write!(out, "=== END VM STATE DUMP ===").unwrap();
    out
}

#[cfg(test)]
#[path = "dump_tests.rs"]
mod dump_tests;
