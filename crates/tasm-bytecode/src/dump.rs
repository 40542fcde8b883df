//! Human-readable renderers for binaries and decoded steps.
//!
//! Renderers return plain `String`s; callers decide where the text goes.

use std::fmt::Write as _;

use crate::header::Header;
use crate::instruction::Instruction;

const BYTES_PER_ROW: usize = 16;

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn header(header: &Header) -> String {
    let mut out = String::new();
    writeln!(out, "magic     : {}", String::from_utf8_lossy(&header.magic)).unwrap();
    writeln!(out, "version   : {}", header.version).unwrap();
    write!(out, "code size : {} bytes", header.code_size).unwrap();
    out
}

/// One decoded step: offset, assembly form, raw bytes.
pub fn step(pc: usize, instr: &Instruction) -> String {
    format!("{pc:#06x}  {:<20} {}", instr.to_string(), hex(&instr.to_bytes()))
}

/// Code bytes around `pc`, 16 per row, `context` rows either side.
///
/// The row holding `pc` is marked with `>`.
pub fn code_window(code: &[u8], pc: usize, context: usize) -> String {
    let pc_row = pc / BYTES_PER_ROW;
    let first = pc_row.saturating_sub(context);
    let last = pc_row + context;

    let mut out = String::new();
    for (row, chunk) in code.chunks(BYTES_PER_ROW).enumerate() {
        if row < first || row > last {
            continue;
        }
        let marker = if row == pc_row { '>' } else { ' ' };
        writeln!(out, "{marker} {:04x}: {}", row * BYTES_PER_ROW, hex(chunk)).unwrap();
    }
    if out.is_empty() {
        writeln!(out, "  (pc {pc:#06x} outside {} code bytes)", code.len()).unwrap();
    }
    out.pop();
    out
}

#[cfg(test)]
#[path = "dump_tests.rs"]
mod dump_tests;
