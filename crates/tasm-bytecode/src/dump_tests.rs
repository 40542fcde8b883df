use super::*;
use crate::{Cell, Opcode};

#[test]
fn header_dump() {
    insta::assert_snapshot!(header(&Header::new(22)), @r"
    magic     : TASM
    version   : 0.4
    code size : 22 bytes
    ");
}

#[test]
fn step_dump() {
    let instr = Instruction::new(Opcode::Push, &[Cell::from_i64(5)]).unwrap();
    insta::assert_snapshot!(step(12, &instr), @"0x000c  PUSH 5               02 01 05 00 00 00 00 00 00 00");
}

#[test]
fn code_window_marks_pc_row() {
    let code: Vec<u8> = (0..40).collect();
    insta::assert_snapshot!(code_window(&code, 20, 1), @r"
      0000: 00 01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f
    > 0010: 10 11 12 13 14 15 16 17 18 19 1a 1b 1c 1d 1e 1f
      0020: 20 21 22 23 24 25 26 27
    ");
}

#[test]
fn code_window_limits_context() {
    let code = vec![0u8; 100];
    let window = code_window(&code, 80, 0);
    assert_eq!(window.lines().count(), 1);
    assert!(window.starts_with("> 0050:"));
}

#[test]
fn code_window_outside_code() {
    assert_eq!(code_window(&[1, 0], 64, 1), "  (pc 0x0040 outside 2 code bytes)");
}
