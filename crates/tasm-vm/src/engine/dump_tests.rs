use tasm_bytecode::{Cell, Program};

use super::*;

#[test]
fn ram_skips_zero_rows() {
    let mut machine = Machine::new().unwrap();
    assert_eq!(ram(&machine), "(all cells zero)");

    machine.ram[5] = Cell::from_i64(7);
    machine.ram[127] = Cell::from_i64(-1);
    insta::assert_snapshot!(ram(&machine), @r"
    [004] 0 7 0 0
    [124] 0 0 0 -1
    ");
}

#[test]
fn framebuffer_shows_written_chunks() {
    let mut machine = Machine::new().unwrap();
    assert_eq!(framebuffer(&machine), "(blank)");

    machine.vram[SCREEN_WIDTH + 2] = b'h';
    machine.vram[SCREEN_WIDTH + 3] = b'i';
    machine.vram[SCREEN_WIDTH + 4] = 0x07;
    let expected = format!("row  1 col   0 |  hi.{}|", " ".repeat(27));
    assert_eq!(framebuffer(&machine), expected);
}

#[test]
fn registers_four_per_row() {
    let mut machine = Machine::new().unwrap();
    machine.x[5] = -12;
    machine.fx[1] = 0.5;

    let text = registers(&machine);
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows.len(), 6);
    assert!(rows[0].starts_with("x0 "));
    assert!(rows[1].contains("x5") && rows[1].contains("-12"));
    assert!(rows[4].starts_with("fx0 "));
    assert!(rows[4].contains("0.500000"));
}

#[test]
fn state_has_every_section() {
    let program = Program::from_code(vec![0, 0, 1, 0]).unwrap();
    let mut vm = VM::builder(&program).build().unwrap();
    vm.step().unwrap();

    let text = state(&vm);
    assert!(text.starts_with("=== VM STATE DUMP ==="));
    assert!(text.contains("version : 0.4"));
    assert!(text.contains("pc      : 0x0002 / 0x0004"));
    for section in ["--- registers ---", "--- ram ---", "--- framebuffer ---", "--- code ---"] {
        assert!(text.contains(section), "missing {section}");
    }
    assert!(text.contains("=== STACK DUMP `operand` ==="));
    assert!(text.contains("=== STACK DUMP `return` ==="));
    assert!(text.contains("> 0000: 00 00 01 00"));
    assert!(text.ends_with("=== END VM STATE DUMP ==="));
}
