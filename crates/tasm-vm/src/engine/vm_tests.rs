use indoc::indoc;
use tasm_bytecode::{Cell, DecodeError, Program, ProgramError};
use tasm_core::ErrorKind;

use super::*;
use crate::engine::{BLANK, SCREEN_HEIGHT, SCREEN_WIDTH};

fn load(source: &str) -> Program {
    let image = tasm_compiler::assemble(source).unwrap();
    Program::from_bytes(&image).unwrap()
}

fn run_with_input(source: &str, input: &str) -> (Result<(), RuntimeError>, String) {
    let program = load(source);
    let mut vm = VM::builder(&program)
        .io(input.as_bytes(), Vec::new())
        .build()
        .unwrap();
    let result = vm.run();
    (result, String::from_utf8(vm.into_output()).unwrap())
}

fn run(source: &str) -> String {
    let (result, output) = run_with_input(source, "");
    result.unwrap();
    output
}

fn run_err(source: &str) -> RuntimeError {
    run_with_input(source, "").0.unwrap_err()
}

#[test]
fn push_add_out() {
    let output = run(indoc! {"
        PUSH 2
        PUSH 3
        ADD
        OUT
        HLT
    "});
    assert_eq!(output, "5\n");
}

#[test]
fn forward_jump_skips_output() {
    let output = run(indoc! {"
        JMP :end   ; skip the print
        PUSH 1
        OUT
        :end
        HLT
    "});
    assert_eq!(output, "");
}

#[test]
fn binary_ops_pop_rhs_first() {
    let output = run(indoc! {"
        PUSH 10
        PUSH 3
        SUB
        OUT
        PUSH 7
        PUSH 2
        DIV
        OUT
    "});
    assert_eq!(output, "7\n3\n");
}

#[test]
fn integer_arithmetic_wraps() {
    let output = run(indoc! {"
        PUSH 9223372036854775807
        PUSH 1
        ADD
        OUT
    "});
    assert_eq!(output, "-9223372036854775808\n");
}

#[test]
fn sqrt_truncates_and_sq_squares() {
    let output = run(indoc! {"
        PUSH 17
        SQRT
        OUT
        PUSH -6
        SQ
        OUT
    "});
    assert_eq!(output, "4\n36\n");
}

#[test]
fn division_by_zero_consumes_operands() {
    let program = load(indoc! {"
        PUSH 1
        PUSH 0
        DIV
        OUT
    "});
    let mut vm = VM::builder(&program)
        .io(std::io::empty(), Vec::new())
        .build()
        .unwrap();

    let err = vm.run().unwrap_err();
    assert!(matches!(err, RuntimeError::DivisionByZero));
    assert_eq!(err.kind(), ErrorKind::BadArgument);
    assert_eq!(vm.machine().operand_depth(), 0);
    assert!(vm.output().is_empty());
}

#[test]
fn counting_loop_with_register() {
    let output = run(indoc! {"
        PUSH 0
        POPR x0
        :loop
        PUSHR x0
        PUSH 1
        ADD
        POPR x0
        PUSHR x0
        TOPOUT
        PUSH 3
        JB :loop
        HLT
    "});
    assert_eq!(output, "1\n2\n3\n");
}

#[test]
fn conditional_jumps_compare_lhs_to_rhs() {
    let source = |jump: &str| {
        format!("PUSH 2\nPUSH 5\n{jump} :yes\nPUSH 0\nOUT\nHLT\n:yes\nPUSH 1\nOUT\n")
    };
    assert_eq!(run(&source("JB")), "1\n");
    assert_eq!(run(&source("JBE")), "1\n");
    assert_eq!(run(&source("JA")), "0\n");
    assert_eq!(run(&source("JAE")), "0\n");
    assert_eq!(run(&source("JE")), "0\n");
    assert_eq!(run(&source("JNE")), "1\n");
}

#[test]
fn call_pushes_return_address() {
    let program = load(indoc! {"
        CALL :double
        OUT
        HLT
        :double
        PUSH 21
        PUSH 2
        MUL
        RET
    "});
    let mut vm = VM::builder(&program)
        .io(std::io::empty(), Vec::new())
        .trace(true)
        .build()
        .unwrap();

    vm.run().unwrap();
    assert_eq!(vm.output().as_slice(), b"42\n");
    assert_eq!(vm.machine().return_depth(), 0);
    assert_eq!(vm.pc(), program.code().len());
}

#[test]
fn ret_on_empty_return_stack() {
    let err = run_err("RET\n");
    assert!(matches!(err, RuntimeError::StackUnderflow("return")));
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn pop_on_empty_operand_stack() {
    let err = run_err("OUT\n");
    assert!(matches!(err, RuntimeError::StackUnderflow("operand")));
}

#[test]
fn jump_beyond_code_is_rejected() {
    let err = run_err("JMP 1000\n");
    assert!(matches!(err, RuntimeError::JumpOutOfRange { target: 1000, len: 10 }));
    assert_eq!(err.kind(), ErrorKind::BadArgument);
}

#[test]
fn register_out_of_range_leaves_stack_untouched() {
    let program = load("PUSH 7\nPOPR x16\n");
    let mut vm = VM::builder(&program).build().unwrap();

    let err = vm.run().unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::RegisterOutOfRange {
            index: 16,
            limit: 16
        }
    ));
    assert_eq!(vm.machine().operand_depth(), 1);
}

#[test]
fn float_register_limit_is_eight() {
    let err = run_err("FPUSH 1.0\nFPOPR x8\n");
    assert!(matches!(
        err,
        RuntimeError::RegisterOutOfRange { index: 8, limit: 8 }
    ));
}

#[test]
fn ram_round_trip() {
    let program = load(indoc! {"
        PUSH 5
        POPR x1
        PUSH 99
        POPM [x1]
        PUSHM [x1]
        OUT
    "});
    let mut vm = VM::builder(&program)
        .io(std::io::empty(), Vec::new())
        .build()
        .unwrap();

    vm.run().unwrap();
    assert_eq!(vm.output().as_slice(), b"99\n");
    assert_eq!(vm.machine().ram()[5], Cell::from_i64(99));
}

#[test]
fn ram_address_out_of_range() {
    let err = run_err(indoc! {"
        PUSH 128
        POPR x0
        PUSH 1
        POPM [x0]
    "});
    assert!(matches!(
        err,
        RuntimeError::RamOutOfRange {
            addr: 128,
            limit: 128
        }
    ));
}

#[test]
fn framebuffer_write_and_draw() {
    let output = run(indoc! {"
        PUSH 'A'
        POPVM [x0]
        PUSHVM [x0]
        OUT
        DRAW
    "});

    let (printed, screen) = output.split_at(3);
    assert_eq!(printed, "65\n");
    let screen = screen.strip_prefix("\x1b[H\x1b[J").unwrap();
    let rows: Vec<&str> = screen.lines().collect();
    assert_eq!(rows.len(), SCREEN_HEIGHT);
    assert!(rows[0].starts_with("A "));
    assert_eq!(rows[0].len(), SCREEN_WIDTH);
    assert!(rows[1].bytes().all(|b| b == BLANK));
}

#[test]
fn popvm_keeps_low_byte_and_cleanvm_blanks() {
    let program = load(indoc! {"
        PUSH 3
        POPR x2
        PUSH 322
        POPVM [x2]
    "});
    let mut vm = VM::builder(&program).build().unwrap();
    vm.run().unwrap();
    assert_eq!(vm.machine().framebuffer()[3], 66);

    let program = load("PUSH 1\nPOPR x0\nPUSH 66\nPOPVM [x0]\nCLEANVM\n");
    let mut vm = VM::builder(&program).build().unwrap();
    vm.run().unwrap();
    assert!(vm.machine().framebuffer().iter().all(|&b| b == BLANK));
}

#[test]
fn float_arithmetic_and_output() {
    let output = run(indoc! {"
        FPUSH 1.5
        FPUSH 2
        FADD
        FOUT
        PUSH 3
        ITOF
        FPUSH 0.5
        FMUL
        FTOPOUT
        FPOP
        FPUSH 2.5
        ROUND
        FOUT
    "});
    assert_eq!(output, "3.500000\n1.500000\n3.000000\n");
}

#[test]
fn ftoi_floors() {
    let output = run(indoc! {"
        FPUSH -1.5
        FTOI
        OUT
        FPUSH 2.9
        FTOI
        OUT
    "});
    assert_eq!(output, "-2\n2\n");
}

#[test]
fn float_registers_round_trip() {
    let output = run(indoc! {"
        FPUSH 9.0
        FSQRT
        FPOPR fx3
        FPUSHR fx3
        FSQ
        FOUT
    "});
    assert_eq!(output, "9.000000\n");
}

#[test]
fn float_division_by_zero() {
    let err = run_err("FPUSH 1.0\nFPUSH 0.0\nFDIV\n");
    assert!(matches!(err, RuntimeError::DivisionByZero));
}

#[test]
fn integer_input_prompts_and_pushes() {
    let (result, output) = run_with_input("IN\nPUSH 1\nADD\nOUT\n", "12\n");
    result.unwrap();
    assert_eq!(output, "Waiting for i64 input: 13\n");
}

#[test]
fn float_input_prompts_and_pushes() {
    let (result, output) = run_with_input("FIN\nFOUT\n", "2.25\n");
    result.unwrap();
    assert_eq!(output, "Waiting for f64 input: 2.250000\n");
}

#[test]
fn bad_input_faults() {
    let (result, _) = run_with_input("IN\n", "abc\n");
    let err = result.unwrap_err();
    assert!(matches!(&err, RuntimeError::Input(text) if text == "abc"));
    assert_eq!(err.kind(), ErrorKind::BadArgument);

    let (result, _) = run_with_input("IN\n", "");
    assert!(matches!(result.unwrap_err(), RuntimeError::EndOfInput));
}

#[test]
fn falling_off_the_end_succeeds() {
    let program = load("PUSH 1\nNOP\n");
    let mut vm = VM::builder(&program).build().unwrap();
    vm.run().unwrap();
    assert_eq!(vm.pc(), program.code().len());
    assert_eq!(vm.machine().operand_depth(), 1);
}

#[test]
fn dump_does_not_disturb_state() {
    let output = run("PUSH 4\nDUMP\nTOPOUT\nTOPOUT\n");
    assert_eq!(output, "4\n4\n");
}

#[test]
fn unknown_opcode_is_bad_argument() {
    let program = Program::from_code(vec![200, 0]).unwrap();
    let mut vm = VM::builder(&program).build().unwrap();
    let err = vm.run().unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Decode {
            pc: 0,
            source: DecodeError::UnknownOpcode(200)
        }
    ));
    assert_eq!(err.kind(), ErrorKind::BadArgument);
}

#[test]
fn operand_count_mismatch_is_rejected() {
    let program = Program::from_code(vec![0, 0, 2, 0]).unwrap();
    let mut vm = VM::builder(&program).build().unwrap();
    let err = vm.run().unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Decode {
            pc: 2,
            source: DecodeError::OperandCountMismatch { .. }
        }
    ));
    assert_eq!(vm.pc(), 2);
}

#[test]
fn truncated_operands_are_corruption() {
    let program = Program::from_code(vec![2, 1, 0, 0]).unwrap();
    let mut vm = VM::builder(&program).build().unwrap();
    let err = vm.run().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn newer_binary_is_refused() {
    let mut image = tasm_compiler::assemble("HLT\n").unwrap();
    image[5] = 5;
    let err = Program::from_bytes(&image).unwrap_err();
    assert!(matches!(err, ProgramError::UnsupportedVersion { .. }));
    assert_eq!(err.kind(), ErrorKind::BadArgument);
}
