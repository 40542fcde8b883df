//! Instruction catalog.
//!
//! Identities are grouped with gaps left for future instructions:
//! - 0-9: misc stack and I/O
//! - 10-15: integer arithmetic
//! - 16-22: control flow
//! - 23: diagnostics
//! - 33-39: register transfer and memory
//! - 64-91: float variants, rounding and conversion

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::header::{VERSION, Version};

/// Upper bound on operands per instruction in the wire format.
pub const MAX_OPERANDS: usize = 4;

/// Longest accepted mnemonic, in bytes.
pub const MAX_MNEMONIC_LEN: usize = 15;

/// How an instruction interprets its operand cells. Drives disassembly only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandKind {
    Int,
    Float,
    Register,
    /// Register whose value is the address.
    Indirect,
    /// Byte offset into the code.
    Target,
}

/// Static description of one instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descriptor {
    pub mnemonic: &'static str,
    pub opcode: Opcode,
    pub operands: u8,
    pub kind: OperandKind,
}

macro_rules! instruction_set {
    ($($variant:ident = $id:literal, $mnemonic:literal, $operands:literal, $kind:ident;)*) => {
        /// Instruction identity as stored in the first byte of every encoded instruction.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum Opcode {
            $($variant = $id,)*
        }

        impl Opcode {
            pub fn from_u8(byte: u8) -> Option<Self> {
                match byte {
                    $($id => Some(Opcode::$variant),)*
                    _ => None,
                }
            }

            pub fn descriptor(self) -> &'static Descriptor {
                match self {
                    $(Opcode::$variant => &Descriptor {
                        mnemonic: $mnemonic,
                        opcode: Opcode::$variant,
                        operands: $operands,
                        kind: OperandKind::$kind,
                    },)*
                }
            }
        }

        /// Every instruction, in identity order.
        pub static CATALOG: &[Descriptor] = &[
            $(Descriptor {
                mnemonic: $mnemonic,
                opcode: Opcode::$variant,
                operands: $operands,
                kind: OperandKind::$kind,
            },)*
        ];
    };
}

instruction_set! {
    Nop = 0, "NOP", 0, Int;
    Hlt = 1, "HLT", 0, Int;
    Push = 2, "PUSH", 1, Int;
    Pop = 3, "POP", 0, Int;
    Out = 4, "OUT", 0, Int;
    TopOut = 5, "TOPOUT", 0, Int;
    In = 6, "IN", 0, Int;
    Call = 7, "CALL", 1, Target;
    Ret = 8, "RET", 0, Int;
    Draw = 9, "DRAW", 0, Int;

    Add = 10, "ADD", 0, Int;
    Sub = 11, "SUB", 0, Int;
    Mul = 12, "MUL", 0, Int;
    Div = 13, "DIV", 0, Int;
    Sqrt = 14, "SQRT", 0, Int;
    Sq = 15, "SQ", 0, Int;

    Jmp = 16, "JMP", 1, Target;
    Jb = 17, "JB", 1, Target;
    Jbe = 18, "JBE", 1, Target;
    Ja = 19, "JA", 1, Target;
    Jae = 20, "JAE", 1, Target;
    Je = 21, "JE", 1, Target;
    Jne = 22, "JNE", 1, Target;

    Dump = 23, "DUMP", 0, Int;

    PushR = 33, "PUSHR", 1, Register;
    PopR = 34, "POPR", 1, Register;
    PushM = 35, "PUSHM", 1, Indirect;
    PopM = 36, "POPM", 1, Indirect;
    PushVm = 37, "PUSHVM", 1, Indirect;
    PopVm = 38, "POPVM", 1, Indirect;
    CleanVm = 39, "CLEANVM", 0, Int;

    FAdd = 64, "FADD", 0, Int;
    FSub = 65, "FSUB", 0, Int;
    FMul = 66, "FMUL", 0, Int;
    FDiv = 67, "FDIV", 0, Int;
    FSqrt = 68, "FSQRT", 0, Int;
    FSq = 69, "FSQ", 0, Int;
    FIn = 70, "FIN", 0, Int;
    FOut = 71, "FOUT", 0, Int;
    FTopOut = 72, "FTOPOUT", 0, Int;
    FPush = 74, "FPUSH", 1, Float;
    FPop = 75, "FPOP", 0, Int;
    FPushR = 76, "FPUSHR", 1, Register;
    FPopR = 77, "FPOPR", 1, Register;

    Floor = 80, "FLOOR", 0, Int;
    Ceil = 81, "CEIL", 0, Int;
    Round = 82, "ROUND", 0, Int;

    IToF = 90, "ITOF", 0, Int;
    FToI = 91, "FTOI", 0, Int;
}

fn by_mnemonic() -> &'static HashMap<&'static str, Opcode> {
    static INDEX: OnceLock<HashMap<&'static str, Opcode>> = OnceLock::new();
    INDEX.get_or_init(|| {
        CATALOG
            .iter()
            .map(|desc| (desc.mnemonic, desc.opcode))
            .collect()
    })
}

/// Descriptor for a raw identity byte, `None` for unused slots.
pub fn lookup(id: u8) -> Option<&'static Descriptor> {
    Opcode::from_u8(id).map(Opcode::descriptor)
}

/// Full-table iteration in identity order.
pub fn catalog() -> impl Iterator<Item = &'static Descriptor> {
    CATALOG.iter()
}

pub fn runtime_version() -> Version {
    VERSION
}

impl Opcode {
    /// Exact, case-sensitive mnemonic lookup.
    ///
    /// `HashMap` compares the stored key after the hash matches, so a hash
    /// collision can never map a mnemonic to the wrong instruction.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        by_mnemonic().get(mnemonic).copied()
    }

    pub fn mnemonic(self) -> &'static str {
        self.descriptor().mnemonic
    }

    pub fn operand_count(self) -> u8 {
        self.descriptor().operands
    }

    pub fn operand_kind(self) -> OperandKind {
        self.descriptor().kind
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod catalog_tests;
