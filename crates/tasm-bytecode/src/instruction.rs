//! Instruction encoding.
//!
//! Wire layout of one instruction:
//! - byte 0: opcode
//! - byte 1: operand count
//! - then `count` little-endian 8-byte cells
//!
//! The count byte must equal the catalog's declared count on both sides of the
//! codec.

use std::fmt;

use tasm_core::ErrorKind;

use crate::catalog::{MAX_OPERANDS, Opcode, OperandKind};
use crate::cell::Cell;

/// Opcode byte plus operand-count byte.
pub const INSTRUCTION_HEADER_SIZE: usize = 2;

/// Width of one operand cell on the wire.
pub const CELL_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("truncated instruction header")]
    TruncatedHeader,

    #[error("unknown opcode {0:#04x}")]
    UnknownOpcode(u8),

    #[error("{count} operands exceeds the limit of 4")]
    TooManyOperands { count: u8 },

    #[error("{opcode} expects {expected} operands, found {found}")]
    OperandCountMismatch {
        opcode: Opcode,
        expected: u8,
        found: u8,
    },

    #[error("truncated operands: need {needed} bytes, {available} available")]
    TruncatedOperands { needed: usize, available: usize },
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::UnknownOpcode(_) | DecodeError::OperandCountMismatch { .. } => {
                ErrorKind::BadArgument
            }
            DecodeError::TruncatedHeader
            | DecodeError::TooManyOperands { .. }
            | DecodeError::TruncatedOperands { .. } => ErrorKind::Corruption,
        }
    }
}

/// One decoded instruction with its operand cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    operands: [Cell; MAX_OPERANDS],
    count: u8,
}

impl Instruction {
    /// Build an instruction, rejecting operand lists that disagree with the catalog.
    pub fn new(opcode: Opcode, operands: &[Cell]) -> Result<Self, DecodeError> {
        let expected = opcode.operand_count();
        if operands.len() != expected as usize {
            return Err(DecodeError::OperandCountMismatch {
                opcode,
                expected,
                found: u8::try_from(operands.len()).unwrap_or(u8::MAX),
            });
        }

        let mut cells = [Cell::ZERO; MAX_OPERANDS];
        cells[..operands.len()].copy_from_slice(operands);
        Ok(Self {
            opcode,
            operands: cells,
            count: expected,
        })
    }

    pub fn operands(&self) -> &[Cell] {
        &self.operands[..self.count as usize]
    }

    /// First operand, or zero for instructions without one.
    pub fn operand(&self) -> Cell {
        self.operands[0]
    }

    /// Encoded size of any instruction with this opcode.
    pub fn size_of(opcode: Opcode) -> usize {
        INSTRUCTION_HEADER_SIZE + opcode.operand_count() as usize * CELL_SIZE
    }

    pub fn size(&self) -> usize {
        Self::size_of(self.opcode)
    }

    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.push(self.opcode as u8);
        out.push(self.count);
        for cell in self.operands() {
            out.extend_from_slice(&cell.to_le_bytes());
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        self.encode_into(&mut out);
        out
    }

    /// Decode the instruction starting at `pc`.
    pub fn decode(code: &[u8], pc: usize) -> Result<Self, DecodeError> {
        let rest = code.get(pc..).unwrap_or_default();
        let [op, count, body @ ..] = rest else {
            return Err(DecodeError::TruncatedHeader);
        };

        let opcode = Opcode::from_u8(*op).ok_or(DecodeError::UnknownOpcode(*op))?;
        if *count as usize > MAX_OPERANDS {
            return Err(DecodeError::TooManyOperands { count: *count });
        }

        let expected = opcode.operand_count();
        if *count != expected {
            return Err(DecodeError::OperandCountMismatch {
                opcode,
                expected,
                found: *count,
            });
        }

        let needed = *count as usize * CELL_SIZE;
        let body = body.get(..needed).ok_or(DecodeError::TruncatedOperands {
            needed,
            available: body.len(),
        })?;

        let mut operands = [Cell::ZERO; MAX_OPERANDS];
        for (cell, chunk) in operands.iter_mut().zip(body.chunks_exact(CELL_SIZE)) {
            let mut raw = [0u8; CELL_SIZE];
            raw.copy_from_slice(chunk);
            *cell = Cell::from_le_bytes(raw);
        }

        Ok(Self {
            opcode,
            operands,
            count: *count,
        })
    }
}

/// Assembly-like rendering: `PUSH 5`, `FPUSH 2.5`, `POPR x3`, `PUSHM [x1]`, `JMP @0x001a`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.opcode.mnemonic())?;
        for cell in self.operands() {
            match self.opcode.operand_kind() {
                OperandKind::Int => write!(f, " {}", cell.as_i64())?,
                OperandKind::Float => write!(f, " {}", cell.as_f64())?,
                OperandKind::Register => write!(f, " x{}", cell.as_u64())?,
                OperandKind::Indirect => write!(f, " [x{}]", cell.as_u64())?,
                OperandKind::Target => write!(f, " @{:#06x}", cell.as_u64())?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "instruction_tests.rs"]
mod instruction_tests;
