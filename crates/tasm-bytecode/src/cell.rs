//! Fixed-width tagged value.

use std::fmt;

use tasm_core::StackElement;

/// One 64-bit slot, readable as a signed integer, an unsigned integer or a float.
///
/// Operands, stack slots and RAM cells all share this representation. The
/// interpretation is chosen by the instruction that reads it.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Cell(u64);

impl Cell {
    pub const ZERO: Cell = Cell(0);

    pub const fn from_u64(bits: u64) -> Self {
        Cell(bits)
    }

    pub const fn from_i64(value: i64) -> Self {
        Cell(value as u64)
    }

    pub fn from_f64(value: f64) -> Self {
        Cell(value.to_bits())
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub const fn as_i64(self) -> i64 {
        self.0 as i64
    }

    pub fn as_f64(self) -> f64 {
        f64::from_bits(self.0)
    }

    pub const fn to_le_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    pub const fn from_le_bytes(bytes: [u8; 8]) -> Self {
        Cell(u64::from_le_bytes(bytes))
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::from_i64(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::from_f64(value)
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({:#018x})", self.0)
    }
}

impl StackElement for Cell {
    const SIZE: usize = 8;
    const ALIGN: usize = 8;

    fn write_to(&self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }

    fn read_from(bytes: &[u8]) -> Self {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        Cell::from_le_bytes(raw)
    }

    fn render(bytes: &[u8]) -> String {
        let cell = Self::read_from(bytes);
        format!("i64 {} | f64 {:e}", cell.as_i64(), cell.as_f64())
    }
}

#[cfg(test)]
#[path = "cell_tests.rs"]
mod cell_tests;
