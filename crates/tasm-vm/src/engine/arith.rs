//! Integer and float arithmetic, rounding and conversion.
//!
//! Binary operations pop the right-hand side first.

use std::io::{BufRead, Write};

use super::error::RuntimeError;
use super::vm::VM;

impl<I: BufRead, O: Write> VM<'_, I, O> {
    pub(super) fn int_binary(&mut self, op: fn(i64, i64) -> i64) -> Result<(), RuntimeError> {
        let rhs = self.machine.pop_int()?;
        let lhs = self.machine.pop_int()?;
        self.machine.push_int(op(lhs, rhs))
    }

    /// Both operands are consumed even when the divisor is zero.
    pub(super) fn int_div(&mut self) -> Result<(), RuntimeError> {
        let rhs = self.machine.pop_int()?;
        let lhs = self.machine.pop_int()?;
        if rhs == 0 {
            return Err(RuntimeError::DivisionByZero);
        }
        self.machine.push_int(lhs.wrapping_div(rhs))
    }

    pub(super) fn int_unary(&mut self, op: fn(i64) -> i64) -> Result<(), RuntimeError> {
        let value = self.machine.pop_int()?;
        self.machine.push_int(op(value))
    }

    pub(super) fn float_binary(&mut self, op: fn(f64, f64) -> f64) -> Result<(), RuntimeError> {
        let rhs = self.machine.pop_float()?;
        let lhs = self.machine.pop_float()?;
        self.machine.push_float(op(lhs, rhs))
    }

    pub(super) fn float_div(&mut self) -> Result<(), RuntimeError> {
        let rhs = self.machine.pop_float()?;
        let lhs = self.machine.pop_float()?;
        if rhs == 0.0 {
            return Err(RuntimeError::DivisionByZero);
        }
        self.machine.push_float(lhs / rhs)
    }

    pub(super) fn float_unary(&mut self, op: fn(f64) -> f64) -> Result<(), RuntimeError> {
        let value = self.machine.pop_float()?;
        self.machine.push_float(op(value))
    }

    pub(super) fn int_to_float(&mut self) -> Result<(), RuntimeError> {
        let value = self.machine.pop_int()?;
        self.machine.push_float(value as f64)
    }

    /// Floors first, so `-1.5` becomes `-2`. Saturates at the `i64` bounds.
    pub(super) fn float_to_int(&mut self) -> Result<(), RuntimeError> {
        let value = self.machine.pop_float()?;
        self.machine.push_int(value.floor() as i64)
    }
}
