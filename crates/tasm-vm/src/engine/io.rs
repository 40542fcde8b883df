//! Console input, output and framebuffer rendering.

use std::io::{BufRead, Write};

use super::error::RuntimeError;
use super::machine::SCREEN_WIDTH;
use super::vm::VM;

const INT_PROMPT: &str = "Waiting for i64 input: ";
const FLOAT_PROMPT: &str = "Waiting for f64 input: ";

/// Cursor home, then clear to end of screen.
const CLEAR_SCREEN: &[u8] = b"\x1b[H\x1b[J";

impl<I: BufRead, O: Write> VM<'_, I, O> {
    /// Print `prompt` and read one line. The line terminator is stripped.
    fn read_value(&mut self, prompt: &str) -> Result<String, RuntimeError> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(RuntimeError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    pub(super) fn in_int(&mut self) -> Result<(), RuntimeError> {
        let text = self.read_value(INT_PROMPT)?;
        let value = text.parse::<i64>().map_err(|_| RuntimeError::Input(text))?;
        self.machine.push_int(value)
    }

    pub(super) fn in_float(&mut self) -> Result<(), RuntimeError> {
        let text = self.read_value(FLOAT_PROMPT)?;
        let value = text.parse::<f64>().map_err(|_| RuntimeError::Input(text))?;
        self.machine.push_float(value)
    }

    /// `keep` peeks instead of popping.
    pub(super) fn out_int(&mut self, keep: bool) -> Result<(), RuntimeError> {
        let cell = if keep {
            self.machine.top()?
        } else {
            self.machine.pop()?
        };
        writeln!(self.output, "{}", cell.as_i64())?;
        Ok(())
    }

    pub(super) fn out_float(&mut self, keep: bool) -> Result<(), RuntimeError> {
        let cell = if keep {
            self.machine.top()?
        } else {
            self.machine.pop()?
        };
        writeln!(self.output, "{:.6}", cell.as_f64())?;
        Ok(())
    }

    pub(super) fn draw(&mut self) -> Result<(), RuntimeError> {
        self.output.write_all(CLEAR_SCREEN)?;
        for row in self.machine.vram.chunks(SCREEN_WIDTH) {
            self.output.write_all(row)?;
            self.output.write_all(b"\n")?;
        }
        self.output.flush()?;
        Ok(())
    }
}
