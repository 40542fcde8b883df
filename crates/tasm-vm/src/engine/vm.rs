//! Virtual machine: fetch, decode, dispatch.

use std::io::{self, BufRead, Write};

use tracing::{Level, debug, info, trace};

use tasm_bytecode::{Instruction, Opcode, Program, Version, dump as bytecode_dump};
use tasm_core::emit_block;

use super::dump;
use super::error::RuntimeError;
use super::machine::Machine;

/// Builder for a [`VM`]. Input and output default to empty and discarded.
pub struct VMBuilder<'p, I, O> {
    program: &'p Program,
    input: I,
    output: O,
    trace: bool,
}

impl<'p, I: BufRead, O: Write> VMBuilder<'p, I, O> {
    /// Source for `IN`/`FIN` and sink for everything the program prints.
    pub fn io<I2: BufRead, O2: Write>(self, input: I2, output: O2) -> VMBuilder<'p, I2, O2> {
        VMBuilder {
            program: self.program,
            input,
            output,
            trace: self.trace,
        }
    }

    /// Dump the full state after every `CALL` and `RET`.
    pub fn trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn build(self) -> Result<VM<'p, I, O>, RuntimeError> {
        let machine = Machine::new()?;
        emit_block(
            Level::DEBUG,
            &bytecode_dump::header(self.program.header()),
        );

        Ok(VM {
            code: self.program.code(),
            version: self.program.version(),
            pc: 0,
            machine,
            input: self.input,
            output: self.output,
            trace: self.trace,
        })
    }
}

/// One execution of a loaded program.
pub struct VM<'p, I, O> {
    pub(crate) code: &'p [u8],
    pub(crate) version: Version,
    pub(crate) pc: usize,
    pub(crate) machine: Machine,
    pub(crate) input: I,
    pub(crate) output: O,
    pub(crate) trace: bool,
}

impl<'p> VM<'p, io::Empty, io::Sink> {
    pub fn builder(program: &'p Program) -> VMBuilder<'p, io::Empty, io::Sink> {
        VMBuilder {
            program,
            input: io::empty(),
            output: io::sink(),
            trace: false,
        }
    }
}

impl<'p, I: BufRead, O: Write> VM<'p, I, O> {
    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// Run until `HLT`, the end of the code, or the first fault.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        let mut steps = 0u64;
        while self.pc < self.code.len() {
            self.step()?;
            steps += 1;
        }
        self.output.flush()?;
        info!(steps, pc = self.pc, "execution finished");
        Ok(())
    }

    /// Execute one instruction.
    pub fn step(&mut self) -> Result<(), RuntimeError> {
        let at = self.pc;
        let instr = Instruction::decode(self.code, at)
            .map_err(|source| RuntimeError::Decode { pc: at, source })?;
        self.pc = at + instr.size();
        trace!("{}", bytecode_dump::step(at, &instr));

        self.dispatch(at, &instr)
    }

    fn dispatch(&mut self, at: usize, instr: &Instruction) -> Result<(), RuntimeError> {
        let arg = instr.operand();

        match instr.opcode {
            Opcode::Nop => {}
            Opcode::Hlt => {
                debug!(pc = at, "halt");
                self.pc = self.code.len();
            }
            Opcode::Push | Opcode::FPush => self.machine.push(arg)?,
            Opcode::Pop | Opcode::FPop => {
                self.machine.pop()?;
            }

            Opcode::Out => self.out_int(false)?,
            Opcode::TopOut => self.out_int(true)?,
            Opcode::In => self.in_int()?,
            Opcode::FOut => self.out_float(false)?,
            Opcode::FTopOut => self.out_float(true)?,
            Opcode::FIn => self.in_float()?,
            Opcode::Draw => self.draw()?,

            Opcode::Add => self.int_binary(i64::wrapping_add)?,
            Opcode::Sub => self.int_binary(i64::wrapping_sub)?,
            Opcode::Mul => self.int_binary(i64::wrapping_mul)?,
            Opcode::Div => self.int_div()?,
            Opcode::Sqrt => self.int_unary(|v| (v as f64).sqrt() as i64)?,
            Opcode::Sq => self.int_unary(|v| v.wrapping_mul(v))?,

            Opcode::FAdd => self.float_binary(|a, b| a + b)?,
            Opcode::FSub => self.float_binary(|a, b| a - b)?,
            Opcode::FMul => self.float_binary(|a, b| a * b)?,
            Opcode::FDiv => self.float_div()?,
            Opcode::FSqrt => self.float_unary(f64::sqrt)?,
            Opcode::FSq => self.float_unary(|v| v * v)?,
            Opcode::Floor => self.float_unary(f64::floor)?,
            Opcode::Ceil => self.float_unary(f64::ceil)?,
            Opcode::Round => self.float_unary(f64::round)?,
            Opcode::IToF => self.int_to_float()?,
            Opcode::FToI => self.float_to_int()?,

            Opcode::Jmp => self.jump(arg)?,
            Opcode::Jb => self.jump_if(arg, |a, b| a < b)?,
            Opcode::Jbe => self.jump_if(arg, |a, b| a <= b)?,
            Opcode::Ja => self.jump_if(arg, |a, b| a > b)?,
            Opcode::Jae => self.jump_if(arg, |a, b| a >= b)?,
            Opcode::Je => self.jump_if(arg, |a, b| a == b)?,
            Opcode::Jne => self.jump_if(arg, |a, b| a != b)?,
            Opcode::Call => {
                self.call(arg)?;
                self.trace_step(at, instr);
            }
            Opcode::Ret => {
                self.ret()?;
                self.trace_step(at, instr);
            }

            Opcode::Dump => self.dump(Level::INFO),

            Opcode::PushR => self.push_register(arg)?,
            Opcode::PopR => self.pop_register(arg)?,
            Opcode::FPushR => self.push_float_register(arg)?,
            Opcode::FPopR => self.pop_float_register(arg)?,
            Opcode::PushM => self.push_ram(arg)?,
            Opcode::PopM => self.pop_ram(arg)?,
            Opcode::PushVm => self.push_vram(arg)?,
            Opcode::PopVm => self.pop_vram(arg)?,
            Opcode::CleanVm => self.machine.clear_framebuffer(),
        }

        Ok(())
    }

    /// Emit the full machine state through `tracing`.
    pub fn dump(&self, level: Level) {
        emit_block(level, &dump::state(self));
    }

    fn trace_step(&self, at: usize, instr: &Instruction) {
        if !self.trace {
            return;
        }
        self.dump(Level::DEBUG);
        debug!("{}", bytecode_dump::step(at, instr));
    }
}

#[cfg(test)]
#[path = "vm_tests.rs"]
mod vm_tests;
