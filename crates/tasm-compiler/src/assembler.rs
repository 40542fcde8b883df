//! Two-pass assembler.
//!
//! Pass one walks the source computing instruction offsets and registering
//! labels; label references size as a zero placeholder. Pass two walks it
//! again with the table complete, encodes each instruction and writes it out.
//! The header goes out first with a zero code size and is rewritten once the
//! body is complete.

use std::io::{Cursor, Seek, SeekFrom, Write};
use std::ops::Range;

use tracing::{debug, info};

use tasm_bytecode::{Cell, HEADER_SIZE, Header, Instruction, dump};

use crate::error::{AsmError, LineError, Pass, SyntaxError};
use crate::labels::LabelTable;
use crate::parser::{Line, Operand, ParsedInstruction, parse_line};

/// One source line with its 1-based number and byte offset in the source.
struct SourceLine<'src> {
    number: usize,
    start: usize,
    text: &'src str,
}

fn source_lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    source
        .split_inclusive('\n')
        .scan(0, |start, text| {
            let line_start = *start;
            *start += text.len();
            Some((line_start, text))
        })
        .enumerate()
        .map(|(i, (start, text))| SourceLine {
            number: i + 1,
            start,
            text,
        })
}

pub struct Assembler<'src> {
    source: &'src str,
    labels: LabelTable,
}

impl<'src> Assembler<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            labels: LabelTable::new(),
        }
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Measure the code and fill the label table. Returns the code size.
    pub fn first_pass(&mut self) -> Result<usize, AsmError> {
        let mut offset = 0usize;

        for line in source_lines(self.source) {
            match parse(&line, Pass::First)? {
                Line::Blank => {}
                Line::Label { name, span } => {
                    self.labels
                        .define(name, offset)
                        .map_err(|error| syntax(Pass::First, &line, span, error))?;
                    debug!(pass = %Pass::First, line = line.number, offset, "label :{name}");
                }
                Line::Instruction(instr) => {
                    debug!(
                        pass = %Pass::First,
                        line = line.number,
                        offset,
                        "{}",
                        line.text.trim()
                    );
                    offset += Instruction::size_of(instr.opcode);
                }
            }
        }

        info!(
            code_size = offset,
            labels = self.labels.len(),
            "first pass done"
        );
        Ok(offset)
    }

    /// Encode every instruction into `out`. Returns the number of bytes written.
    pub fn second_pass<W: Write>(&self, out: &mut W) -> Result<usize, AsmError> {
        let mut offset = 0usize;

        for line in source_lines(self.source) {
            let Line::Instruction(parsed) = parse(&line, Pass::Second)? else {
                continue;
            };

            let instr = self.encode(&line, parsed)?;
            let bytes = instr.to_bytes();
            out.write_all(&bytes)?;
            debug!(
                pass = %Pass::Second,
                line = line.number,
                "{}  ; {}",
                dump::step(offset, &instr),
                line.text.trim()
            );
            offset += bytes.len();
        }

        info!(code_size = offset, "second pass done");
        Ok(offset)
    }

    /// Run both passes, writing header and body to `out`.
    ///
    /// The header is written at the writer's current position with a zero code
    /// size, then patched in place after pass two.
    pub fn assemble<W: Write + Seek>(&mut self, out: &mut W) -> Result<u32, AsmError> {
        self.first_pass()?;

        let start = out.stream_position()?;
        out.write_all(&Header::new(0).to_bytes())?;

        let written = self.second_pass(out)?;
        let code_size = u32::try_from(written).map_err(|_| AsmError::CodeTooLarge(written))?;

        out.seek(SeekFrom::Start(start))?;
        out.write_all(&Header::new(code_size).to_bytes())?;
        out.seek(SeekFrom::Start(start + (HEADER_SIZE + written) as u64))?;
        out.flush()?;

        Ok(code_size)
    }

    fn encode(
        &self,
        line: &SourceLine<'_>,
        parsed: ParsedInstruction<'_>,
    ) -> Result<Instruction, AsmError> {
        let mut cells = Vec::with_capacity(parsed.operands.len());
        for operand in parsed.operands {
            let cell = match operand {
                Operand::Value(cell) => cell,
                Operand::Label { name, span } => {
                    let offset = self.labels.resolve(name).ok_or_else(|| {
                        syntax(
                            Pass::Second,
                            line,
                            span,
                            SyntaxError::UndefinedLabel(name.to_string()),
                        )
                    })?;
                    Cell::from_u64(offset as u64)
                }
            };
            cells.push(cell);
        }

        Ok(Instruction::new(parsed.opcode, &cells)?)
    }
}

/// Assemble `source` into a complete in-memory binary image.
pub fn assemble(source: &str) -> Result<Vec<u8>, AsmError> {
    let mut out = Cursor::new(Vec::new());
    Assembler::new(source).assemble(&mut out)?;
    Ok(out.into_inner())
}

fn parse<'src>(line: &SourceLine<'src>, pass: Pass) -> Result<Line<'src>, AsmError> {
    parse_line(line.text).map_err(|LineError { error, span }| syntax(pass, line, span, error))
}

fn syntax(pass: Pass, line: &SourceLine<'_>, span: Range<usize>, error: SyntaxError) -> AsmError {
    AsmError::Syntax {
        pass,
        line: line.number,
        span: line.start + span.start..line.start + span.end,
        error,
    }
}

#[cfg(test)]
#[path = "assembler_tests.rs"]
mod assembler_tests;
