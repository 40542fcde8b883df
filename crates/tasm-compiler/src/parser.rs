//! Parser for one line of assembly.
//!
//! A line is blank, a label definition (`:name`), or a mnemonic followed by
//! exactly as many operands as the catalog declares. Spans in errors are
//! relative to the line.

use std::ops::Range;

use tasm_bytecode::{Cell, MAX_MNEMONIC_LEN, Opcode, OperandKind};

use crate::error::{LineError, SyntaxError};
use crate::lexer::{Token, TokenKind, lex};

/// One operand, either final or waiting for label resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<'src> {
    Value(Cell),
    Label { name: &'src str, span: Range<usize> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInstruction<'src> {
    pub opcode: Opcode,
    pub operands: Vec<Operand<'src>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Line<'src> {
    Blank,
    Label { name: &'src str, span: Range<usize> },
    Instruction(ParsedInstruction<'src>),
}

pub fn parse_line(line: &str) -> Result<Line<'_>, LineError> {
    let mut parser = Parser {
        line,
        tokens: lex(line),
        pos: 0,
    };

    let Some(first) = parser.next() else {
        return Ok(Line::Blank);
    };

    match first.kind {
        TokenKind::Label => {
            let name = parser.label_name(&first)?;
            parser.expect_end()?;
            Ok(Line::Label {
                name,
                span: first.span,
            })
        }
        TokenKind::Ident => parser.instruction(first).map(Line::Instruction),
        _ => Err(parser.unexpected(&first)),
    }
}

struct Parser<'src> {
    line: &'src str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'src> Parser<'src> {
    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn text(&self, token: &Token) -> &'src str {
        token.text(self.line)
    }

    /// Zero-width span at the end of the line's content.
    fn eol(&self) -> Range<usize> {
        let end = self.line.trim_end().len();
        end..end
    }

    fn unexpected(&self, token: &Token) -> LineError {
        LineError::new(
            SyntaxError::UnexpectedToken(self.text(token).to_string()),
            token.span.clone(),
        )
    }

    fn expect_end(&mut self) -> Result<(), LineError> {
        match self.next() {
            Some(token) => Err(self.unexpected(&token)),
            None => Ok(()),
        }
    }

    fn label_name(&self, token: &Token) -> Result<&'src str, LineError> {
        let name = &self.text(token)[1..];
        if name.is_empty() {
            return Err(LineError::new(SyntaxError::EmptyLabel, token.span.clone()));
        }
        Ok(name)
    }

    fn instruction(&mut self, head: Token) -> Result<ParsedInstruction<'src>, LineError> {
        let mnemonic = self.text(&head);
        if mnemonic.len() > MAX_MNEMONIC_LEN {
            return Err(LineError::new(
                SyntaxError::MnemonicTooLong(mnemonic.len()),
                head.span,
            ));
        }
        let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| {
            LineError::new(
                SyntaxError::UnknownMnemonic(mnemonic.to_string()),
                head.span.clone(),
            )
        })?;

        let expected = opcode.operand_count();
        let mut operands = Vec::with_capacity(expected as usize);
        for found in 0..expected {
            let Some(token) = self.next() else {
                return Err(LineError::new(
                    SyntaxError::MissingOperand {
                        mnemonic: opcode.mnemonic(),
                        expected,
                        found,
                    },
                    self.eol(),
                ));
            };
            operands.push(self.operand(token, opcode)?);
        }

        self.expect_end()?;
        Ok(ParsedInstruction { opcode, operands })
    }

    fn operand(&mut self, token: Token, opcode: Opcode) -> Result<Operand<'src>, LineError> {
        let text = self.text(&token);
        let value = match token.kind {
            TokenKind::Label => {
                let name = self.label_name(&token)?;
                return Ok(Operand::Label {
                    name,
                    span: token.span,
                });
            }
            TokenKind::BracketOpen => return self.memory(token),
            TokenKind::Register => register(text, &token)?,
            TokenKind::Int => widen(int(text, &token)?, opcode),
            TokenKind::Float => text.parse::<f64>().map(Cell::from_f64).map_err(|_| {
                LineError::new(SyntaxError::InvalidLiteral(text.to_string()), token.span.clone())
            })?,
            TokenKind::Char => widen(char_literal(text, &token)?, opcode),
            TokenKind::Ident if text.trim_start_matches(['f', 'F']).starts_with(['x', 'X']) => {
                return Err(LineError::new(
                    SyntaxError::InvalidRegister(text.to_string()),
                    token.span,
                ));
            }
            _ => return Err(self.unexpected(&token)),
        };
        Ok(Operand::Value(value))
    }

    /// `[x2]` or `[5]`: the index of the register holding the address.
    fn memory(&mut self, open: Token) -> Result<Operand<'src>, LineError> {
        let unclosed = open.span.start..self.eol().end;
        let Some(inner) = self.next() else {
            return Err(LineError::new(
                SyntaxError::UnexpectedEndInsideBrackets,
                unclosed,
            ));
        };

        let text = self.text(&inner);
        let value = match inner.kind {
            TokenKind::Register => register(text, &inner)?,
            TokenKind::Int => int(text, &inner)?,
            _ => {
                return Err(LineError::new(
                    SyntaxError::InvalidMemoryOperand(text.to_string()),
                    inner.span,
                ));
            }
        };

        match self.next() {
            Some(close) if close.kind == TokenKind::BracketClose => Ok(Operand::Value(value)),
            Some(other) => Err(LineError::new(SyntaxError::MissingClosingBracket, other.span)),
            None => Err(LineError::new(SyntaxError::MissingClosingBracket, unclosed)),
        }
    }
}

/// Integer and character literals given to float instructions mean the float value.
fn widen(value: Cell, opcode: Opcode) -> Cell {
    if opcode.operand_kind() == OperandKind::Float {
        Cell::from_f64(value.as_i64() as f64)
    } else {
        value
    }
}

fn register(text: &str, token: &Token) -> Result<Cell, LineError> {
    text.trim_start_matches(['f', 'F'])
        .get(1..)
        .and_then(|digits| digits.parse::<u64>().ok())
        .map(Cell::from_u64)
        .ok_or_else(|| {
            LineError::new(
                SyntaxError::InvalidRegister(text.to_string()),
                token.span.clone(),
            )
        })
}

fn int(text: &str, token: &Token) -> Result<Cell, LineError> {
    text.parse::<i64>().map(Cell::from_i64).map_err(|_| {
        LineError::new(
            SyntaxError::InvalidLiteral(text.to_string()),
            token.span.clone(),
        )
    })
}

fn char_literal(text: &str, token: &Token) -> Result<Cell, LineError> {
    if text.len() < 2 || !text.ends_with('\'') {
        return Err(LineError::new(
            SyntaxError::MissingClosingQuote,
            token.span.clone(),
        ));
    }
    match text[1..text.len() - 1].as_bytes() {
        [byte] => Ok(Cell::from_u64(u64::from(*byte))),
        _ => Err(LineError::new(
            SyntaxError::InvalidCharLiteral(text.to_string()),
            token.span.clone(),
        )),
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod parser_tests;
