use std::fmt;
use std::ops::Range;

use tasm_core::ErrorKind;

/// Which traversal of the source produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    First,
    Second,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::First => f.write_str("first"),
            Pass::Second => f.write_str("second"),
        }
    }
}

/// A problem with one line of source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("unknown instruction `{0}`")]
    UnknownMnemonic(String),

    #[error("mnemonic is {0} bytes long, limit is 15")]
    MnemonicTooLong(usize),

    #[error("invalid register `{0}`")]
    InvalidRegister(String),

    #[error("label name is empty")]
    EmptyLabel,

    #[error("unexpected end of line inside brackets")]
    UnexpectedEndInsideBrackets,

    #[error("expected register or number inside brackets, found `{0}`")]
    InvalidMemoryOperand(String),

    #[error("missing closing bracket")]
    MissingClosingBracket,

    #[error("missing closing quote")]
    MissingClosingQuote,

    #[error("character literal {0} must hold exactly one byte")]
    InvalidCharLiteral(String),

    #[error("invalid numeric literal `{0}`")]
    InvalidLiteral(String),

    #[error("`{mnemonic}` expects {expected} operand(s), found {found}")]
    MissingOperand {
        mnemonic: &'static str,
        expected: u8,
        found: u8,
    },

    #[error("unexpected `{0}`")]
    UnexpectedToken(String),

    #[error("label `{name}` redefined at offset {offset}, first defined at {previous}")]
    LabelRedefined {
        name: String,
        previous: usize,
        offset: usize,
    },

    #[error("undefined label `{0}`")]
    UndefinedLabel(String),
}

/// A syntax error pinned to a byte range of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub error: SyntaxError,
    pub span: Range<usize>,
}

impl LineError {
    pub fn new(error: SyntaxError, span: Range<usize>) -> Self {
        Self { error, span }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AsmError {
    /// `span` is a byte range into the whole source.
    #[error("line {line}: {error}")]
    Syntax {
        pass: Pass,
        line: usize,
        span: Range<usize>,
        error: SyntaxError,
    },

    #[error("code size {0} does not fit the header")]
    CodeTooLarge(usize),

    #[error("encoding failed: {0}")]
    Encode(#[from] tasm_bytecode::DecodeError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AsmError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::BadArgument
    }

    /// Pass that failed, `None` for errors outside either pass.
    pub fn pass(&self) -> Option<Pass> {
        match self {
            AsmError::Syntax { pass, .. } => Some(*pass),
            AsmError::CodeTooLarge(_) | AsmError::Encode(_) | AsmError::Io(_) => None,
        }
    }

    pub fn syntax(&self) -> Option<&SyntaxError> {
        match self {
            AsmError::Syntax { error, .. } => Some(error),
            _ => None,
        }
    }
}
