//! Loaded binary program: header plus code body.

use std::path::Path;

use tasm_core::ErrorKind;
use tracing::debug;

use crate::header::{HEADER_SIZE, Header, MAGIC, VERSION, Version};

#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    #[error("file too small: {0} bytes, header needs 12")]
    FileTooSmall(usize),

    #[error("invalid magic: expected {}", String::from_utf8_lossy(&MAGIC))]
    InvalidMagic,

    #[error("unsupported version {found}, runtime is {runtime}")]
    UnsupportedVersion { found: Version, runtime: Version },

    #[error("code truncated: header declares {declared} bytes, {actual} present")]
    CodeTruncated { declared: u32, actual: usize },

    #[error("code size {0} does not fit the header")]
    CodeTooLarge(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProgramError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProgramError::CodeTruncated { .. } => ErrorKind::Corruption,
            _ => ErrorKind::BadArgument,
        }
    }
}

/// A validated program ready for execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    header: Header,
    code: Vec<u8>,
}

impl Program {
    /// Wrap an encoded body with a current-version header.
    pub fn from_code(code: Vec<u8>) -> Result<Self, ProgramError> {
        let size = u32::try_from(code.len()).map_err(|_| ProgramError::CodeTooLarge(code.len()))?;
        Ok(Self {
            header: Header::new(size),
            code,
        })
    }

    /// Parse and validate a binary image. Bytes past `code_size` are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProgramError> {
        let Some((head, body)) = bytes.split_first_chunk::<HEADER_SIZE>() else {
            return Err(ProgramError::FileTooSmall(bytes.len()));
        };

        let header = Header::from_bytes(head);
        if !header.validate_magic() {
            return Err(ProgramError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(ProgramError::UnsupportedVersion {
                found: header.version,
                runtime: VERSION,
            });
        }

        let declared = header.code_size;
        let code = body
            .get(..declared as usize)
            .ok_or(ProgramError::CodeTruncated {
                declared,
                actual: body.len(),
            })?;
        if body.len() > code.len() {
            debug!(ignored = body.len() - code.len(), "trailing bytes after code");
        }
        debug!(
            version = %header.version,
            code_size = declared,
            "program loaded"
        );

        Ok(Self {
            header,
            code: code.to_vec(),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProgramError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE + self.code.len());
        bytes.extend_from_slice(&self.header.to_bytes());
        bytes.extend_from_slice(&self.code);
        bytes
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn version(&self) -> Version {
        self.header.version
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod program_tests;
