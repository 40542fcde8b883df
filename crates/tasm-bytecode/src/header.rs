//! Binary program header (12 bytes).
//!
//! Layout, all integers little-endian:
//! - 0-3: magic `b"TASM"`
//! - 4: version major
//! - 5: version minor
//! - 6-7: reserved, zero
//! - 8-11: code size in bytes

use std::fmt;

/// Magic bytes at the start of every binary.
pub const MAGIC: [u8; 4] = *b"TASM";

/// Version this build writes and the newest it loads.
pub const VERSION: Version = Version { major: 0, minor: 4 };

pub const HEADER_SIZE: usize = 12;

/// Binary format version. Ordering is major first, then minor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// File header, followed by `code_size` bytes of encoded instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 4],
    pub version: Version,
    pub _reserved: [u8; 2],
    pub code_size: u32,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            _reserved: [0; 2],
            code_size: 0,
        }
    }
}

impl Header {
    pub fn new(code_size: u32) -> Self {
        Self {
            code_size,
            ..Self::default()
        }
    }

    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Self {
        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: Version {
                major: bytes[4],
                minor: bytes[5],
            },
            _reserved: [bytes[6], bytes[7]],
            code_size: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version.major;
        bytes[5] = self.version.minor;
        bytes[6..8].copy_from_slice(&self._reserved);
        bytes[8..12].copy_from_slice(&self.code_size.to_le_bytes());
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    /// Backward compatible only: older or equal versions load, newer ones do not.
    pub fn validate_version(&self) -> bool {
        self.version <= VERSION
    }
}

#[cfg(test)]
#[path = "header_tests.rs"]
mod header_tests;
