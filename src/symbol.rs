use std::fmt;

use serde::{Deserialize, Serialize};

/// An entry of the coding alphabet: one of the 256 byte values, or the
/// end-of-stream marker that terminates every payload.
///
/// Ordering puts every literal before `EndOfStream`, which fixes the order
/// in which tables are iterated and leaves are queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Literal(u8),
    EndOfStream,
}

impl Symbol {
    pub fn is_end_of_stream(self) -> bool {
        matches!(self, Symbol::EndOfStream)
    }

    pub fn literal(self) -> Option<u8> {
        match self {
            Symbol::Literal(byte) => Some(byte),
            Symbol::EndOfStream => None,
        }
    }
}

impl From<u8> for Symbol {
    fn from(byte: u8) -> Self {
        Symbol::Literal(byte)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Literal(byte) if byte.is_ascii_graphic() => write!(f, "'{}'", *byte as char),
            Symbol::Literal(byte) => write!(f, "0x{:02x}", byte),
            Symbol::EndOfStream => f.write_str("EOF"),
        }
    }
}
