//! Bit strings: owned text of '0' and '1' characters.

use std::fmt::{self, Write as _};

use serde::Serialize;

/// Bytes needed to cover `num_bits`, always one more than the floor.
///
/// Sources fetch this many bytes and truncate, so a whole-byte request such
/// as 8 bits still pulls two bytes.
pub fn bytes_for_bits(num_bits: usize) -> usize {
    num_bits / 8 + 1
}

/// A string made only of '0' and '1'.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BitString(String);

impl BitString {
    /// Validate `s` as a bit string.
    pub fn parse(s: impl Into<String>) -> Option<Self> {
        let s = s.into();
        s.bytes()
            .all(|b| b == b'0' || b == b'1')
            .then_some(Self(s))
    }

    /// Render `bytes` most-significant bit first and keep the first `num_bits`.
    ///
    /// Returns `None` when the bytes carry fewer than `num_bits` bits.
    pub fn from_bytes(bytes: &[u8], num_bits: usize) -> Option<Self> {
        if bytes.len() * 8 < num_bits {
            return None;
        }
        let mut s = String::with_capacity(bytes.len() * 8);
        for byte in bytes {
            let _ = write!(s, "{byte:08b}");
        }
        s.truncate(num_bits);
        Some(Self(s))
    }

    /// Concatenate per-shot measurement strings in order.
    pub fn from_memory<S: AsRef<str>>(shots: &[S]) -> Option<Self> {
        let mut joined = String::with_capacity(shots.len());
        for shot in shots {
            joined.push_str(shot.as_ref());
        }
        Self::parse(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count_ones(&self) -> usize {
        self.0.bytes().filter(|&b| b == b'1').count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BitString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
