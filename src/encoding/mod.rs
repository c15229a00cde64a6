//! Text encodings understood by buffers
//!
//! Encoding names are matched case-insensitively and accept the usual alias
//! set: `utf-8` for `utf8`, `utf-16le`/`ucs2` for `utf16le`, and `binary`
//! for `latin1`.

pub mod text;

use std::{fmt, str::FromStr};

use crate::error::BufferError;

pub use text::{byte_length, decode, encode};

/// Supported text encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Encoding {
    /// UTF-8
    #[default]
    Utf8,
    /// One little-endian 16-bit code unit per UTF-16 code unit
    Utf16Le,
    /// One byte per code unit, truncating anything above 255
    Latin1,
    /// Like latin1, decoded bytes masked to 7 bits
    Ascii,
    /// Standard base64 alphabet
    Base64,
    /// Two lowercase hex digits per byte
    Hex,
}

impl Encoding {
    /// All encodings, in canonical order
    pub const ALL: [Encoding; 6] = [
        Encoding::Utf8,
        Encoding::Utf16Le,
        Encoding::Latin1,
        Encoding::Ascii,
        Encoding::Base64,
        Encoding::Hex,
    ];

    /// Canonical name of the encoding
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Latin1 => "latin1",
            Encoding::Ascii => "ascii",
            Encoding::Base64 => "base64",
            Encoding::Hex => "hex",
        }
    }

    /// Check whether `name` is a recognized encoding name or alias
    pub fn is_encoding(name: &str) -> bool {
        name.parse::<Encoding>().is_ok()
    }
}

impl FromStr for Encoding {
    type Err = BufferError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "utf16le" | "utf-16le" | "ucs2" => Ok(Encoding::Utf16Le),
            "latin1" | "binary" => Ok(Encoding::Latin1),
            "ascii" => Ok(Encoding::Ascii),
            "base64" => Ok(Encoding::Base64),
            "hex" => Ok(Encoding::Hex),
            _ => Err(BufferError::unknown_encoding(name)),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
