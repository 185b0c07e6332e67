//! Character encodings used to turn payload text into bytes

use crate::error::{JoseError, JoseResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Character encoding of a textual payload
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharEncoding {
    /// UTF-8, the default for every JOSE payload
    #[default]
    #[serde(rename = "UTF-8")]
    Utf8,
    /// 7-bit US-ASCII
    #[serde(rename = "US-ASCII")]
    Ascii,
    /// ISO-8859-1, one byte per code point up to U+00FF
    #[serde(rename = "ISO-8859-1")]
    Latin1,
}

impl CharEncoding {
    /// Canonical charset name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Ascii => "US-ASCII",
            Self::Latin1 => "ISO-8859-1",
        }
    }

    /// Encode text into bytes
    ///
    /// # Errors
    /// Returns `JoseError::Format` if a character cannot be represented.
    pub fn encode(self, text: &str) -> JoseResult<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Ascii => {
                if text.is_ascii() {
                    Ok(text.as_bytes().to_vec())
                } else {
                    Err(JoseError::format("Text is not representable in US-ASCII"))
                }
            }
            Self::Latin1 => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c)).map_err(|_| {
                        JoseError::format(format!(
                            "Character {c:?} is not representable in ISO-8859-1"
                        ))
                    })
                })
                .collect(),
        }
    }

    /// Decode bytes into text
    ///
    /// # Errors
    /// Returns `JoseError::Format` if the bytes are invalid for this encoding.
    pub fn decode(self, bytes: &[u8]) -> JoseResult<String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|e| JoseError::format(format!("Invalid UTF-8: {e}"))),
            Self::Ascii => {
                if bytes.is_ascii() {
                    Ok(bytes.iter().map(|&b| char::from(b)).collect())
                } else {
                    Err(JoseError::format("Bytes are not valid US-ASCII"))
                }
            }
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

impl fmt::Display for CharEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharEncoding {
    type Err = JoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "UTF-8" | "UTF8" => Ok(Self::Utf8),
            "US-ASCII" | "ASCII" => Ok(Self::Ascii),
            "ISO-8859-1" | "LATIN1" | "ISO8859-1" => Ok(Self::Latin1),
            _ => Err(JoseError::format(format!("Unsupported charset: {s}"))),
        }
    }
}
