//! Compact serialization: period separated base64url segments
//!
//! Empty segments are ambiguous on the wire, so a non-final segment may only
//! be empty at the one position a layout explicitly allows (the detached
//! payload of a JWS, or the `dir` encrypted key of a JWE). The final segment
//! may always be empty.

use crate::error::{JoseError, JoseResult};

const PERIOD_SEPARATOR: char = '.';

const NO_EMPTY_PARTS_MSG: &str =
    "Compact serialization cannot contain empty middle or beginning parts";

/// Joins and splits compact serializations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompactSerializer {
    optional_part: Option<usize>,
}

impl CompactSerializer {
    /// No interior segment may be empty
    pub const STRICT: Self = Self {
        optional_part: None,
    };

    /// Allow the segment at `index` to be empty
    #[must_use]
    pub const fn allowing_empty(index: usize) -> Self {
        Self {
            optional_part: Some(index),
        }
    }

    /// Join parts with `.`; `None` becomes an empty segment
    ///
    /// # Errors
    /// Returns `JoseError::Format` if a non-final part is empty at a position
    /// this layout does not allow.
    pub fn serialize(&self, parts: &[Option<&str>]) -> JoseResult<String> {
        let mut out = String::new();
        let last = parts.len().saturating_sub(1);
        for (index, part) in parts.iter().enumerate() {
            let part = part.unwrap_or_default();
            out.push_str(part);
            if index != last {
                if part.is_empty() && self.optional_part != Some(index) {
                    return Err(JoseError::format(NO_EMPTY_PARTS_MSG));
                }
                out.push(PERIOD_SEPARATOR);
            }
        }
        Ok(out)
    }

    /// Split on `.`, keeping a trailing empty segment produced by a final `.`
    ///
    /// # Errors
    /// Returns `JoseError::Format` if a leading or interior segment is empty
    /// at a position this layout does not allow.
    pub fn deserialize(&self, input: &str) -> JoseResult<Vec<String>> {
        let parts: Vec<&str> = input.split(PERIOD_SEPARATOR).collect();
        let last = parts.len() - 1;
        for (index, part) in parts.iter().enumerate() {
            if !part.is_empty() {
                continue;
            }
            let trailing = index == last && index > 0;
            if !trailing && self.optional_part != Some(index) {
                return Err(JoseError::format(NO_EMPTY_PARTS_MSG));
            }
        }
        Ok(parts.into_iter().map(str::to_owned).collect())
    }
}

/// Join parts using [`CompactSerializer::STRICT`]
///
/// # Errors
/// Returns `JoseError::Format` if any non-final part is empty.
pub fn serialize(parts: &[Option<&str>]) -> JoseResult<String> {
    CompactSerializer::STRICT.serialize(parts)
}

/// Split input using [`CompactSerializer::STRICT`]
///
/// # Errors
/// Returns `JoseError::Format` if any leading or interior segment is empty.
pub fn deserialize(input: &str) -> JoseResult<Vec<String>> {
    CompactSerializer::STRICT.deserialize(input)
}
