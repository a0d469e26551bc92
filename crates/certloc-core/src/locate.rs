//! Exact byte-pattern search inside DER buffers.
//!
//! The search is a plain sliding window: certificates are a few kilobytes and
//! this runs once per proof input, so no sub-linear algorithm is used. When a
//! needle occurs more than once, the lowest offset wins.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LocateError, LocateResult};

/// Position of a matched needle inside a haystack.
///
/// Always satisfies `start_index + length <= haystack.len()` for the haystack
/// it was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Offset of the first matched byte.
    pub start_index: usize,

    /// Number of bytes matched.
    pub length: usize,
}

impl Location {
    /// Offset one past the last matched byte.
    pub fn end(&self) -> usize {
        self.start_index + self.length
    }

    /// The matched bytes, or `None` if `haystack` is not the buffer this
    /// location was produced from.
    pub fn slice<'a>(&self, haystack: &'a [u8]) -> Option<&'a [u8]> {
        haystack.get(self.start_index..self.end())
    }
}

/// Find the first occurrence of `needle` in `haystack`.
pub fn locate(needle: &[u8], haystack: &[u8]) -> LocateResult<Location> {
    if needle.is_empty() {
        return Err(LocateError::invalid_encoding("needle is empty"));
    }

    // windows() yields nothing when the needle is longer than the haystack.
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|start_index| Location {
            start_index,
            length: needle.len(),
        })
        .ok_or(LocateError::NotFound {
            needle_len: needle.len(),
            haystack_len: haystack.len(),
        })
}

/// Decode a hex string (two digits per byte) into a search needle.
///
/// Odd length, non-hex digits and the empty string are all rejected.
pub fn decode_hex_needle(hex_str: &str) -> LocateResult<Vec<u8>> {
    if hex_str.is_empty() {
        return Err(LocateError::invalid_encoding("hex string is empty"));
    }
    Ok(hex::decode(hex_str)?)
}

/// Locate a hex-encoded RSA modulus.
pub fn find_modulus(modulus_hex: &str, message: &[u8]) -> LocateResult<Location> {
    let needle = decode_hex_needle(modulus_hex)?;
    debug!(
        needle_len = needle.len(),
        message_len = message.len(),
        "searching for modulus"
    );
    locate(&needle, message)
}

/// Locate a hex-encoded elliptic-curve point (usually `04 || X || Y`).
pub fn find_ec_point(point_hex: &str, message: &[u8]) -> LocateResult<Location> {
    let needle = decode_hex_needle(point_hex)?;
    debug!(
        needle_len = needle.len(),
        message_len = message.len(),
        "searching for EC point"
    );
    locate(&needle, message)
}
