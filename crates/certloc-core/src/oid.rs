//! Object identifier encoding and tag-aware search.
//!
//! An OID is located by its full DER TLV: tag `0x06`, a short-form length
//! byte, then the encoded body. The length byte must equal the body length
//! before the body is compared, so a shorter OID that happens to be a prefix
//! of a longer one is never reported.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LocateError, LocateResult};
use crate::locate::Location;

/// ASN.1 universal tag for OBJECT IDENTIFIER.
pub const OID_TAG: u8 = 0x06;

/// Largest body a single short-form length byte can describe.
const MAX_SHORT_FORM_LEN: usize = 0x7f;

/// A parsed object identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    arcs: Vec<u64>,
}

/// Position of an OID TLV inside a message.
///
/// `oid_length` covers the tag and length bytes as well as the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OidLocation {
    pub oid_index: usize,
    pub oid_length: usize,
}

impl From<OidLocation> for Location {
    fn from(loc: OidLocation) -> Self {
        Location {
            start_index: loc.oid_index,
            length: loc.oid_length,
        }
    }
}

impl ObjectIdentifier {
    /// Build an OID from its arcs, applying the X.690 first-arc rules.
    pub fn new(arcs: &[u64]) -> LocateResult<Self> {
        let dotted = || {
            arcs.iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(".")
        };

        let (first, second) = match arcs {
            [first, second, ..] => (*first, *second),
            _ => return Err(LocateError::invalid_oid(dotted(), "needs at least two arcs")),
        };

        if first > 2 {
            return Err(LocateError::invalid_oid(dotted(), "first arc must be 0, 1 or 2"));
        }
        if first < 2 && second >= 40 {
            return Err(LocateError::invalid_oid(
                dotted(),
                "second arc must be below 40 when the first arc is 0 or 1",
            ));
        }
        if first
            .checked_mul(40)
            .and_then(|v| v.checked_add(second))
            .is_none()
        {
            return Err(LocateError::invalid_oid(dotted(), "second arc overflows"));
        }

        Ok(Self {
            arcs: arcs.to_vec(),
        })
    }

    /// The arc values.
    pub fn arcs(&self) -> &[u64] {
        &self.arcs
    }

    /// DER body of this OID (no tag, no length).
    pub fn to_der_value(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.arcs.len() + 4);
        // Checked in new().
        encode_subidentifier(&mut buf, self.arcs[0] * 40 + self.arcs[1]);
        for &arc in &self.arcs[2..] {
            encode_subidentifier(&mut buf, arc);
        }
        buf
    }

    /// Full DER TLV: tag, short-form length, body.
    pub fn to_der(&self) -> LocateResult<Vec<u8>> {
        let body = self.to_der_value();
        let len = self.header_len_byte(&body)?;

        let mut der = Vec::with_capacity(body.len() + 2);
        der.push(OID_TAG);
        der.push(len);
        der.extend_from_slice(&body);
        Ok(der)
    }

    /// Find the first `06 <len> <body>` occurrence of this OID in `message`.
    pub fn find_in(&self, message: &[u8]) -> LocateResult<OidLocation> {
        let body = self.to_der_value();
        let expected_len = self.header_len_byte(&body)?;

        debug!(
            oid = %self,
            der = %hex::encode(&body),
            message_len = message.len(),
            "searching for OID"
        );

        let tag_positions = message
            .iter()
            .enumerate()
            .filter(|(_, byte)| **byte == OID_TAG)
            .map(|(index, _)| index);

        for index in tag_positions {
            if message.get(index + 1) != Some(&expected_len) {
                continue;
            }
            let body_start = index + 2;
            if message.get(body_start..body_start + body.len()) == Some(body.as_slice()) {
                let found = OidLocation {
                    oid_index: index,
                    oid_length: body.len() + 2,
                };
                debug!(oid = %self, oid_index = found.oid_index, oid_length = found.oid_length, "found OID");
                return Ok(found);
            }
        }

        Err(LocateError::OidNotFound {
            oid: self.to_string(),
            haystack_len: message.len(),
        })
    }

    fn header_len_byte(&self, body: &[u8]) -> LocateResult<u8> {
        if body.len() > MAX_SHORT_FORM_LEN {
            return Err(LocateError::invalid_oid(
                self.to_string(),
                format!("encoded body of {} bytes needs a long-form length", body.len()),
            ));
        }
        Ok(body.len() as u8)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = LocateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arcs = s
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(LocateError::invalid_oid(
                        s,
                        format!("component {part:?} is not a non-negative integer"),
                    ));
                }
                part.parse::<u64>().map_err(|e| {
                    LocateError::invalid_oid(s, format!("component {part:?}: {e}"))
                })
            })
            .collect::<LocateResult<Vec<u64>>>()?;

        Self::new(&arcs).map_err(|e| match e {
            LocateError::InvalidOid { reason, .. } => LocateError::invalid_oid(s, reason),
            other => other,
        })
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut arcs = self.arcs.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{first}")?;
        }
        for arc in arcs {
            write!(f, ".{arc}")?;
        }
        Ok(())
    }
}

/// Encode one subidentifier as base-128, most significant group first, with
/// the continuation bit on every byte but the last.
fn encode_subidentifier(buf: &mut Vec<u8>, value: u64) {
    if value < 0x80 {
        buf.push(value as u8);
        return;
    }

    let mut groups = Vec::with_capacity(10);
    let mut rest = value;
    while rest > 0 {
        groups.push((rest & 0x7f) as u8);
        rest >>= 7;
    }

    let last = groups.len() - 1;
    for (i, group) in groups.iter().rev().enumerate() {
        buf.push(if i < last { group | 0x80 } else { *group });
    }
}

/// Parse a dotted-decimal OID and locate its TLV in `message`.
pub fn find_oid(oid: &str, message: &[u8]) -> LocateResult<OidLocation> {
    oid.parse::<ObjectIdentifier>()?.find_in(message)
}

/// Dotted forms of the algorithm and curve OIDs seen in passport PKI chains.
pub mod known {
    // RSA
    pub const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
    pub const RSASSA_PSS: &str = "1.2.840.113549.1.1.10";
    pub const SHA1_WITH_RSA: &str = "1.2.840.113549.1.1.5";
    pub const SHA256_WITH_RSA: &str = "1.2.840.113549.1.1.11";
    pub const SHA384_WITH_RSA: &str = "1.2.840.113549.1.1.12";
    pub const SHA512_WITH_RSA: &str = "1.2.840.113549.1.1.13";

    // EC
    pub const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
    pub const ECDSA_WITH_SHA1: &str = "1.2.840.10045.4.1";
    pub const ECDSA_WITH_SHA256: &str = "1.2.840.10045.4.3.2";
    pub const ECDSA_WITH_SHA384: &str = "1.2.840.10045.4.3.3";
    pub const ECDSA_WITH_SHA512: &str = "1.2.840.10045.4.3.4";

    // Named curves
    pub const SECP256R1: &str = "1.2.840.10045.3.1.7";
    pub const SECP384R1: &str = "1.3.132.0.34";
    pub const SECP521R1: &str = "1.3.132.0.35";
    pub const BRAINPOOL_P256R1: &str = "1.3.36.3.3.2.8.1.1.7";
    pub const BRAINPOOL_P384R1: &str = "1.3.36.3.3.2.8.1.1.11";
    pub const BRAINPOOL_P512R1: &str = "1.3.36.3.3.2.8.1.1.13";

    // Hashes
    pub const SHA256: &str = "2.16.840.1.101.3.4.2.1";
    pub const SHA384: &str = "2.16.840.1.101.3.4.2.2";
    pub const SHA512: &str = "2.16.840.1.101.3.4.2.3";
}
