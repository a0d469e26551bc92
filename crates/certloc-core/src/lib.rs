//! Byte-offset location of public keys and object identifiers inside DER.
//!
//! Proof systems that verify a certificate chain over raw certificate bytes
//! need to know *where* a key or algorithm identifier sits in the signed
//! body. This crate provides:
//!
//! - [`locate`]: first-occurrence exact byte search
//! - [`find_modulus`] / [`find_ec_point`]: hex needle builders on top of it
//! - [`find_oid`]: DER re-encoding of a dotted OID and tag-aware search
//! - [`locate_public_key`] and friends: needles derived from parsed
//!   [`CertificateData`] records
//!
//! # Quick Start
//!
//! ```
//! use certloc_core::{find_oid, locate, oid::known};
//!
//! let tbs = [
//!     0x30, 0x0d, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0b, 0x05, 0x00,
//! ];
//!
//! let algo = find_oid(known::SHA256_WITH_RSA, &tbs).unwrap();
//! assert_eq!((algo.oid_index, algo.oid_length), (2, 11));
//!
//! let null = locate(&[0x05, 0x00], &tbs).unwrap();
//! assert_eq!(null.start_index, 13);
//! ```
//!
//! Every operation is pure and synchronous; a miss is an error, never a
//! default offset.

pub mod error;
mod key;
pub mod locate;
pub mod oid;
pub mod types;

pub use error::{LocateError, LocateResult};
pub use key::{
    locate_certificate_key, locate_key_in_certificate, locate_public_key,
    locate_public_key_algorithm,
};
pub use locate::{decode_hex_needle, find_ec_point, find_modulus, locate, Location};
pub use oid::{find_oid, ObjectIdentifier, OidLocation, OID_TAG};
pub use types::{CertificateData, CurveParams, PublicKeyDetails, Validity};
