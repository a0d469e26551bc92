//! Public-key needles built from parsed certificate records.

use tracing::debug;

use crate::error::{LocateError, LocateResult};
use crate::locate::{find_ec_point, find_modulus, Location};
use crate::oid::{find_oid, OidLocation};
use crate::types::{CertificateData, PublicKeyDetails};

/// SEC1 prefix of an uncompressed EC point.
const UNCOMPRESSED_POINT_PREFIX: &str = "04";

/// Largest EC key size accepted when padding coordinates.
const MAX_EC_KEY_BITS: usize = 1024;

impl PublicKeyDetails {
    /// Hex of the bytes that appear verbatim in a SubjectPublicKeyInfo.
    ///
    /// RSA keys yield the modulus. EC keys yield `04 || X || Y` with each
    /// coordinate left-padded to the curve's byte width.
    pub fn needle_hex(&self) -> LocateResult<String> {
        match self {
            Self::Rsa { modulus, .. } | Self::RsaPss { modulus, .. } => Ok(modulus.clone()),
            Self::Ecdsa { x, y, .. } => {
                let raw = self.bits();
                let bits: usize = raw.trim().parse().map_err(|_| {
                    LocateError::invalid_encoding(format!("EC key size {raw:?} is not an integer"))
                })?;
                if bits == 0 || bits > MAX_EC_KEY_BITS {
                    return Err(LocateError::invalid_encoding(format!(
                        "EC key size {bits} outside 1..={MAX_EC_KEY_BITS}"
                    )));
                }
                let width = bits.div_ceil(8) * 2;
                Ok(format!(
                    "{UNCOMPRESSED_POINT_PREFIX}{}{}",
                    pad_coordinate(x, width)?,
                    pad_coordinate(y, width)?
                ))
            }
        }
    }
}

fn pad_coordinate(coord: &str, width: usize) -> LocateResult<String> {
    if coord.len() > width {
        return Err(LocateError::invalid_encoding(format!(
            "coordinate of {} hex digits exceeds curve width of {width}",
            coord.len()
        )));
    }
    Ok(format!("{coord:0>width$}"))
}

/// Locate the key described by `details` inside `message`.
pub fn locate_public_key(details: &PublicKeyDetails, message: &[u8]) -> LocateResult<Location> {
    let needle = details.needle_hex()?;
    if details.is_ec() {
        find_ec_point(&needle, message)
    } else {
        find_modulus(&needle, message)
    }
}

impl CertificateData {
    /// The tbsCertificate bytes.
    pub fn tbs(&self) -> LocateResult<&[u8]> {
        self.tbs_bytes
            .as_deref()
            .ok_or(LocateError::MissingField { field: "tbsBytes" })
    }

    pub fn public_key(&self) -> LocateResult<&PublicKeyDetails> {
        self.public_key_details
            .as_ref()
            .ok_or(LocateError::MissingField {
                field: "publicKeyDetails",
            })
    }
}

/// Locate a certificate's own public key in its tbsCertificate.
pub fn locate_certificate_key(cert: &CertificateData) -> LocateResult<Location> {
    locate_key_in_certificate(cert, cert)
}

/// Locate `key_owner`'s public key inside `container`'s tbsCertificate.
pub fn locate_key_in_certificate(
    key_owner: &CertificateData,
    container: &CertificateData,
) -> LocateResult<Location> {
    let details = key_owner.public_key()?;
    let tbs = container.tbs()?;
    debug!(
        owner = %key_owner.id,
        container = %container.id,
        "locating public key in certificate body"
    );
    locate_public_key(details, tbs)
}

/// Locate the public-key algorithm OID of `cert` in its tbsCertificate.
pub fn locate_public_key_algorithm(cert: &CertificateData) -> LocateResult<OidLocation> {
    let oid = cert
        .public_key_algo_oid
        .as_deref()
        .ok_or(LocateError::MissingField {
            field: "publicKeyAlgoOID",
        })?;
    find_oid(oid, cert.tbs()?)
}
