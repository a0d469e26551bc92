//! Certificate records supplied by the certificate parser.
//!
//! These mirror the JSON the parser emits (camelCase field names). They are
//! read-only inputs here; nothing in this crate builds them from DER.

use serde::{Deserialize, Serialize};

/// Public key material of a certificate, numeric fields as hex strings.
///
/// Deserialized untagged: RSA-PSS is tried first because its JSON is a
/// superset of plain RSA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PublicKeyDetails {
    #[serde(rename_all = "camelCase")]
    RsaPss {
        modulus: String,
        exponent: String,
        bits: String,
        hash_algorithm: String,
        mgf: String,
        salt_length: String,
    },

    #[serde(rename_all = "camelCase")]
    Rsa {
        modulus: String,
        exponent: String,
        bits: String,
    },

    #[serde(rename_all = "camelCase")]
    Ecdsa {
        x: String,
        y: String,
        curve: String,
        #[serde(default)]
        params: Option<CurveParams>,
        bits: String,
    },
}

/// Domain parameters of a named or explicit curve, hex encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    #[serde(default)]
    pub p: String,
    #[serde(default)]
    pub a: String,
    #[serde(default)]
    pub b: String,
    #[serde(default)]
    pub g: String,
    #[serde(default)]
    pub n: String,
    #[serde(default)]
    pub h: String,
}

impl PublicKeyDetails {
    /// Key size as reported by the parser (e.g. `"2048"`, `"256"`).
    pub fn bits(&self) -> &str {
        match self {
            Self::RsaPss { bits, .. } | Self::Rsa { bits, .. } | Self::Ecdsa { bits, .. } => bits,
        }
    }

    pub fn is_ec(&self) -> bool {
        matches!(self, Self::Ecdsa { .. })
    }
}

/// Validity window, as the parser prints it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Validity {
    pub not_before: String,
    pub not_after: String,
}

/// Parsed certificate fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateData {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub issuer: String,

    #[serde(default)]
    pub validity: Validity,

    #[serde(default)]
    pub subject_key_identifier: String,

    #[serde(default)]
    pub authority_key_identifier: String,

    #[serde(default)]
    pub signature_algorithm: String,

    #[serde(default)]
    pub hash_algorithm: String,

    #[serde(default)]
    pub public_key_details: Option<PublicKeyDetails>,

    /// DER of the `tbsCertificate`.
    #[serde(default)]
    pub tbs_bytes: Option<Vec<u8>>,

    #[serde(default)]
    pub tbs_bytes_length: String,

    #[serde(default)]
    pub raw_pem: String,

    #[serde(default)]
    pub raw_txt: String,

    /// Dotted OID of the subject public key algorithm.
    #[serde(default, rename = "publicKeyAlgoOID")]
    pub public_key_algo_oid: Option<String>,
}
