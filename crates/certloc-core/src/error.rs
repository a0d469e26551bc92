//! Error types for byte and OID location.

/// Location errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    /// No window of the message matched the needle.
    #[error("{needle_len}-byte needle not found in {haystack_len}-byte message")]
    NotFound {
        needle_len: usize,
        haystack_len: usize,
    },

    /// No tag-prefixed, exact-length match of the OID exists in the message.
    #[error("OID {oid} not found in {haystack_len}-byte message")]
    OidNotFound { oid: String, haystack_len: usize },

    /// Needle source was not valid hex (odd length, bad digit, empty).
    #[error("invalid encoding: {reason}")]
    InvalidEncoding { reason: String },

    /// OID string could not be parsed or encoded.
    #[error("invalid OID {oid:?}: {reason}")]
    InvalidOid { oid: String, reason: String },

    /// The certificate record lacks a field required by the operation.
    #[error("certificate field missing: {field}")]
    MissingField { field: &'static str },
}

impl LocateError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        if self.is_not_found() {
            1
        } else {
            2
        }
    }

    /// Whether the error means "absent" rather than "malformed input".
    ///
    /// Covers both byte-needle and OID misses; match on this rather than on
    /// `NotFound` alone.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::OidNotFound { .. })
    }

    pub(crate) fn invalid_encoding(reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_oid(oid: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOid {
            oid: oid.into(),
            reason: reason.into(),
        }
    }
}

impl From<hex::FromHexError> for LocateError {
    fn from(err: hex::FromHexError) -> Self {
        Self::invalid_encoding(err.to_string())
    }
}

/// Result type for location operations.
pub type LocateResult<T> = Result<T, LocateError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid::find_oid;

    #[test]
    fn test_not_found_covers_byte_and_oid_misses() {
        let byte_miss = LocateError::NotFound {
            needle_len: 4,
            haystack_len: 2,
        };
        let oid_miss = find_oid("1.2.840.10045.2.1", &[0x30, 0x00]).unwrap_err();
        assert!(matches!(oid_miss, LocateError::OidNotFound { .. }));

        for err in [&byte_miss, &oid_miss] {
            assert!(err.is_not_found());
            assert_eq!(err.exit_code(), 1);
        }
    }

    #[test]
    fn test_malformed_input_is_not_a_miss() {
        let errors = [
            LocateError::invalid_encoding("odd length"),
            LocateError::invalid_oid("1", "needs two arcs"),
            LocateError::MissingField { field: "tbsBytes" },
        ];
        for err in &errors {
            assert!(!err.is_not_found());
            assert_eq!(err.exit_code(), 2);
        }
    }
}
