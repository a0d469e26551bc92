//! CSCA resolution by key identifier.
//!
//! Resolves an identifier with the following priority:
//! 1. Override table, if the caller supplies one. No fallback past it.
//! 2. Development table
//! 3. Production table

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{CscaError, CscaResult};
use crate::table::{KeyIdentifier, TrustAnchorTable};

const PEM_BEGIN: &str = "-----BEGIN CERTIFICATE-----";
const PEM_END: &str = "-----END CERTIFICATE-----";

/// Which table a certificate was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorSource {
    Override,
    Development,
    Production,
}

impl fmt::Display for AnchorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override => write!(f, "override"),
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// A resolved trust anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAnchor {
    /// PEM certificate, always with BEGIN/END delimiters.
    pub pem: String,

    /// Where it was found.
    pub source: AnchorSource,

    /// The normalized identifier that was looked up.
    pub ski: KeyIdentifier,
}

/// Resolver over the built-in development and production tables.
///
/// The tables are immutable snapshots; cloning the resolver shares them.
#[derive(Debug, Clone, Default)]
pub struct CscaResolver {
    development: Arc<TrustAnchorTable>,
    production: Arc<TrustAnchorTable>,
}

impl CscaResolver {
    pub fn new(development: TrustAnchorTable, production: TrustAnchorTable) -> Self {
        Self::from_shared(Arc::new(development), Arc::new(production))
    }

    pub fn from_shared(
        development: Arc<TrustAnchorTable>,
        production: Arc<TrustAnchorTable>,
    ) -> Self {
        Self {
            development,
            production,
        }
    }

    /// Resolve `ski` to a PEM certificate.
    pub fn resolve(
        &self,
        ski: &str,
        override_table: Option<&TrustAnchorTable>,
    ) -> CscaResult<String> {
        self.resolve_with_source(ski, override_table)
            .map(|anchor| anchor.pem)
    }

    /// Resolve `ski`, also reporting which table answered.
    ///
    /// A supplied override table is authoritative: if it lacks the key the
    /// lookup fails even when a built-in table has it.
    pub fn resolve_with_source(
        &self,
        ski: &str,
        override_table: Option<&TrustAnchorTable>,
    ) -> CscaResult<ResolvedAnchor> {
        let normalized = KeyIdentifier::new(ski);
        let override_supplied = override_table.is_some();

        let found = match override_table {
            Some(table) => table
                .get_normalized(&normalized)
                .map(|pem| (pem, AnchorSource::Override)),
            None => self
                .development
                .get_normalized(&normalized)
                .map(|pem| (pem, AnchorSource::Development))
                .or_else(|| {
                    self.production
                        .get_normalized(&normalized)
                        .map(|pem| (pem, AnchorSource::Production))
                }),
        };

        let Some((certificate, source)) = found else {
            warn!(ski, override_supplied, "CSCA not found");
            return Err(CscaError::NotFound {
                ski: ski.to_string(),
                override_supplied,
            });
        };

        debug!(ski = %normalized, source = %source, "resolved CSCA");

        Ok(ResolvedAnchor {
            pem: ensure_pem(certificate),
            source,
            ski: normalized,
        })
    }

    pub fn development(&self) -> &TrustAnchorTable {
        &self.development
    }

    pub fn production(&self) -> &TrustAnchorTable {
        &self.production
    }
}

/// Wrap a bare base64 body in certificate PEM delimiters; PEM input is
/// returned unchanged.
pub fn ensure_pem(certificate: &str) -> String {
    if certificate.contains(PEM_BEGIN) {
        certificate.to_string()
    } else {
        format!("{PEM_BEGIN}\n{certificate}\n{PEM_END}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> CscaResolver {
        let development: TrustAnchorTable = [("dd01", "DEV1"), ("shared", "DEVSHARED")]
            .into_iter()
            .collect();
        let production: TrustAnchorTable = [
            ("pp01", "PROD1"),
            ("shared", "PRODSHARED"),
            ("pem01", "-----BEGIN CERTIFICATE-----\nMIIC\n-----END CERTIFICATE-----"),
        ]
        .into_iter()
        .collect();
        CscaResolver::new(development, production)
    }

    #[test]
    fn test_resolve_wraps_bare_base64() {
        let pem = resolver().resolve("PP01", None).unwrap();
        assert_eq!(
            pem,
            "-----BEGIN CERTIFICATE-----\nPROD1\n-----END CERTIFICATE-----"
        );
    }

    #[test]
    fn test_resolve_keeps_existing_pem() {
        let pem = resolver().resolve("pem01", None).unwrap();
        assert_eq!(
            pem,
            "-----BEGIN CERTIFICATE-----\nMIIC\n-----END CERTIFICATE-----"
        );
    }

    #[test]
    fn test_development_wins_over_production() {
        let anchor = resolver().resolve_with_source("shared", None).unwrap();
        assert_eq!(anchor.source, AnchorSource::Development);
        assert!(anchor.pem.contains("DEVSHARED"));
    }

    #[test]
    fn test_production_fallback() {
        let anchor = resolver().resolve_with_source(" PP:01 ", None).unwrap();
        assert_eq!(anchor.source, AnchorSource::Production);
        assert_eq!(anchor.ski.as_str(), "pp01");
    }

    #[test]
    fn test_override_supplies_unknown_key() {
        let override_table: TrustAnchorTable = [("0f0f", "OVR")].into_iter().collect();
        let anchor = resolver()
            .resolve_with_source("0F:0F", Some(&override_table))
            .unwrap();
        assert_eq!(anchor.source, AnchorSource::Override);
        assert!(anchor.pem.contains("OVR"));
    }

    #[test]
    fn test_override_without_key_does_not_fall_through() {
        let override_table: TrustAnchorTable = [("0f0f", "OVR")].into_iter().collect();
        let result = resolver().resolve("pp01", Some(&override_table));
        match result {
            Err(CscaError::NotFound {
                ski,
                override_supplied,
            }) => {
                assert_eq!(ski, "pp01");
                assert!(override_supplied);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }

        // Even an empty override table is authoritative.
        let empty = TrustAnchorTable::new();
        assert!(resolver().resolve("dd01", Some(&empty)).is_err());
    }

    #[test]
    fn test_not_found_without_override() {
        let result = resolver().resolve("ffff", None);
        assert!(matches!(
            result,
            Err(CscaError::NotFound {
                override_supplied: false,
                ..
            })
        ));
    }

    #[test]
    fn test_source_display() {
        assert_eq!(AnchorSource::Override.to_string(), "override");
        assert_eq!(AnchorSource::Development.to_string(), "development");
        assert_eq!(AnchorSource::Production.to_string(), "production");
    }
}
