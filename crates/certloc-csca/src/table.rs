//! Key identifiers and SKI→PEM tables.
//!
//! Tables are keyed by the normalized identifier so that lookups with any
//! casing or separator style hit the same entry.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{CscaError, CscaResult};

/// A Subject/Authority Key Identifier in normalized form.
///
/// Normalization removes whitespace and `:` separators and lowercases the
/// rest, so `" AB:CD "` and `"abcd"` are the same identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyIdentifier(String);

impl KeyIdentifier {
    pub fn new(raw: &str) -> Self {
        Self(
            raw.chars()
                .filter(|c| !c.is_whitespace() && *c != ':')
                .flat_map(char::to_lowercase)
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyIdentifier {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Read-only mapping from key identifier to a PEM or bare base64 certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustAnchorTable {
    entries: BTreeMap<KeyIdentifier, String>,
}

/// On-disk and on-wire envelope: `{ "data": { ski: pem } }`.
#[derive(Serialize)]
struct Envelope<'a> {
    data: &'a BTreeMap<KeyIdentifier, String>,
}

impl TrustAnchorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, normalizing the key. Returns the previous value.
    pub fn insert(&mut self, ski: &str, certificate: impl Into<String>) -> Option<String> {
        let key = KeyIdentifier::new(ski);
        let previous = self.entries.insert(key.clone(), certificate.into());
        if previous.is_some() {
            warn!(raw = ski, ski = %key, "duplicate key identifier replaced earlier entry");
        }
        previous
    }

    /// Look up an identifier in any form.
    pub fn get(&self, ski: &str) -> Option<&str> {
        self.get_normalized(&KeyIdentifier::new(ski))
    }

    pub fn get_normalized(&self, ski: &KeyIdentifier) -> Option<&str> {
        self.entries.get(ski).map(String::as_str)
    }

    pub fn contains(&self, ski: &str) -> bool {
        self.get(ski).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyIdentifier, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Build a table from the `data` object of an SKI-PEM document.
    ///
    /// Every value must be a string; the error names the first offending key.
    pub fn from_data_object(data: &serde_json::Map<String, Value>) -> Result<Self, String> {
        let mut table = Self::new();
        for (ski, value) in data {
            let certificate = value
                .as_str()
                .ok_or_else(|| format!("entry {ski:?} is not a string"))?;
            table.insert(ski, certificate);
        }
        Ok(table)
    }

    /// Parse a table file: either the `{ "data": {...} }` envelope served by
    /// the SKI-PEM endpoint, or a flat `{ ski: pem }` object.
    pub fn from_json_str(json: &str) -> CscaResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| CscaError::Table {
            message: format!("invalid JSON: {}", e),
        })?;

        let object = value.as_object().ok_or_else(|| CscaError::Table {
            message: "table must be a JSON object".to_string(),
        })?;

        // Table values are strings, so an object-valued `data` is the envelope.
        let data = match object.get("data") {
            Some(Value::Object(data)) => data,
            _ => object,
        };

        Self::from_data_object(data).map_err(|message| CscaError::Table { message })
    }

    /// Load a table file from disk.
    pub async fn load(path: impl AsRef<Path>) -> CscaResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .await
            .map_err(|e| CscaError::Table {
                message: format!("failed to read {}: {}", path.display(), e),
            })?;

        let table = Self::from_json_str(&json)?;
        debug!(path = %path.display(), entries = table.len(), "loaded trust anchor table");
        Ok(table)
    }

    /// Serialize in envelope form, suitable for [`TrustAnchorTable::load`].
    pub fn to_json_pretty(&self) -> CscaResult<String> {
        serde_json::to_string_pretty(&Envelope {
            data: &self.entries,
        })
        .map_err(|e| CscaError::Table {
            message: format!("failed to serialize table: {}", e),
        })
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for TrustAnchorTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (ski, certificate) in iter {
            table.insert(ski.as_ref(), certificate);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_idempotent() {
        let a = KeyIdentifier::new(" AB:CD ");
        let b = KeyIdentifier::new("abcd");
        assert_eq!(a, b);
        assert_eq!(KeyIdentifier::new(a.as_str()), a);
        assert_eq!(KeyIdentifier::new("Ab Cd\n\t12").as_str(), "abcd12");
    }

    #[test]
    fn test_table_lookup_any_form() {
        let table: TrustAnchorTable = [("AB:CD:EF", "MIIB")].into_iter().collect();
        assert_eq!(table.get("abcdef"), Some("MIIB"));
        assert_eq!(table.get(" ab cd ef "), Some("MIIB"));
        assert!(!table.contains("abcd"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_from_json_envelope_and_flat() {
        let envelope = TrustAnchorTable::from_json_str(r#"{"data": {"ABCD": "MIIB..."}}"#).unwrap();
        let flat = TrustAnchorTable::from_json_str(r#"{"abcd": "MIIB..."}"#).unwrap();
        assert_eq!(envelope, flat);
        assert_eq!(flat.get("abcd"), Some("MIIB..."));
    }

    #[test]
    fn test_envelope_with_sibling_fields() {
        let body = r#"{"status": "ok", "data": {"abcd": "MIIB..."}}"#;
        let table = TrustAnchorTable::from_json_str(body).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("ABCD"), Some("MIIB..."));
    }

    #[test]
    fn test_insert_colliding_identifiers_keeps_last() {
        let mut table = TrustAnchorTable::new();
        assert_eq!(table.insert("AB:CD", "FIRST"), None);
        assert_eq!(table.insert("abcd", "SECOND"), Some("FIRST".to_string()));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("ab cd"), Some("SECOND"));
    }

    #[test]
    fn test_from_json_rejects_non_string_values() {
        let result = TrustAnchorTable::from_json_str(r#"{"data": {"abcd": 42}}"#);
        assert!(matches!(result, Err(CscaError::Table { .. })));

        let result = TrustAnchorTable::from_json_str(r#"["abcd"]"#);
        assert!(matches!(result, Err(CscaError::Table { .. })));

        let result = TrustAnchorTable::from_json_str("{not json");
        assert!(matches!(result, Err(CscaError::Table { .. })));
    }

    #[test]
    fn test_json_roundtrip_through_envelope() {
        let table: TrustAnchorTable = [("01 02", "AAAA"), ("0a0b", "BBBB")].into_iter().collect();
        let json = table.to_json_pretty().unwrap();
        assert!(json.contains("\"data\""));
        assert_eq!(TrustAnchorTable::from_json_str(&json).unwrap(), table);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ski_pem_dev.json");
        tokio::fs::write(&path, r#"{"data": {"AA:BB": "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----"}}"#)
            .await
            .unwrap();

        let table = TrustAnchorTable::load(&path).await.unwrap();
        assert!(table.get("aabb").unwrap().starts_with("-----BEGIN"));

        let snapshot = dir.path().join("ski_pem_snapshot.json");
        tokio::fs::write(&snapshot, r#"{"status": "ok", "data": {"abcd": "MIIB..."}}"#)
            .await
            .unwrap();
        let table = TrustAnchorTable::load(&snapshot).await.unwrap();
        assert_eq!(table.get("abcd"), Some("MIIB..."));

        let missing = TrustAnchorTable::load(dir.path().join("absent.json")).await;
        assert!(matches!(missing, Err(CscaError::Table { .. })));
    }
}
