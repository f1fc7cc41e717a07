//! Record identity system using type-prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// The five record collections, each with its own id prefix and storage slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Embroidery floss
    Thread,
    /// Stitching fabric
    Fabric,
    /// Project kit
    Kit,
    /// Chart / pattern
    Pattern,
    /// Shopping list entry
    Shopping,
}

impl RecordKind {
    /// Get the id prefix for this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            RecordKind::Thread => "THR",
            RecordKind::Fabric => "FAB",
            RecordKind::Kit => "KIT",
            RecordKind::Pattern => "PAT",
            RecordKind::Shopping => "SHOP",
        }
    }

    /// Get the fixed storage slot name for this kind
    pub fn slot(&self) -> &'static str {
        match self {
            RecordKind::Thread => "threadData",
            RecordKind::Fabric => "fabricData",
            RecordKind::Kit => "kitData",
            RecordKind::Pattern => "patternData",
            RecordKind::Shopping => "shoppingListData",
        }
    }

    /// Human-readable plural label
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Thread => "threads",
            RecordKind::Fabric => "fabrics",
            RecordKind::Kit => "kits",
            RecordKind::Pattern => "patterns",
            RecordKind::Shopping => "shopping items",
        }
    }

    /// Get all kinds in display order
    pub fn all() -> &'static [RecordKind] {
        &[
            RecordKind::Thread,
            RecordKind::Fabric,
            RecordKind::Kit,
            RecordKind::Pattern,
            RecordKind::Shopping,
        ]
    }

    /// Find the kind that owns an id prefix
    pub fn from_prefix(s: &str) -> Result<Self, IdParseError> {
        let upper = s.to_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|k| k.prefix() == upper)
            .ok_or_else(|| IdParseError::InvalidPrefix(s.to_string()))
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// A unique record identifier combining a kind prefix and ULID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId {
    kind: RecordKind,
    ulid: Ulid,
}

impl RecordId {
    /// Create a fresh RecordId for the given kind
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            ulid: Ulid::new(),
        }
    }

    /// Create a RecordId from a kind and existing ULID
    pub fn from_parts(kind: RecordKind, ulid: Ulid) -> Self {
        Self { kind, ulid }
    }

    /// Get the record kind
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Get the ULID component
    pub fn ulid(&self) -> Ulid {
        self.ulid
    }

    /// Parse a RecordId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.prefix(), self.ulid)
    }
}

impl FromStr for RecordId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        let kind = RecordKind::from_prefix(prefix_str)?;
        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self { kind, ulid })
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing record IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid record prefix: '{0}' (valid: THR, FAB, KIT, PAT, SHOP)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in record ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_generation() {
        let id = RecordId::new(RecordKind::Thread);
        assert!(id.to_string().starts_with("THR-"));
        assert_eq!(id.to_string().len(), 30); // THR- (4) + ULID (26)
    }

    #[test]
    fn test_record_id_roundtrip() {
        let original = RecordId::new(RecordKind::Shopping);
        let parsed = RecordId::parse(&original.to_string()).unwrap();
        assert_eq!(parsed.kind(), RecordKind::Shopping);
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_record_ids_are_unique() {
        let a = RecordId::new(RecordKind::Kit);
        let b = RecordId::new(RecordKind::Kit);
        assert_ne!(a, b);
    }

    #[test]
    fn test_record_id_invalid_prefix() {
        let err = RecordId::parse("REQ-01HQ3K4N5M6P7R8S9T0VWXYZAB").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidPrefix(_)));
    }

    #[test]
    fn test_record_id_missing_delimiter() {
        let err = RecordId::parse("THR01HQ3K4N5M6P7R8S9T0VWXYZ").unwrap_err();
        assert!(matches!(err, IdParseError::MissingDelimiter(_)));
    }

    #[test]
    fn test_record_id_invalid_ulid() {
        let err = RecordId::parse("FAB-notaulid").unwrap_err();
        assert!(matches!(err, IdParseError::InvalidUlid(_, _)));
    }

    #[test]
    fn test_slot_names_are_fixed() {
        assert_eq!(RecordKind::Thread.slot(), "threadData");
        assert_eq!(RecordKind::Fabric.slot(), "fabricData");
        assert_eq!(RecordKind::Kit.slot(), "kitData");
        assert_eq!(RecordKind::Pattern.slot(), "patternData");
        assert_eq!(RecordKind::Shopping.slot(), "shoppingListData");
    }

    #[test]
    fn test_prefix_lookup_is_case_insensitive() {
        assert_eq!(RecordKind::from_prefix("pat").unwrap(), RecordKind::Pattern);
        assert!(RecordKind::from_prefix("XYZ").is_err());
    }
}
