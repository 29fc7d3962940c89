//! Lore Types - Level 1 Foundation Types
//!
//! Pure data structures for lore records (persons, locations, organizations,
//! items) shared by the linker, the record store and the CLI.
//!
//! ## Architecture Level: LEVEL 1 (Foundation)
//!
//! This crate depends on nothing else in the workspace. It holds:
//! - Record identity and kind
//! - The infobox tree (`InfoboxNode`)
//! - The index projection of a record (`IndexRow`)
//! - Record validation errors
//!
//! Business logic (normalization, linking) lives in `lore-linker`.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Type alias for record IDs
pub type RecordId = Uuid;

// ============================================================================
// RECORD KIND
// ============================================================================

/// The four kinds of lore record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Person,
    Location,
    Organization,
    Item,
}

impl RecordType {
    /// Lower-case name as stored in record documents
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Person => "person",
            RecordType::Location => "location",
            RecordType::Organization => "organization",
            RecordType::Item => "item",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// INFOBOX TREE
// ============================================================================

/// A node of the structured infobox.
///
/// Deserialized from arbitrary JSON/YAML. Variant order matters for the
/// untagged representation: scalars are tried before containers.
///
/// Mapping keys may be strings, numbers or booleans (YAML `1120: founded`)
/// and are stored as text. Any other key kind rejects the whole node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoboxNode {
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
    Sequence(Vec<InfoboxNode>),
    #[serde(deserialize_with = "deserialize_mapping")]
    Mapping(BTreeMap<String, InfoboxNode>),
    #[default]
    Empty,
}

fn deserialize_mapping<'de, D>(deserializer: D) -> Result<BTreeMap<String, InfoboxNode>, D::Error>
where
    D: Deserializer<'de>,
{
    struct MappingVisitor;

    impl<'de> Visitor<'de> for MappingVisitor {
        type Value = BTreeMap<String, InfoboxNode>;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a mapping with scalar keys")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut map = BTreeMap::new();
            while let Some((ScalarKey(key), value)) = access.next_entry::<ScalarKey, InfoboxNode>()? {
                map.insert(key, value);
            }
            Ok(map)
        }
    }

    deserializer.deserialize_map(MappingVisitor)
}

/// Mapping key read from any scalar
struct ScalarKey(String);

impl<'de> Deserialize<'de> for ScalarKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = ScalarKey;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a string, number or boolean key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<ScalarKey, E> {
                Ok(ScalarKey(v.to_string()))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

impl InfoboxNode {
    /// Convenience constructor for text leaves
    pub fn text(value: impl Into<String>) -> Self {
        InfoboxNode::Text(value.into())
    }

    /// Build a mapping node from `(key, node)` pairs
    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, InfoboxNode)>) -> Self {
        InfoboxNode::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Text content of a leaf, if this node is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            InfoboxNode::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a child of a mapping node
    pub fn get(&self, key: &str) -> Option<&InfoboxNode> {
        match self {
            InfoboxNode::Mapping(map) => map.get(key),
            _ => None,
        }
    }
}

impl From<&str> for InfoboxNode {
    fn from(value: &str) -> Self {
        InfoboxNode::Text(value.to_string())
    }
}

impl From<String> for InfoboxNode {
    fn from(value: String) -> Self {
        InfoboxNode::Text(value)
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// A lore record as authored and persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Store identifier, absent until persisted
    #[serde(rename = "_id", alias = "id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,

    /// Unique human-readable key (e.g. "nolen2")
    #[serde(default)]
    pub name_id: String,

    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Given and middle names (persons only)
    #[serde(default)]
    pub names: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default)]
    pub infobox: InfoboxNode,

    /// Article title -> body text
    #[serde(default)]
    pub articles: BTreeMap<String, String>,

    /// Records mentioned by this one (computed by the linker)
    #[serde(default)]
    pub linked_records: Vec<RecordId>,
}

impl Record {
    /// Create an empty record of the given kind
    pub fn new(name_id: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            id: None,
            name_id: name_id.into(),
            record_type,
            names: Vec::new(),
            last_name: None,
            infobox: InfoboxNode::Empty,
            articles: BTreeMap::new(),
            linked_records: Vec::new(),
        }
    }

    /// Create a person record
    pub fn person<I, S>(name_id: impl Into<String>, names: I, last_name: Option<&str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            last_name: last_name.map(str::to_string),
            ..Self::new(name_id, RecordType::Person)
        }
    }

    pub fn is_person(&self) -> bool {
        self.record_type == RecordType::Person
    }

    /// Check the authoring invariants before a record is linked or stored
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.name_id.trim().is_empty() {
            return Err(RecordError::EmptyNameId);
        }
        match self.record_type {
            RecordType::Person if self.names.iter().all(|n| n.trim().is_empty()) => {
                Err(RecordError::PersonWithoutNames(self.name_id.clone()))
            }
            RecordType::Person => Ok(()),
            other if !self.names.is_empty() => Err(RecordError::NamesOnNonPerson {
                name_id: self.name_id.clone(),
                record_type: other,
            }),
            _ => Ok(()),
        }
    }

    /// Index projection of a persisted record (None until it has an id)
    pub fn index_row(&self) -> Option<IndexRow> {
        Some(IndexRow {
            id: self.id?,
            name_id: self.name_id.clone(),
            record_type: self.record_type,
            names: self.names.clone(),
            last_name: self.last_name.clone(),
        })
    }
}

/// The fields of a record the name index is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRow {
    #[serde(rename = "_id", alias = "id")]
    pub id: RecordId,
    pub name_id: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

// ============================================================================
// ERRORS
// ============================================================================

/// Record-level validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Record has an empty name_id")]
    EmptyNameId,

    #[error("Person record '{0}' has no names")]
    PersonWithoutNames(String),

    #[error("Record '{name_id}' of type {record_type} must not carry person names")]
    NamesOnNonPerson {
        name_id: String,
        record_type: RecordType,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_type_names() {
        for kind in [
            RecordType::Person,
            RecordType::Location,
            RecordType::Organization,
            RecordType::Item,
        ] {
            let yaml = serde_yaml::to_string(&kind).unwrap();
            assert_eq!(yaml.trim(), kind.as_str());
            assert_eq!(kind.to_string(), kind.as_str());
        }
        assert!(serde_yaml::from_str::<RecordType>("dragon").is_err());
    }

    #[test]
    fn test_parse_record_from_yaml() {
        let yaml = r#"
name_id: nolen2
type: person
names: [Nolen, Constantin, Lepidus]
last_name: Silverbridge
infobox:
  biographical_info:
    origin: Umaron
    age: 34
    height: 1.82
    alive: true
    titles: [Lord, null]
articles:
  description: Nolen is a knight.
"#;
        let record: Record = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(record.id, None);
        assert!(record.is_person());
        assert_eq!(record.names.len(), 3);

        let bio = record.infobox.get("biographical_info").unwrap();
        assert_eq!(bio.get("origin").and_then(InfoboxNode::as_text), Some("Umaron"));
        assert!(matches!(bio.get("age"), Some(InfoboxNode::Number(_))));
        assert!(matches!(bio.get("height"), Some(InfoboxNode::Number(_))));
        assert_eq!(bio.get("alive"), Some(&InfoboxNode::Flag(true)));
        assert_eq!(
            bio.get("titles"),
            Some(&InfoboxNode::Sequence(vec![
                InfoboxNode::text("Lord"),
                InfoboxNode::Empty
            ]))
        );
        assert!(record.linked_records.is_empty());
    }

    #[test]
    fn test_infobox_scalar_keys_become_text() {
        let yaml = r#"
name_id: silverguard
type: organization
infobox:
  history:
    1120: founded
    true: sworn
  seat: Umaron
"#;
        let record: Record = serde_yaml::from_str(yaml).unwrap();
        let history = record.infobox.get("history").unwrap();
        assert_eq!(history.get("1120").and_then(InfoboxNode::as_text), Some("founded"));
        assert_eq!(history.get("true").and_then(InfoboxNode::as_text), Some("sworn"));
        assert_eq!(record.infobox.get("seat").and_then(InfoboxNode::as_text), Some("Umaron"));
    }

    #[test]
    fn test_infobox_rejects_sequence_keys() {
        let yaml = "name_id: x\ntype: item\ninfobox:\n  ? [a, b]\n  : value\n";
        assert!(serde_yaml::from_str::<Record>(yaml).is_err());
    }

    #[test]
    fn test_record_json_uses_underscore_id() {
        let mut record = Record::new("umaron", RecordType::Location);
        record.id = Some(Uuid::nil());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["_id"], serde_json::json!(Uuid::nil()));
        assert_eq!(json["type"], "location");

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_validate() {
        assert!(Record::new("umaron", RecordType::Location).validate().is_ok());
        assert_eq!(
            Record::new("", RecordType::Item).validate(),
            Err(RecordError::EmptyNameId)
        );
        assert_eq!(
            Record::new("garrett", RecordType::Person).validate(),
            Err(RecordError::PersonWithoutNames("garrett".to_string()))
        );

        let mut sword = Record::new("sword", RecordType::Item);
        sword.names = vec!["Blade".to_string()];
        assert!(matches!(
            sword.validate(),
            Err(RecordError::NamesOnNonPerson { .. })
        ));

        let garrett = Record::person("garrett", ["Garrett"], Some("von Danamark"));
        assert!(garrett.validate().is_ok());
    }

    #[test]
    fn test_index_row_requires_id() {
        let mut record = Record::person("one", ["One", "Two"], Some("Three"));
        assert!(record.index_row().is_none());

        let id = Uuid::new_v4();
        record.id = Some(id);
        let row = record.index_row().unwrap();
        assert_eq!(row.id, id);
        assert_eq!(row.record_type, RecordType::Person);
        assert_eq!(row.last_name.as_deref(), Some("Three"));
    }
}
