//! Serde helpers for SurrealDB values
//!
//! RecordIds deserialize from either form:
//! - `"table:id"` strings (API JSON)
//! - SurrealDB native values (database rows)
//!
//! and always serialize as `"table:id"` strings.

use serde::{Deserialize, Deserializer, Serializer};
use surrealdb::RecordId;

/// Deserialize bool that treats null as true
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(true))
}

/// Deserialize bool that treats null as false
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

/// Accepts both string and native RecordId forms
#[derive(Debug, Clone)]
struct FlexibleRecordId(RecordId);

impl<'de> Deserialize<'de> for FlexibleRecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct FlexibleVisitor;

        impl<'de> Visitor<'de> for FlexibleVisitor {
            type Value = FlexibleRecordId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string 'table:id' or RecordId")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                value
                    .parse::<RecordId>()
                    .map(FlexibleRecordId)
                    .map_err(|_| de::Error::custom(format!("invalid RecordId: {}", value)))
            }

            fn visit_map<M>(self, map: M) -> Result<Self::Value, M::Error>
            where
                M: de::MapAccess<'de>,
            {
                RecordId::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(FlexibleRecordId)
            }
        }

        deserializer.deserialize_any(FlexibleVisitor)
    }
}

/// RecordId serialization as "table:id" string
pub mod record_id {
    use super::*;

    pub fn serialize<S>(id: &RecordId, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&id.to_string())
    }

    pub fn deserialize<'de, D>(d: D) -> Result<RecordId, D::Error>
    where
        D: Deserializer<'de>,
    {
        FlexibleRecordId::deserialize(d).map(|f| f.0)
    }
}

/// Option<RecordId> serialization
pub mod option_record_id {
    use super::*;

    pub fn serialize<S>(id: &Option<RecordId>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match id {
            Some(id) => s.serialize_some(&id.to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<RecordId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<FlexibleRecordId>::deserialize(d).map(|opt| opt.map(|f| f.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct Row {
        #[serde(with = "record_id")]
        owner: RecordId,
        #[serde(default, with = "option_record_id")]
        parent: Option<RecordId>,
        #[serde(default, deserialize_with = "bool_true")]
        active: bool,
    }

    #[test]
    fn test_string_record_id_round_trip() {
        let row: Row = serde_json::from_str(r#"{"owner":"employee:ann","parent":null,"active":null}"#)
            .unwrap();
        assert_eq!(row.owner, RecordId::from_table_key("employee", "ann"));
        assert!(row.parent.is_none());
        assert!(row.active);

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["owner"], "employee:ann");
    }

    #[test]
    fn test_invalid_record_id_rejected() {
        let res: Result<Row, _> = serde_json::from_str(r#"{"owner":"no table"}"#);
        assert!(res.is_err());
    }
}
