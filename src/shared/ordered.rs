//! Serde helper for string keyed maps that must keep document order.
//!
//! Use with `#[serde(with = "crate::shared::ordered")]` on a
//! `Vec<(String, T)>` field. The field is written as a JSON object and read
//! back in the order the keys appear. A repeated key overwrites the earlier
//! value but keeps the earlier position.

use std::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

pub fn serialize<S, T>(entries: &[(String, T)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (key, value) in entries {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    deserializer.deserialize_map(EntriesVisitor(PhantomData))
}

struct EntriesVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for EntriesVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = Vec<(String, T)>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map with string keys")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries: Vec<(String, T)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, T>()? {
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Table {
        #[serde(with = "super")]
        rows: Vec<(String, u32)>,
    }

    #[test]
    fn keeps_document_order() {
        let table: Table = serde_json::from_str(r#"{"rows": {"b": 1, "a": 2, "c": 3}}"#).unwrap();
        let keys: Vec<_> = table.rows.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert_eq!(
            serde_json::to_string(&table).unwrap(),
            r#"{"rows":{"b":1,"a":2,"c":3}}"#
        );
    }

    #[test]
    fn repeated_key_overwrites_in_place() {
        let table: Table = serde_json::from_str(r#"{"rows": {"a": 1, "b": 2, "a": 9}}"#).unwrap();
        assert_eq!(table.rows, vec![("a".to_string(), 9), ("b".to_string(), 2)]);
    }
}
