//! Serde helpers for loosely typed search payloads.
//!
//! Responsibilities:
//! - Provide deserializers that accept either JSON numbers or strings for numeric fields.
//! - Provide `LenientValue`, a deserializer over `serde_json::Value` used to materialize
//!   result rows into caller types: keys match struct fields case-insensitively, numeric
//!   strings coerce into numbers and `"true"`/`"false"` coerce into booleans.
//!
//! Explicitly does NOT handle:
//! - Validating higher-level semantics (ranges, required/optional business rules).
//! - Normalizing units or performing domain conversions.
//!
//! Invariants / assumptions:
//! - The service returns every result field value as a string, and counts as numbers or strings.
//! - These helpers must not log row contents; errors are generic parse errors.

use serde::Deserialize;
use serde::de::value::StringDeserializer;
use serde::de::{
    self, DeserializeSeed, Deserializer, Error as _, IntoDeserializer, MapAccess, SeqAccess,
    Visitor,
};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum U64OrString {
    U64(u64),
    I64(i64),
    String(String),
}

pub fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = U64OrString::deserialize(deserializer)?;
    match value {
        U64OrString::U64(v) => Ok(v),
        U64OrString::I64(v) => u64::try_from(v).map_err(D::Error::custom),
        U64OrString::String(s) => s.trim().parse::<u64>().map_err(D::Error::custom),
    }
}

/// Accepts a JSON array or `null`, treating `null` as empty.
pub fn vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializer over an owned JSON value with lenient scalar coercion.
pub(crate) struct LenientValue(pub(crate) Value);

macro_rules! lenient_number {
    ($($method:ident => $ty:ty, $visit:ident;)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
                let value = self.0;
                if let Value::String(s) = &value
                    && let Ok(n) = s.trim().parse::<$ty>()
                {
                    return visitor.$visit(n);
                }
                value.$method(visitor)
            }
        )*
    };
}

macro_rules! forward_to_value {
    ($($method:ident($($arg:ident: $ty:ty),*);)*) => {
        $(
            fn $method<V: Visitor<'de>>(
                self,
                $($arg: $ty,)*
                visitor: V,
            ) -> Result<V::Value, Self::Error> {
                self.0.$method($($arg,)* visitor)
            }
        )*
    };
}

impl<'de> Deserializer<'de> for LenientValue {
    type Error = serde_json::Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.0 {
            Value::Object(map) => visitor.visit_map(LenientMap::new(map, &[])),
            Value::Array(items) => visitor.visit_seq(LenientSeq::new(items)),
            other => other.deserialize_any(visitor),
        }
    }

    lenient_number! {
        deserialize_i8 => i8, visit_i8;
        deserialize_i16 => i16, visit_i16;
        deserialize_i32 => i32, visit_i32;
        deserialize_i64 => i64, visit_i64;
        deserialize_u8 => u8, visit_u8;
        deserialize_u16 => u16, visit_u16;
        deserialize_u32 => u32, visit_u32;
        deserialize_u64 => u64, visit_u64;
        deserialize_f32 => f32, visit_f32;
        deserialize_f64 => f64, visit_f64;
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let value = self.0;
        if let Value::String(s) = &value {
            let s = s.trim();
            if s.eq_ignore_ascii_case("true") {
                return visitor.visit_bool(true);
            }
            if s.eq_ignore_ascii_case("false") {
                return visitor.visit_bool(false);
            }
        }
        value.deserialize_bool(visitor)
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.0 {
            Value::Number(n) => visitor.visit_string(n.to_string()),
            Value::Bool(b) => visitor.visit_string(b.to_string()),
            other => other.deserialize_string(visitor),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.0 {
            Value::Null => visitor.visit_none(),
            other => visitor.visit_some(LenientValue(other)),
        }
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.0 {
            Value::Array(items) => visitor.visit_seq(LenientSeq::new(items)),
            other => other.deserialize_seq(visitor),
        }
    }

    fn deserialize_tuple<V: Visitor<'de>>(
        self,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.0 {
            Value::Object(map) => visitor.visit_map(LenientMap::new(map, &[])),
            other => other.deserialize_map(visitor),
        }
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        match self.0 {
            Value::Object(map) => visitor.visit_map(LenientMap::new(map, fields)),
            other => other.deserialize_struct(name, fields, visitor),
        }
    }

    forward_to_value! {
        deserialize_char();
        deserialize_str();
        deserialize_bytes();
        deserialize_byte_buf();
        deserialize_unit();
        deserialize_unit_struct(name: &'static str);
        deserialize_enum(name: &'static str, variants: &'static [&'static str]);
        deserialize_identifier();
        deserialize_ignored_any();
    }
}

/// Map access that renames keys to the matching struct field, ignoring ASCII case.
///
/// Each field is claimed at most once: an exact-case key wins, otherwise the
/// first case variant does. Other variants keep their name and are ignored as
/// unknown fields.
struct LenientMap {
    iter: std::vec::IntoIter<(String, Value)>,
    value: Option<Value>,
}

impl LenientMap {
    fn new(map: Map<String, Value>, fields: &'static [&'static str]) -> Self {
        let mut claimed: Vec<&str> = fields
            .iter()
            .copied()
            .filter(|field| map.contains_key(*field))
            .collect();

        let entries: Vec<(String, Value)> = map
            .into_iter()
            .map(|(key, value)| {
                if fields.contains(&key.as_str()) {
                    return (key, value);
                }
                match fields
                    .iter()
                    .find(|field| field.eq_ignore_ascii_case(&key) && !claimed.contains(field))
                {
                    Some(field) => {
                        claimed.push(*field);
                        ((*field).to_string(), value)
                    }
                    None => (key, value),
                }
            })
            .collect();

        Self {
            iter: entries.into_iter(),
            value: None,
        }
    }
}

impl<'de> MapAccess<'de> for LenientMap {
    type Error = serde_json::Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                let key: StringDeserializer<serde_json::Error> = key.into_deserializer();
                seed.deserialize(key).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<S>(&mut self, seed: S) -> Result<S::Value, Self::Error>
    where
        S: DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(LenientValue(value)),
            None => Err(de::Error::custom("value is missing")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct LenientSeq {
    iter: std::vec::IntoIter<Value>,
}

impl LenientSeq {
    fn new(items: Vec<Value>) -> Self {
        Self {
            iter: items.into_iter(),
        }
    }
}

impl<'de> SeqAccess<'de> for LenientSeq {
    type Error = serde_json::Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>, Self::Error>
    where
        T: DeserializeSeed<'de>,
    {
        self.iter
            .next()
            .map(|value| seed.deserialize(LenientValue(value)))
            .transpose()
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Counts {
        #[serde(deserialize_with = "u64_from_string_or_number")]
        value: u64,
    }

    #[test]
    fn test_u64_from_string_or_number() {
        let from_number: Counts = serde_json::from_value(json!({"value": 42})).unwrap();
        let from_string: Counts = serde_json::from_value(json!({"value": "42"})).unwrap();
        assert_eq!(from_number.value, 42);
        assert_eq!(from_string.value, 42);
        assert!(serde_json::from_value::<Counts>(json!({"value": "many"})).is_err());
        assert!(serde_json::from_value::<Counts>(json!({"value": -1})).is_err());
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        host: String,
        count: u32,
        ratio: f64,
        ok: bool,
        missing: Option<String>,
        #[serde(default)]
        tags: Vec<String>,
    }

    #[test]
    fn test_lenient_row_coercion_and_case_insensitive_keys() {
        let value = json!({
            "HOST": "web-1",
            "Count": "17",
            "ratio": "0.5",
            "ok": "TRUE",
            "extra": "ignored"
        });
        let row = Row::deserialize(LenientValue(value)).unwrap();
        assert_eq!(
            row,
            Row {
                host: "web-1".to_string(),
                count: 17,
                ratio: 0.5,
                ok: true,
                missing: None,
                tags: vec![],
            }
        );
    }

    #[test]
    fn test_case_variants_of_one_field_do_not_collide() {
        #[derive(Debug, Deserialize)]
        struct Hit {
            host: String,
        }

        let hit = Hit::deserialize(LenientValue(json!({"host": "a", "HOST": "b"}))).unwrap();
        assert_eq!(hit.host, "a");

        let hit = Hit::deserialize(LenientValue(json!({"HOST": "b", "host": "a"}))).unwrap();
        assert_eq!(hit.host, "a");

        let folded =
            Hit::deserialize(LenientValue(json!({"Host": "x", "HOST": "y"}))).unwrap();
        assert!(folded.host == "x" || folded.host == "y");
    }

    #[test]
    fn test_lenient_rejects_non_numeric_string() {
        let value = json!({"host": "a", "count": "lots", "ratio": 1.0, "ok": false});
        assert!(Row::deserialize(LenientValue(value)).is_err());
    }

    #[test]
    fn test_lenient_number_into_string_field() {
        #[derive(Deserialize)]
        struct Named {
            name: String,
        }
        let named = Named::deserialize(LenientValue(json!({"name": 7}))).unwrap();
        assert_eq!(named.name, "7");
    }

    #[test]
    fn test_lenient_into_json_map_keeps_keys() {
        let value = json!({"_raw": "line", "Count": "3"});
        let map = Map::<String, Value>::deserialize(LenientValue(value)).unwrap();
        assert_eq!(map.get("Count"), Some(&json!("3")));
        assert_eq!(map.get("_raw"), Some(&json!("line")));
    }

    #[test]
    fn test_lenient_renamed_field() {
        #[derive(Deserialize)]
        struct Message {
            #[serde(rename = "_messagetime")]
            message_time: i64,
        }
        let msg = Message::deserialize(LenientValue(json!({"_MessageTime": "1700000000000"})))
            .unwrap();
        assert_eq!(msg.message_time, 1_700_000_000_000);
    }
}
