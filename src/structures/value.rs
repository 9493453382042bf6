use std::collections::BTreeMap;

use log::debug;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::structures::listing::Listing;
use crate::structures::thing::Thing;

/// The source fields of an entity, keyed by their API names.
pub type Fields = BTreeMap<String, Hydrated>;

/// A JSON value where any position may have been replaced by a typed entity.
///
/// Apart from the `Thing` case this mirrors `serde_json::Value`, so primitives pass through
/// hydration untouched. Serializing a `Hydrated` gives back the JSON shape that Reddit sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Hydrated {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number, kept exactly as parsed.
    Number(Number),
    /// JSON string.
    String(String),
    /// JSON array, in its original order.
    Array(Vec<Hydrated>),
    /// JSON object with its keys preserved.
    Object(Fields),
    /// A typed entity built by an `ObjectFactory`.
    Thing(Box<Thing>),
}

impl Hydrated {
    /// Wraps a typed entity.
    pub fn thing(thing: Thing) -> Hydrated {
        Hydrated::Thing(Box::new(thing))
    }

    /// Builds a single-entry object, e.g. `{name: "spez"}` for a stub user.
    pub fn object_with(key: &str, value: Hydrated) -> Hydrated {
        let mut fields = Fields::new();
        fields.insert(key.to_owned(), value);
        Hydrated::Object(fields)
    }

    /// `true` for JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(*self, Hydrated::Null)
    }

    /// The string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Hydrated::String(ref s) => Some(s),
            _ => None,
        }
    }

    /// The boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Hydrated::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// The integer value, if this is a number that fits in an `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Hydrated::Number(ref n) => n.as_i64(),
            _ => None,
        }
    }

    /// For some reason, Reddit sometimes sends its timestamps as floats and sometimes as
    /// integers, so both are accepted here and floats are truncated.
    pub fn as_timestamp(&self) -> Option<i64> {
        match *self {
            Hydrated::Number(ref n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            _ => None,
        }
    }

    /// The typed entity, if this position holds one.
    pub fn as_thing(&self) -> Option<&Thing> {
        match *self {
            Hydrated::Thing(ref thing) => Some(thing),
            _ => None,
        }
    }

    /// Unwraps the typed entity, if this position holds one.
    pub fn into_thing(self) -> Option<Thing> {
        match self {
            Hydrated::Thing(thing) => Some(*thing),
            _ => None,
        }
    }

    /// Unwraps a listing, if this position holds one.
    pub fn into_listing(self) -> Option<Listing> {
        self.into_thing().and_then(Thing::into_listing)
    }

    /// Looks up a key of a plain object. Typed entities expose their fields through `Thing`.
    pub fn get(&self, key: &str) -> Option<&Hydrated> {
        match *self {
            Hydrated::Object(ref fields) => fields.get(key),
            _ => None,
        }
    }

    /// Consumes an entity payload and returns its fields. Payloads that are not objects carry
    /// no fields (`null` is the usual case, for an envelope without `data`).
    pub fn into_fields(self) -> Fields {
        match self {
            Hydrated::Object(fields) => fields,
            Hydrated::Null => Fields::new(),
            other => {
                debug!("entity payload is not an object, ignoring it: {:?}", other);
                Fields::new()
            }
        }
    }

    /// Serializes back to a plain JSON value.
    pub fn to_json(&self) -> Value {
        // Every case maps onto a JSON value and all map keys are strings.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<&Value> for Hydrated {
    /// Converts without hydrating: nested envelopes stay plain objects.
    fn from(value: &Value) -> Hydrated {
        match *value {
            Value::Null => Hydrated::Null,
            Value::Bool(b) => Hydrated::Bool(b),
            Value::Number(ref n) => Hydrated::Number(n.clone()),
            Value::String(ref s) => Hydrated::String(s.clone()),
            Value::Array(ref items) => Hydrated::Array(items.iter().map(Hydrated::from).collect()),
            Value::Object(ref map) => {
                Hydrated::Object(map.iter().map(|(k, v)| (k.clone(), Hydrated::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Hydrated {
    fn from(value: &str) -> Hydrated {
        Hydrated::String(value.to_owned())
    }
}

impl From<String> for Hydrated {
    fn from(value: String) -> Hydrated {
        Hydrated::String(value)
    }
}

impl From<Thing> for Hydrated {
    fn from(thing: Thing) -> Hydrated {
        Hydrated::thing(thing)
    }
}

/// Reads a string field.
pub fn str_field<'a>(fields: &'a Fields, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Hydrated::as_str)
}

/// Reads a field holding a typed entity.
pub fn thing_field<'a>(fields: &'a Fields, key: &str) -> Option<&'a Thing> {
    fields.get(key).and_then(Hydrated::as_thing)
}

/// Writes a string field, or removes it when `value` is `None`.
pub fn set_str_field(fields: &mut Fields, key: &str, value: Option<String>) {
    match value {
        Some(value) => {
            fields.insert(key.to_owned(), Hydrated::String(value));
        }
        None => {
            fields.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Hydrated;

    #[test]
    fn conversion_keeps_shape() {
        let raw = json!({"a": [1, 2.5, "x", null, true], "b": {"c": false}});
        let hydrated = Hydrated::from(&raw);
        assert_eq!(hydrated.to_json(), raw);
    }

    #[test]
    fn timestamps_accept_floats_and_integers() {
        assert_eq!(Hydrated::from(&json!(1469900000)).as_timestamp(), Some(1469900000));
        assert_eq!(Hydrated::from(&json!(1469900000.0)).as_timestamp(), Some(1469900000));
        assert_eq!(Hydrated::from(&json!("1469900000")).as_timestamp(), None);
    }

    #[test]
    fn non_object_payload_has_no_fields() {
        assert!(Hydrated::Null.into_fields().is_empty());
        assert!(Hydrated::from("oops").into_fields().is_empty());
    }
}
