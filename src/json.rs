//! Conversion from [`serde_json`] values.
//!
//! Used by the `0x0f` escape, which embeds a JSON document as text, and handy for
//! building [`Value`]s from existing JSON.

use crate::{inum::Inum, vecmap::VecMap, Value};
use serde_json::{Number, Value as Json};

fn from_number(n: Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Int(Inum::from(i))
    } else if let Some(u) = n.as_u64() {
        Value::Int(Inum::from(u))
    } else {
        // every number serde_json parses is an i64, a u64 or an f64
        Value::Float(n.as_f64().unwrap_or(std::f64::NAN))
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => from_number(n),
            Json::String(s) => Value::Text(s),
            Json::Array(a) => Value::Array(a.into_iter().map(Value::from).collect()),
            Json::Object(o) => Value::Map(
                o.into_iter()
                    .map(|(k, v)| (Value::Text(k), Value::from(v)))
                    .collect::<VecMap<_, _>>(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document() {
        let v = Value::from(json!({
            "z": [1, -2, 18446744073709551615u64, 0.5],
            "a": {"nested": null, "ok": true},
        }));

        let m = v.to_map().unwrap();
        // object order is kept
        assert_eq!(m.keys().next(), Some(&Value::from("z")));
        assert_eq!(
            m.get(&Value::from("z")).unwrap(),
            &Value::from(vec![
                Value::from(1),
                Value::from(-2),
                Value::from(u64::max_value()),
                Value::from(0.5),
            ])
        );
        let a = m.get(&Value::from("a")).unwrap().to_map().unwrap();
        assert!(a.get(&Value::from("nested")).unwrap().is_null());
    }
}
