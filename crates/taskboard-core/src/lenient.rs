//! Tolerant field readers for stored records
//!
//! Documents written by other tools may hold `null` where a value is
//! expected, or numbers outside the range this model uses. These readers
//! turn such values into defaults so one bad field never drops a record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a field, treating `null` like a missing key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a column position, falling back to 0 when it is not a `u32`
pub(crate) fn column_order<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => 0,
        Some(value) => value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or_else(|| {
                tracing::warn!(%value, "column order out of range, using 0");
                0
            }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "null_as_default")]
        text: String,
        #[serde(default, deserialize_with = "null_as_default")]
        items: Vec<String>,
        #[serde(default, deserialize_with = "column_order")]
        order: u32,
    }

    fn read(value: Value) -> Sample {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn null_reads_as_default() {
        let sample = read(json!({ "text": null, "items": null, "order": null }));
        assert_eq!(sample.text, "");
        assert!(sample.items.is_empty());
        assert_eq!(sample.order, 0);
    }

    #[test]
    fn present_values_pass_through() {
        let sample = read(json!({ "text": "x", "items": ["a"], "order": 4 }));
        assert_eq!(sample.text, "x");
        assert_eq!(sample.items, ["a"]);
        assert_eq!(sample.order, 4);
    }

    #[test]
    fn out_of_range_order_falls_back() {
        assert_eq!(read(json!({ "order": -1 })).order, 0);
        assert_eq!(read(json!({ "order": 4_294_967_296_u64 })).order, 0);
        assert_eq!(read(json!({ "order": 1.5 })).order, 0);
        assert_eq!(read(json!({ "order": "2" })).order, 0);
    }
}
