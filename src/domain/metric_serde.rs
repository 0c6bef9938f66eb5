//! JSON encoding for metric values that may be non-finite.
//!
//! A diverging run produces NaN or infinite losses. JSON has no literal for
//! those and `serde_json` would write `null`, so they are written as the
//! strings `"NaN"`, `"inf"` and `"-inf"` instead. Finite values stay numbers.

use serde::{Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Encoded {
    Number(f64),
    Text(String),
}

impl Encoded {
    fn decode<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            Encoded::Number(v) => Ok(v),
            Encoded::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(E::custom(format!("invalid metric value '{other}'"))),
            },
        }
    }
}

pub fn serialize_metric<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("NaN")
    } else if *value > 0.0 {
        serializer.serialize_str("inf")
    } else {
        serializer.serialize_str("-inf")
    }
}

pub fn deserialize_metric<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Encoded::deserialize(deserializer)?.decode()
}

pub fn serialize_optional_metric<S: Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serialize_metric(v, serializer),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize_optional_metric<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<Encoded>::deserialize(deserializer)? {
        Some(encoded) => encoded.decode().map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(
            serialize_with = "super::serialize_metric",
            deserialize_with = "super::deserialize_metric"
        )]
        value: f64,
    }

    fn encode(value: f64) -> String {
        serde_json::to_string(&Wrapper { value }).unwrap()
    }

    fn decode(json: &str) -> f64 {
        serde_json::from_str::<Wrapper>(json).unwrap().value
    }

    #[test]
    fn finite_values_stay_numbers() {
        assert_eq!(encode(1.25), r#"{"value":1.25}"#);
        assert_eq!(decode(r#"{"value":1.25}"#), 1.25);
        assert_eq!(decode(r#"{"value":3}"#), 3.0);
    }

    #[test]
    fn non_finite_values_are_written_as_strings() {
        assert_eq!(encode(f64::NAN), r#"{"value":"NaN"}"#);
        assert_eq!(encode(f64::INFINITY), r#"{"value":"inf"}"#);
        assert_eq!(encode(f64::NEG_INFINITY), r#"{"value":"-inf"}"#);

        assert!(decode(r#"{"value":"NaN"}"#).is_nan());
        assert_eq!(decode(r#"{"value":"inf"}"#), f64::INFINITY);
        assert_eq!(decode(r#"{"value":"-inf"}"#), f64::NEG_INFINITY);
    }

    #[test]
    fn unknown_text_is_rejected() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":"lots"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":null}"#).is_err());
    }
}
