//! Custom serde helpers for backend wire formats.

/// Deserializes a JSON string or number into its string form.
///
/// The backend mixes representations freely: SQLite ids come back as
/// integers, form values as strings, and `SUM()` aggregates occasionally as
/// floats (`150.0`). Whole floats are normalized to their integer text.
pub mod string_or_number {
    use serde::de::{self, Visitor};
    use serde::Deserializer;
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StringOrNumber)
    }

    struct StringOrNumber;

    impl<'de> Visitor<'de> for StringOrNumber {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
                Ok(format!("{}", v as i64))
            } else {
                Ok(v.to_string())
            }
        }
    }
}
