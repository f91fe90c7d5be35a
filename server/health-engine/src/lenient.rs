//! Field deserializer that treats `null` or a wrongly typed value as the default.
//!
//! Use as `#[serde(default, deserialize_with = "or_default")]`: absent keys hit
//! `default`, present-but-unusable values hit this function.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned + Default,
{
  let value = Value::deserialize(deserializer)?;
  Ok(T::deserialize(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Default, Deserialize)]
  #[serde(default)]
  struct Sample {
    #[serde(deserialize_with = "or_default")]
    count: u64,
    #[serde(deserialize_with = "or_default")]
    flag: bool,
  }

  #[test]
  fn null_and_wrong_types_become_defaults() {
    let s: Sample = serde_json::from_str(r#"{"count": null, "flag": "yes"}"#).unwrap();
    assert_eq!(s.count, 0);
    assert!(!s.flag);
  }

  #[test]
  fn valid_values_pass_through() {
    let s: Sample = serde_json::from_str(r#"{"count": 7, "flag": true}"#).unwrap();
    assert_eq!(s.count, 7);
    assert!(s.flag);
  }
}
