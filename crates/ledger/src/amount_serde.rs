//! Serde helper for `u128` amounts.
//!
//! Amounts are written as decimal strings. JSON numbers that fit in 64 bits
//! are accepted on input as well. Buffered formats (internally tagged enums)
//! cannot carry 128-bit integers, so any amount inside a tagged record goes
//! through this codec.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

pub fn serialize<S>(amount: &u128, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(amount)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(AmountVisitor)
}

struct AmountVisitor;

impl Visitor<'_> for AmountVisitor {
    type Value = u128;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer amount or its decimal string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u128, E> {
        Ok(u128::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u128, E> {
        u128::try_from(value).map_err(|_| E::custom(format!("negative amount {value}")))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<u128, E> {
        Ok(value)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<u128, E> {
        value
            .parse()
            .map_err(|_| E::custom(format!("invalid amount {value:?}")))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "kind", rename_all = "snake_case")]
    enum Tagged {
        Amount {
            #[serde(with = "crate::amount_serde")]
            value: u128,
        },
    }

    #[test]
    fn test_large_amount_survives_tagged_enum() {
        let tagged = Tagged::Amount { value: u128::MAX };
        let json = serde_json::to_string(&tagged).unwrap();
        assert_eq!(
            json,
            format!("{{\"kind\":\"amount\",\"value\":\"{}\"}}", u128::MAX)
        );
        let back: Tagged = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tagged);
    }

    #[test]
    fn test_numbers_and_bad_input() {
        let parsed: Tagged = serde_json::from_str(r#"{"kind":"amount","value":42}"#).unwrap();
        assert_eq!(parsed, Tagged::Amount { value: 42 });
        assert!(serde_json::from_str::<Tagged>(r#"{"kind":"amount","value":-1}"#).is_err());
        assert!(serde_json::from_str::<Tagged>(r#"{"kind":"amount","value":"1.5"}"#).is_err());
    }
}
