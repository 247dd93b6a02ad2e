//! Big-integer wire encoding

/// Serde helper encoding a `BigUint` as a decimal string.
///
/// Group elements are wider than any machine integer and JSON numbers lose
/// precision past 2^53, so they travel as strings.
pub mod serde_biguint {
    use std::str::FromStr;

    use num_bigint::BigUint;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::error::ProtocolError;

    pub fn serialize<S>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_str_radix(10))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BigUint::from_str(&s).map_err(|_| de::Error::custom(ProtocolError::InvalidBigInteger(s)))
    }
}
