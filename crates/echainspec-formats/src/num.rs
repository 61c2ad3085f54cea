//! # Hex Quantity Adapters
//!
//! Parity-style specifications write block numbers as `0x`-prefixed hex
//! strings ("0x2dc6c0"), while geth-style configurations use plain JSON
//! numbers, and hand-edited files mix both. The adapters here accept
//! either on input and always emit hex strings on output, so a parsed
//! document round-trips into parity's native style.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serializer};

/// Parse a JSON number or string as a u64 quantity.
fn parse_quantity<E: DeError>(value: &serde_json::Value) -> Result<u64, E> {
    match value {
        serde_json::Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| E::custom(format!("quantity out of range: {n}"))),
        serde_json::Value::String(s) => {
            let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"));
            match digits {
                Some(hex) => u64::from_str_radix(hex, 16)
                    .map_err(|e| E::custom(format!("invalid hex quantity {s:?}: {e}"))),
                None => s
                    .parse::<u64>()
                    .map_err(|e| E::custom(format!("invalid quantity {s:?}: {e}"))),
            }
        }
        other => Err(E::custom(format!("expected quantity, got {other}"))),
    }
}

/// `Option<u64>` as an optional hex-or-decimal quantity.
///
/// Use with `#[serde(default, with = "num::opt_quantity",
/// skip_serializing_if = "Option::is_none")]`.
pub mod opt_quantity {
    use super::*;

    pub fn serialize<S: Serializer>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&format!("{v:#x}")),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u64>, D::Error> {
        let value = Option::<serde_json::Value>::deserialize(deserializer)?;
        match value {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(v) => parse_quantity(&v).map(Some),
        }
    }
}

/// `BTreeMap<u64, u64>` with hex keys and values, the shape of parity's
/// `difficultyBombDelays` table.
pub mod quantity_map {
    use std::collections::BTreeMap;

    use super::*;

    pub fn serialize<S: Serializer>(
        map: &BTreeMap<u64, u64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut out = serializer.serialize_map(Some(map.len()))?;
        for (k, v) in map {
            out.serialize_entry(&format!("{k:#x}"), &format!("{v:#x}"))?;
        }
        out.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<u64, u64>, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut map = BTreeMap::new();
        for (key, value) in raw {
            let k = parse_quantity(&serde_json::Value::String(key))?;
            let v = parse_quantity(&value)?;
            map.insert(k, v);
        }
        Ok(map)
    }
}
