//! Tolerant deserializers for loosely typed upstream fields.
//!
//! The order service and older catalog records are not consistent about
//! numeric types (prices arrive as JSON numbers or strings) or about the
//! product `color` field (a plain string, a JSON-encoded array inside a
//! string, or a real array). These helpers normalize at the boundary so no
//! use-site branches on shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a decimal amount from a JSON number or numeric string.
///
/// Anything non-numeric coerces to zero instead of failing: a corrupt price
/// must not take the whole record (or a persisted cart snapshot) down with
/// it.
pub(crate) fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&value))
}

fn decimal_from_value(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => n.to_string().parse().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

/// Deserialize the product `color` field into a canonical color list.
pub(crate) fn color_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(normalize_colors).unwrap_or_default())
}

fn normalize_colors(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s),
                _ => None,
            })
            .collect(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Vec::new();
            }
            // Admin forms historically stored the list JSON-encoded inside
            // the string field.
            match serde_json::from_str::<Value>(trimmed) {
                Ok(inner @ Value::Array(_)) => normalize_colors(inner),
                _ => vec![s],
            }
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn dec(value: Value) -> Decimal {
        decimal_from_value(&value)
    }

    #[test]
    fn test_decimal_from_number() {
        assert_eq!(dec(json!(10)), Decimal::from(10));
        assert_eq!(dec(json!(5.5)), "5.5".parse::<Decimal>().expect("decimal"));
    }

    #[test]
    fn test_decimal_from_string() {
        assert_eq!(dec(json!("12.50")), "12.50".parse::<Decimal>().expect("decimal"));
        assert_eq!(dec(json!(" 3 ")), Decimal::from(3));
    }

    #[test]
    fn test_decimal_garbage_is_zero() {
        assert_eq!(dec(json!("gratis")), Decimal::ZERO);
        assert_eq!(dec(json!(null)), Decimal::ZERO);
        assert_eq!(dec(json!({"amount": 1})), Decimal::ZERO);
    }

    #[test]
    fn test_colors_from_array() {
        assert_eq!(
            normalize_colors(json!(["negro", "dorado"])),
            vec!["negro".to_string(), "dorado".to_string()]
        );
    }

    #[test]
    fn test_colors_from_plain_string() {
        assert_eq!(normalize_colors(json!("negro")), vec!["negro".to_string()]);
    }

    #[test]
    fn test_colors_from_json_encoded_string() {
        assert_eq!(
            normalize_colors(json!("[\"negro\",\"azul\"]")),
            vec!["negro".to_string(), "azul".to_string()]
        );
    }

    #[test]
    fn test_colors_empty_and_invalid() {
        assert!(normalize_colors(json!("")).is_empty());
        assert!(normalize_colors(json!(null)).is_empty());
        assert!(normalize_colors(json!(42)).is_empty());
        // Non-string entries are dropped, not kept as garbage
        assert_eq!(normalize_colors(json!(["rojo", 7, ""])), vec!["rojo".to_string()]);
    }
}
