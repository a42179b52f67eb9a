use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use berth_shared::Masked;

/// One traveller, matched by position to a selected seat.
///
/// Every field deserializes leniently so that bad form input reaches the
/// validator instead of failing the whole request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Passenger {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_age")]
    pub age: i64,
    #[serde(default, alias = "aadhaar_id", alias = "aadhaarId")]
    pub national_id: Masked<String>,
}

impl Passenger {
    pub fn new(name: &str, age: i64, national_id: &str) -> Self {
        Self {
            name: name.to_string(),
            age,
            national_id: Masked::from(national_id),
        }
    }
}

/// Whole numbers pass through, fractions truncate toward zero, numeric
/// strings parse. Anything else becomes 0, which the validator rejects.
fn lenient_age<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let age = match raw {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .or_else(|_| s.trim().parse::<f64>().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        _ => 0,
    };
    Ok(age)
}
