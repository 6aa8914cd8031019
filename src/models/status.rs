use serde::{Deserialize, Deserializer, Serialize};

/// Visibility flag shared by products, news posts and banners.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[serde(rename = "active", alias = "Active")]
    Active,
    #[default]
    #[serde(rename = "inactive", alias = "Inactive", other)]
    Inactive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Status::Active)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Counters written by older admin tooling may be stored as numeric strings.
/// Anything that does not parse reads as zero.
pub fn deserialize_lenient_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCount>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawCount::Int(value)) => value,
        Some(RawCount::Float(value)) => count_from_f64(value),
        Some(RawCount::Text(text)) => parse_count(&text),
        None => 0,
    })
}

pub fn parse_count(text: &str) -> i64 {
    let text = text.trim();
    text.parse::<i64>()
        .unwrap_or_else(|_| text.parse::<f64>().map(count_from_f64).unwrap_or(0))
}

/// NaN, infinities and values outside the `i64` range read as zero.
fn count_from_f64(value: f64) -> i64 {
    if value.is_finite() && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        value as i64
    } else {
        0
    }
}
