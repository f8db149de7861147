//! Bar height resolution from `layout.height`

use serde_json::{Map, Value};

/// Height used when `layout.height` is absent or unusable
pub const DEFAULT_BAR_HEIGHT: i64 = 30;

/// Why a height value was rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HeightParseError {
    #[error("'{0}' is not a pixel count")]
    NotANumber(String),

    #[error("unsupported height value: {0}")]
    Unsupported(String),
}

/// Bar height in pixels from a layout section, falling back to 30.
///
/// Negative or oversized values pass through unvalidated.
pub fn resolve_height(layout: Option<&Map<String, Value>>) -> i64 {
    let Some(raw) = layout.and_then(|l| l.get("height")) else {
        return DEFAULT_BAR_HEIGHT;
    };

    parse_height(raw).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "falling back to default bar height");
        DEFAULT_BAR_HEIGHT
    })
}

/// Parse an integer, a float (truncated) or a string such as `"30px"`
pub fn parse_height(value: &Value) -> Result<i64, HeightParseError> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| HeightParseError::Unsupported(n.to_string())),
        Value::String(s) => parse_height_str(s),
        other => Err(HeightParseError::Unsupported(other.to_string())),
    }
}

fn parse_height_str(raw: &str) -> Result<i64, HeightParseError> {
    let lower = raw.trim().to_ascii_lowercase();
    let digits = lower.strip_suffix("px").unwrap_or(&lower).trim();

    digits
        .parse::<i64>()
        .map_err(|_| HeightParseError::NotANumber(raw.to_string()))
}
