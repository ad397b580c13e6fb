//! Deserializers for form-style payloads, where clients send numbers as strings
//! (and strings as numbers) and pad text with whitespace.
//!
//! All of them produce `Option`s so a missing field reaches validation and gets a
//! proper message instead of failing deserialization. Fields using them need
//! `#[serde(default)]`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::String(s) => s,
            StringOrNumber::Integer(n) => n.to_string(),
            StringOrNumber::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
                (f as i64).to_string()
            }
            StringOrNumber::Float(f) => f.to_string(),
        }
    }
}

/// Trims surrounding whitespace. An empty string stays `Some("")` so that
/// length rules can report it.
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.map(|s| s.trim().to_string()))
}

/// Accepts a JSON string or number and yields its trimmed text.
pub fn deserialize_optional_string_or_number<'de, D>(
    deserializer: D,
) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<StringOrNumber> = Option::deserialize(deserializer)?;
    Ok(opt.map(|v| v.into_string().trim().to_string()))
}

/// Like [`deserialize_optional_string_or_number`], but blank text counts as absent.
pub fn deserialize_optional_non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = deserialize_optional_string_or_number(deserializer)?;
    Ok(opt.filter(|s| !s.is_empty()))
}
