use serde_json::{Map, Value};

use crate::domain::model::{TokenRecord, UriRecord, DEFAULT_DIGITS};
use crate::domain::target::TargetApp;
use crate::utils::error::{ExportError, Result};

pub const TOKENS_KEY: &str = "decrypted_authenticator_tokens";

/// Accepted spellings of the seed field, in priority order.
const SEED_KEYS: [&str; 2] = ["decrypted_seed", "decryptedSeed"];

/// Builds a record from one export entry. Each field is read on its own so a
/// bad or duplicated field only affects that field.
fn token_from_entry(entry: &Map<String, Value>) -> Option<TokenRecord> {
    let name = non_empty_string(entry.get("name"))?;
    let secret = SEED_KEYS
        .iter()
        .find_map(|key| non_empty_string(entry.get(*key)))?;
    let digits = entry
        .get("digits")
        .and_then(parse_digits)
        .unwrap_or(DEFAULT_DIGITS);

    let mut record = TokenRecord::new(name, secret).with_digits(digits);
    record.issuer = non_empty_string(entry.get("issuer"));
    Some(record)
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn parse_digits(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|d| u32::try_from(d).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// 解析匯出檔，回傳可用的 token
pub fn parse_tokens(raw: &str) -> Result<Vec<TokenRecord>> {
    let document: Value = serde_json::from_str(raw).map_err(|e| ExportError::ParseError {
        reason: e.to_string(),
    })?;

    let Value::Object(mut root) = document else {
        return Err(ExportError::ParseError {
            reason: "expected a JSON object at the top level".to_string(),
        });
    };

    let entries = match root.remove(TOKENS_KEY) {
        None => {
            tracing::debug!("No '{}' key in input, nothing to convert", TOKENS_KEY);
            return Ok(Vec::new());
        }
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            tracing::warn!(
                "'{}' is not an array (found {}), treating as empty",
                TOKENS_KEY,
                json_type_name(&other)
            );
            return Ok(Vec::new());
        }
    };

    let total = entries.len();
    let tokens: Vec<TokenRecord> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let record = match &entry {
                Value::Object(map) => token_from_entry(map),
                _ => None,
            };
            if record.is_none() {
                tracing::debug!("Skipping token #{}: missing name or seed", index + 1);
            }
            record
        })
        .collect();

    if tokens.len() < total {
        tracing::info!(
            "Skipped {} of {} tokens with a missing name or seed",
            total - tokens.len(),
            total
        );
    }

    Ok(tokens)
}

/// Parses the export and renders one URI per usable token, in input order.
pub fn convert_to_uris(raw: &str, target: TargetApp) -> Result<Vec<UriRecord>> {
    let tokens = parse_tokens(raw)?;
    Ok(tokens.iter().map(|token| target.build_uri(token)).collect())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
