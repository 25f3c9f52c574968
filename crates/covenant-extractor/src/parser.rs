//! Parse narrative-generator output into an enrichment result

use crate::error::ExtractorError;
use covenant_domain::{EnrichmentResult, EnrichmentSource, FieldSet};
use serde_json::{Map, Value};
use tracing::{debug, warn};

const MAX_ITEMS: usize = 5;

/// Locate the first balanced `{...}` block, ignoring braces inside strings
///
/// An opening brace that never closes is skipped and the scan restarts at
/// the next one.
pub fn find_structured_block(response: &str) -> Option<&str> {
    response
        .match_indices('{')
        .find_map(|(start, _)| balanced_from(response, start))
}

fn balanced_from(response: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in response[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&response[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse an untrusted response into a narrative tagged with `model`
///
/// Keys that name a factual field are dropped, as are unknown keys. A
/// response without at least one key feature is a parse failure.
pub fn parse_enrichment(response: &str, model: &str) -> Result<EnrichmentResult, ExtractorError> {
    let block = find_structured_block(response)
        .ok_or_else(|| ExtractorError::InvalidFormat("No structured block in response".to_string()))?;

    let value: Value = serde_json::from_str(block)?;
    let object = value
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON object".to_string()))?;

    let narrative = narrative_only(object);

    let result = EnrichmentResult {
        key_features: string_list(narrative.get("key_features")),
        benefits: string_list(narrative.get("benefits")),
        unique_features: string_list(narrative.get("unique_features")),
        claims_process: prose(narrative.get("claims_process")),
        source: EnrichmentSource::Model {
            model: model.to_string(),
        },
    };

    if !result.has_narrative() {
        return Err(ExtractorError::InvalidFormat("No key features in response".to_string()));
    }
    Ok(result)
}

/// Keep only narrative keys
fn narrative_only(object: &Map<String, Value>) -> Map<String, Value> {
    let mut kept = Map::new();
    for (key, value) in object {
        if FieldSet::owns(key) {
            warn!(key = %key, "Dropping factual key from narrative response");
        } else if EnrichmentResult::is_narrative_key(key) {
            kept.insert(key.clone(), value.clone());
        } else {
            debug!(key = %key, "Ignoring unknown narrative key");
        }
    }
    kept
}

/// Accept an array, an object of descriptions or a single string
fn string_list(value: Option<&Value>) -> Vec<String> {
    let items: Vec<String> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(k, v)| scalar_text(v).map(|text| format!("{}: {}", k.replace('_', " "), text)))
            .collect(),
        Some(other) => scalar_text(other).into_iter().collect(),
        None => Vec::new(),
    };
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .take(MAX_ITEMS)
        .collect()
}

fn prose(value: Option<&Value>) -> String {
    match value {
        Some(Value::Object(map)) => map
            .values()
            .filter_map(scalar_text)
            .collect::<Vec<_>>()
            .join(" "),
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect::<Vec<_>>().join(" "),
        Some(other) => scalar_text(other).unwrap_or_default(),
        None => String::new(),
    }
    .trim()
    .to_string()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
