use serde_json::Value;

use crate::types::{EntityCategory, NormalizedEntity};

const DEFAULT_CONFIDENCE: u8 = 85;

/// Keys that may carry the item list when a category arrives as a nested
/// object rather than a flat array, in lookup order.
fn accepted_item_keys(category: EntityCategory) -> [&'static str; 4] {
    [
        category.plural_key(),
        category.singular_key(),
        "items",
        "list",
    ]
}

/// Flatten a backend `entities` payload into a uniform entity list.
///
/// The backend has shipped this section in several shapes: a flat array per
/// category, a nested object with the array under one of a few keys, and
/// item lists mixing bare strings with objects. Everything unrecognized
/// degrades to omission; this function never fails.
pub fn normalize_entities(entities: &Value) -> Vec<NormalizedEntity> {
    let mut normalized = Vec::new();

    let Some(map) = entities.as_object() else {
        return normalized;
    };

    for category in EntityCategory::ALL {
        let Some(raw) = map.get(category.plural_key()) else {
            continue;
        };

        let items = match raw {
            Value::Array(items) => items.as_slice(),
            Value::Object(inner) => {
                match accepted_item_keys(category)
                    .iter()
                    .find_map(|key| inner.get(*key).and_then(Value::as_array))
                {
                    Some(items) => items.as_slice(),
                    None => {
                        tracing::warn!(
                            "no item list found for '{}', skipping category",
                            category.plural_key()
                        );
                        continue;
                    }
                }
            }
            other => {
                tracing::warn!(
                    "expected array or object for '{}', got {other}",
                    category.plural_key()
                );
                continue;
            }
        };

        for item in items {
            if let Some(entity) = normalize_item(item, category) {
                normalized.push(entity);
            }
        }
    }

    normalized
}

fn normalize_item(item: &Value, category: EntityCategory) -> Option<NormalizedEntity> {
    let (text, confidence) = match item {
        Value::String(text) => (text.clone(), DEFAULT_CONFIDENCE),
        Value::Object(fields) => {
            let text = ["text", "name", "entity", "value"]
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str))
                .map(str::to_string)
                .unwrap_or_else(|| item.to_string());
            let confidence = ["confidence", "score"]
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_f64))
                .map(round_confidence)
                .unwrap_or(DEFAULT_CONFIDENCE);
            (text, confidence)
        }
        other => (other.to_string(), DEFAULT_CONFIDENCE),
    };

    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    Some(NormalizedEntity {
        text: text.to_string(),
        category,
        confidence,
    })
}

fn round_confidence(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Per-category totals in display order, skipping empty categories.
pub fn category_counts(entities: &[NormalizedEntity]) -> Vec<(EntityCategory, usize)> {
    EntityCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let count = entities.iter().filter(|e| e.category == category).count();
            (count > 0).then_some((category, count))
        })
        .collect()
}
