use crate::core::{Recommendation, ResponseFormat};
use serde_json::Value;

/// Parses structured recommendations out of a completion.
///
/// Accepts a bare array or an object wrapping it under `recommendations` or `cards`.
/// Returns `None` when the text is not in either shape.
pub fn parse_recommendations(text: &str, limit: usize) -> Option<Vec<Recommendation>> {
    let value: Value = serde_json::from_str(text.trim()).ok()?;

    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj
            .remove("recommendations")
            .or_else(|| obj.remove("cards"))
        {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };

    let recs: Vec<Recommendation> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .take(limit)
        .collect();

    if recs.is_empty() {
        None
    } else {
        Some(recs)
    }
}

pub fn render_recommendations(recs: &[Recommendation]) -> String {
    let mut out = format!(
        "Based on your question, here are my top {} recommendations:\n\n",
        recs.len()
    );

    for (i, rec) in recs.iter().enumerate() {
        out.push_str(&format!("{}. {}\n\n", i + 1, rec.card_name));
        out.push_str(&format!("   Why this card? {}\n\n", rec.why_recommended));
        out.push_str(&format!("   Key Perks: {}\n\n", rec.key_perks));
        out.push_str("---\n\n");
    }

    out
}

/// Text shown to the user for a completion. Plain-text completions are shown as-is.
pub fn render_completion(completion: &str, format: ResponseFormat, limit: usize) -> String {
    match format {
        ResponseFormat::Text => completion.to_string(),
        ResponseFormat::Json => match parse_recommendations(completion, limit) {
            Some(recs) => render_recommendations(&recs),
            None => {
                tracing::debug!("Completion was not structured recommendations, showing raw text");
                completion.to_string()
            }
        },
    }
}
