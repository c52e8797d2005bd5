//! JSON extraction from raw completion text.
//!
//! Models are instructed to answer with a bare JSON object but often wrap
//! it in markdown fences or conversational filler. Extraction tries the
//! fenced block first, then the widest brace span.

use serde_json::Value;

/// Pull the first parseable JSON value out of raw model output.
///
/// Returns `None` when no parseable JSON is present; callers decide how to
/// degrade. A fenced block that fails to parse falls through to the brace
/// scan so a stray fence elsewhere in the text does not mask a valid object.
pub fn extract_json(raw: &str) -> Option<Value> {
    let text = raw.trim();

    if let (Some(start), Some(end)) = (text.find("```"), text.rfind("```")) {
        if end > start {
            let mut inner = text[start + 3..end].trim();
            // Strip an optional language tag, e.g. ```json
            inner = inner.strip_prefix("json").map(str::trim).unwrap_or(inner);
            if let Ok(value) = serde_json::from_str(inner) {
                return Some(value);
            }
        }
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_from_fenced_block_with_language_tag() {
        let raw = "Sure! ```json\n{\"a\":1}\n``` thanks";
        assert_eq!(extract_json(raw), Some(json!({"a": 1})));
    }

    #[test]
    fn extracts_from_fenced_block_without_tag() {
        let raw = "```\n{\"score\": 88}\n```";
        assert_eq!(extract_json(raw), Some(json!({"score": 88})));
    }

    #[test]
    fn extracts_from_bare_text_with_surrounding_prose() {
        let raw = "Here is my evaluation: {\"confidence\": 70, \"emotion\": 60}. Good luck!";
        assert_eq!(
            extract_json(raw),
            Some(json!({"confidence": 70, "emotion": 60}))
        );
    }

    #[test]
    fn handles_nested_objects() {
        let raw = "{\"outer\": {\"inner\": [1, 2, 3]}}";
        assert_eq!(
            extract_json(raw),
            Some(json!({"outer": {"inner": [1, 2, 3]}}))
        );
    }

    #[test]
    fn unparsable_fence_falls_back_to_brace_scan() {
        let raw = "```not json at all``` but {\"ok\": true} trails";
        assert_eq!(extract_json(raw), Some(json!({"ok": true})));
    }

    #[test]
    fn returns_none_without_any_json() {
        assert_eq!(extract_json("I cannot evaluate that answer."), None);
        assert_eq!(extract_json(""), None);
        assert_eq!(extract_json("} backwards {"), None);
    }
}
