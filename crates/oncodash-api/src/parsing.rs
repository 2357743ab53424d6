//! Parsing of FastAPI error bodies.

use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
struct ErrorBody {
    detail: Value,
}

#[derive(Deserialize)]
struct ValidationIssue {
    #[serde(default)]
    loc: Vec<Value>,
    msg: String,
}

/// Extract a human-readable `detail` from an error response body.
///
/// FastAPI sends either `{"detail": "text"}` or, for request validation
/// failures, `{"detail": [{"loc": [...], "msg": "...", ...}, ...]}`. Each
/// validation issue is rendered as `field: msg` and joined with `; `.
pub(crate) fn parse_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        Value::String(text) => Some(text),
        Value::Array(items) => {
            let messages: Vec<String> = items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<ValidationIssue>(item).ok())
                .map(render_issue)
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn render_issue(issue: ValidationIssue) -> String {
    let field = issue
        .loc
        .iter()
        .rev()
        .find_map(|part| match part {
            Value::String(name) if name != "body" => Some(name.clone()),
            _ => None,
        });
    match field {
        Some(field) => format!("{field}: {}", issue.msg),
        None => issue.msg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_detail_is_verbatim() {
        assert_eq!(
            parse_detail(r#"{"detail": "Model not loaded"}"#),
            Some("Model not loaded".to_string())
        );
    }

    #[test]
    fn test_validation_list_is_joined() {
        let body = r#"{"detail": [
            {"loc": ["body", "age"], "msg": "Input should be greater than or equal to 20", "type": "greater_than_equal"},
            {"loc": ["body", "weight_kg"], "msg": "Input should be a valid number", "type": "float_parsing"}
        ]}"#;
        assert_eq!(
            parse_detail(body).unwrap(),
            "age: Input should be greater than or equal to 20; \
             weight_kg: Input should be a valid number"
        );
    }

    #[test]
    fn test_issue_without_location() {
        let body = r#"{"detail": [{"msg": "Field required"}]}"#;
        assert_eq!(parse_detail(body).unwrap(), "Field required");
    }

    #[test]
    fn test_unusable_bodies() {
        assert_eq!(parse_detail("Internal Server Error"), None);
        assert_eq!(parse_detail(r#"{"error": "x"}"#), None);
        assert_eq!(parse_detail(r#"{"detail": null}"#), None);
        assert_eq!(parse_detail(r#"{"detail": []}"#), None);
    }
}
