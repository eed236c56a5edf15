use std::collections::BTreeMap;

use netscope_logging::ns_warn;
use serde_json::Value;

use crate::{FailureKind, FetchError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FacetValue {
    Text(String),
    Items(Vec<String>),
}

/// Scraping service reply: every top-level key whose value is a string or an array.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScrapeDocument {
    pub facets: BTreeMap<String, FacetValue>,
}

/// Parses a service reply. The body must be a JSON object; values of any
/// other shape than string or array are dropped with a warning.
pub fn parse_document(body: &str) -> Result<ScrapeDocument, FetchError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|err| FetchError::new(FailureKind::MalformedBody, err.to_string()))?;
    let map = match value {
        Value::Object(map) => map,
        other => {
            return Err(FetchError::new(
                FailureKind::MalformedBody,
                format!("expected a JSON object, got {}", json_kind(&other)),
            ));
        }
    };

    let mut facets = BTreeMap::new();
    for (key, value) in map {
        match value {
            Value::String(text) => {
                facets.insert(key, FacetValue::Text(text));
            }
            Value::Array(items) => {
                let items = items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(text) => text,
                        other => other.to_string(),
                    })
                    .collect();
                facets.insert(key, FacetValue::Items(items));
            }
            other => {
                ns_warn!("Dropping key {:?}: unexpected {}", key, json_kind(&other));
            }
        }
    }

    Ok(ScrapeDocument { facets })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_and_arrays_become_facets() {
        let doc = parse_document(r#"{"html":"<p>hi</p>","images":["a.png","b.png"]}"#).unwrap();
        assert_eq!(
            doc.facets.get("html"),
            Some(&FacetValue::Text("<p>hi</p>".to_string()))
        );
        assert_eq!(
            doc.facets.get("images"),
            Some(&FacetValue::Items(vec![
                "a.png".to_string(),
                "b.png".to_string()
            ]))
        );
        assert_eq!(doc.facets.len(), 2);
    }

    #[test]
    fn non_string_items_keep_their_json_text() {
        let doc = parse_document(r#"{"xhr":["/api", 3, {"u":"x"}]}"#).unwrap();
        assert_eq!(
            doc.facets.get("xhr"),
            Some(&FacetValue::Items(vec![
                "/api".to_string(),
                "3".to_string(),
                r#"{"u":"x"}"#.to_string()
            ]))
        );
    }

    #[test]
    fn other_shapes_are_dropped() {
        let doc = parse_document(r#"{"css":null,"js":{"a":1},"docs":7,"html":""}"#).unwrap();
        assert_eq!(doc.facets.len(), 1);
        assert!(doc.facets.contains_key("html"));
    }

    #[test]
    fn non_object_bodies_are_malformed() {
        for body in ["[]", "\"html\"", "not json", ""] {
            let err = parse_document(body).unwrap_err();
            assert_eq!(err.kind, FailureKind::MalformedBody, "body {body:?}");
        }
    }
}
