//! Context-analysis value types and their JSON contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marker carried in the `error` field of a format-error record.
pub const FORMAT_ERROR: &str = "AI response format error";

/// Outcome of analyzing a piece of context text.
///
/// The model is asked for a JSON object with keys `entities`, `keywords`
/// and `sentiment`. A reply that does not decode into that shape is still a
/// usable outcome for the caller (stored verbatim for inspection), so it is
/// modeled as a variant rather than an error. Provider failure is the third
/// state and lives outside this type, as `None` on the operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextInsights {
    Report(InsightReport),
    FormatError { error: String, raw_response: String },
}

/// The documented analysis shape. `sentiment` is optional in replies;
/// `entities` and `keywords` must be present with the documented types.
/// Extra keys are tolerated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    pub entities: Vec<Value>,
    pub keywords: Vec<String>,
    pub sentiment: Option<String>,
}

impl ContextInsights {
    /// Decode a model reply, degrading to a format-error record when the
    /// reply is not the documented JSON object.
    #[must_use]
    pub fn parse(reply: &str) -> Self {
        match serde_json::from_str::<InsightReport>(reply) {
            Ok(report) => Self::Report(report),
            Err(_) => Self::format_error(reply),
        }
    }

    #[must_use]
    pub fn format_error(raw_response: impl Into<String>) -> Self {
        Self::FormatError {
            error: FORMAT_ERROR.to_string(),
            raw_response: raw_response.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ContextInsights, FORMAT_ERROR, InsightReport};
    use serde_json::json;

    #[test]
    fn parses_documented_shape() {
        let parsed =
            ContextInsights::parse(r#"{"entities": [], "keywords": ["x"], "sentiment": "positive"}"#);
        assert_eq!(
            parsed,
            ContextInsights::Report(InsightReport {
                entities: vec![],
                keywords: vec!["x".to_string()],
                sentiment: Some("positive".to_string()),
            })
        );
    }

    #[test]
    fn sentiment_may_be_absent() {
        let parsed = ContextInsights::parse(r#"{"entities": ["ACME"], "keywords": []}"#);
        let ContextInsights::Report(report) = parsed else {
            panic!("expected a report");
        };
        assert_eq!(report.entities, vec![json!("ACME")]);
        assert_eq!(report.sentiment, None);
    }

    #[test]
    fn extra_keys_are_tolerated() {
        let parsed = ContextInsights::parse(
            r#"{"entities": [], "keywords": [], "sentiment": null, "confidence": 0.9}"#,
        );
        assert!(matches!(parsed, ContextInsights::Report(_)));
    }

    #[test]
    fn non_json_reply_becomes_format_error() {
        let parsed = ContextInsights::parse("not json");
        assert_eq!(
            parsed,
            ContextInsights::FormatError {
                error: FORMAT_ERROR.to_string(),
                raw_response: "not json".to_string(),
            }
        );
    }

    #[test]
    fn wrong_shape_json_becomes_format_error() {
        // Valid JSON, wrong keys and wrong types both count as malformed.
        for reply in [r#"["a", "b"]"#, r#"{"keywords": 5, "entities": []}"#, "42"] {
            let parsed = ContextInsights::parse(reply);
            assert!(
                matches!(parsed, ContextInsights::FormatError { .. }),
                "reply {reply:?} should not parse as a report"
            );
        }
    }

    #[test]
    fn report_serializes_untagged() {
        let report = ContextInsights::Report(InsightReport {
            entities: vec![json!({"name": "ACME"})],
            keywords: vec!["deadline".to_string()],
            sentiment: Some("negative".to_string()),
        });
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "entities": [{"name": "ACME"}],
                "keywords": ["deadline"],
                "sentiment": "negative",
            })
        );
    }

    #[test]
    fn format_error_round_trips() {
        let original = ContextInsights::format_error("garbled");
        let value = serde_json::to_value(&original).unwrap();
        assert_eq!(
            value,
            json!({"error": FORMAT_ERROR, "raw_response": "garbled"})
        );
        let back: ContextInsights = serde_json::from_value(value).unwrap();
        assert_eq!(back, original);
    }
}
