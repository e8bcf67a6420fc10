//! Triage verdict type and provider-output parsing.

use serde::{Deserialize, Serialize};

/// Reason text used when the provider could not be reached or understood.
pub const FAIL_OPEN_REASON: &str =
    "Automated analysis unavailable; report accepted for manual review";

/// Confidence attached to a fail-open verdict.
pub const FAIL_OPEN_CONFIDENCE: f64 = 0.5;

/// Structured quality verdict for a submitted report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Verdict {
    /// Whether the report looks like a genuine, actionable submission.
    #[serde(rename = "isValid", alias = "is_valid")]
    pub is_valid: bool,
    /// Provider's one-line justification.
    pub reason: String,
    /// Provider confidence in `[0, 1]`.
    pub confidence: f64,
}

impl Verdict {
    /// The fail-open default: when the classifier is unavailable, assume
    /// valid. A broken provider must never silently close legitimate
    /// reports.
    pub fn fail_open() -> Self {
        Self {
            is_valid: true,
            reason: FAIL_OPEN_REASON.to_string(),
            confidence: FAIL_OPEN_CONFIDENCE,
        }
    }

    /// Clamp confidence into `[0, 1]` after parsing untrusted output.
    fn normalized(mut self) -> Self {
        self.confidence = self.confidence.clamp(0.0, 1.0);
        self
    }
}

/// Parse a verdict out of raw provider text.
///
/// Providers wrap JSON in prose or markdown fences often enough that we
/// scan for the outermost object rather than parsing the text wholesale.
/// Returns `None` when no parsable verdict object is present.
pub fn parse_verdict(text: &str) -> Option<Verdict> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str::<Verdict>(&text[start..=end])
        .ok()
        .map(Verdict::normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_json() {
        let verdict =
            parse_verdict(r#"{"isValid": false, "reason": "gibberish", "confidence": 0.9}"#)
                .expect("verdict should parse");
        assert!(!verdict.is_valid);
        assert_eq!(verdict.reason, "gibberish");
        assert!((verdict.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_fenced_json() {
        let text = "Here is my verdict:\n```json\n{\"isValid\": true, \"reason\": \"ok\", \"confidence\": 0.75}\n```\n";
        let verdict = parse_verdict(text).expect("fenced verdict should parse");
        assert!(verdict.is_valid);
    }

    #[test]
    fn accepts_snake_case_field() {
        let verdict =
            parse_verdict(r#"{"is_valid": true, "reason": "ok", "confidence": 1.0}"#).unwrap();
        assert!(verdict.is_valid);
    }

    #[test]
    fn clamps_out_of_range_confidence() {
        let verdict =
            parse_verdict(r#"{"isValid": true, "reason": "ok", "confidence": 3.5}"#).unwrap();
        assert!((verdict.confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_verdict("no json here").is_none());
        assert!(parse_verdict("{not json}").is_none());
        assert!(parse_verdict("").is_none());
    }

    #[test]
    fn fail_open_is_valid_at_half_confidence() {
        let verdict = Verdict::fail_open();
        assert!(verdict.is_valid);
        assert!((verdict.confidence - FAIL_OPEN_CONFIDENCE).abs() < f64::EPSILON);
    }
}
