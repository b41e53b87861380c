#![allow(dead_code)]

use super::headers::{header_value, vary_values};
use bunner_cors_registry::{CorsDecision, DecisionKind, Headers, PolicyMismatch};

pub fn assert_actual(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision {
            allowed: true,
            kind: DecisionKind::Actual,
            headers,
            ..
        } => headers,
        other => panic!("expected allowed actual-request decision, got {:?}", other),
    }
}

pub fn assert_preflight(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision {
            allowed: true,
            kind: DecisionKind::Preflight,
            headers,
            ..
        } => headers,
        other => panic!("expected allowed preflight decision, got {:?}", other),
    }
}

pub fn assert_rejected(decision: CorsDecision) -> PolicyMismatch {
    assert!(
        decision.headers.is_empty(),
        "rejected decision must not carry headers: {:?}",
        decision.headers
    );
    match decision {
        CorsDecision {
            allowed: false,
            mismatch: Some(mismatch),
            ..
        } => mismatch,
        other => panic!("expected rejected decision, got {:?}", other),
    }
}

pub fn assert_not_applicable(decision: CorsDecision) {
    assert!(decision.allowed, "not-applicable decision must be allowed");
    assert_eq!(decision.kind, DecisionKind::NotApplicable);
    assert!(decision.headers.is_empty());
    assert!(decision.mismatch.is_none());
}

pub fn assert_header_eq(headers: &Headers, name: &str, expected: &str) {
    assert_eq!(
        header_value(headers, name),
        Some(expected),
        "header {name} mismatch"
    );
}

pub fn assert_header_absent(headers: &Headers, name: &str) {
    assert_eq!(header_value(headers, name), None, "header {name} should be absent");
}

pub fn assert_vary_eq<I, S>(headers: &Headers, expected: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let expected = expected.into_iter().map(Into::into).collect();
    assert_eq!(vary_values(headers), expected);
}

pub fn assert_vary_is_empty(headers: &Headers) {
    assert!(vary_values(headers).is_empty(), "expected no Vary header");
}
