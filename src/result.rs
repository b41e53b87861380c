use crate::headers::Headers;
use thiserror::Error;

/// What kind of exchange the decision applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    /// No rule matched or no `Origin` was sent; browser same-origin rules apply.
    NotApplicable,
    /// A preflight; the caller answers it without invoking the route handler.
    Preflight,
    /// An actual cross-origin request; the caller runs the handler and adds the headers.
    Actual,
}

/// Outcome of evaluating one request against a [`crate::PolicyRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsDecision {
    pub allowed: bool,
    pub kind: DecisionKind,
    pub headers: Headers,
    pub mismatch: Option<PolicyMismatch>,
}

/// Why the effective rule rejected a request. Carried in the decision, never
/// returned as an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyMismatch {
    #[error("origin `{origin}` is not allowed")]
    OriginNotAllowed { origin: String },
    #[error("method `{method}` is not allowed")]
    MethodNotAllowed { method: String },
    #[error("request headers `{headers}` are not allowed")]
    HeadersNotAllowed { headers: String },
}

impl CorsDecision {
    pub(crate) fn not_applicable() -> Self {
        Self {
            allowed: true,
            kind: DecisionKind::NotApplicable,
            headers: Headers::default(),
            mismatch: None,
        }
    }

    pub(crate) fn accepted(kind: DecisionKind, headers: Headers) -> Self {
        Self {
            allowed: true,
            kind,
            headers,
            mismatch: None,
        }
    }

    pub(crate) fn rejected(kind: DecisionKind, mismatch: PolicyMismatch) -> Self {
        Self {
            allowed: false,
            kind,
            headers: Headers::default(),
            mismatch: Some(mismatch),
        }
    }

    pub fn is_preflight(&self) -> bool {
        self.kind == DecisionKind::Preflight
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
