use crate::context::RequestContext;
use crate::header_builder::HeaderBuilder;
use crate::headers::HeaderCollection;
use crate::origin::OriginDecision;
use crate::registry::PolicyRegistry;
use crate::result::{CorsDecision, DecisionKind, PolicyMismatch};
use crate::rule::PolicyRule;
use tracing::{debug, trace};

/// Evaluates `request` against the effective rule in `registry`.
///
/// Never fails: a request that no rule covers, or that carries no `Origin`, is
/// [`DecisionKind::NotApplicable`]; a request the effective rule does not cover
/// is rejected with empty headers and the [`PolicyMismatch`] recorded.
pub fn evaluate(registry: &PolicyRegistry, request: &RequestContext<'_>) -> CorsDecision {
    let Some(rule) = registry.select(request.path, request.route_method()) else {
        trace!(path = request.path, "no CORS rule matches");
        return CorsDecision::not_applicable();
    };

    let Some(origin) = request.origin() else {
        trace!(path = request.path, "no Origin header; not a CORS request");
        return CorsDecision::not_applicable();
    };

    let evaluator = RuleEvaluator::new(rule);
    let decision = if request.is_preflight() {
        evaluator.process_preflight(request, origin)
    } else {
        evaluator.process_actual(request, origin)
    };

    match &decision.mismatch {
        Some(mismatch) => debug!(
            path = request.path,
            pattern = rule.pattern().as_str(),
            reason = %mismatch,
            "CORS request rejected"
        ),
        None => trace!(
            path = request.path,
            pattern = rule.pattern().as_str(),
            kind = ?decision.kind,
            "CORS request allowed"
        ),
    }

    decision
}

struct RuleEvaluator<'a> {
    rule: &'a PolicyRule,
    builder: HeaderBuilder<'a>,
}

impl<'a> RuleEvaluator<'a> {
    fn new(rule: &'a PolicyRule) -> Self {
        Self {
            rule,
            builder: HeaderBuilder::new(rule),
        }
    }

    fn process_preflight(&self, request: &RequestContext<'_>, origin: &str) -> CorsDecision {
        let kind = DecisionKind::Preflight;
        let origin_decision = match self.check_origin(origin) {
            Ok(decision) => decision,
            Err(mismatch) => return CorsDecision::rejected(kind, mismatch),
        };

        let requested_method = request.requested_method().unwrap_or_default();
        if !self.rule.methods().allows_method(requested_method) {
            return CorsDecision::rejected(
                kind,
                PolicyMismatch::MethodNotAllowed {
                    method: requested_method.to_string(),
                },
            );
        }

        let requested_headers = request.requested_headers();
        if let Some(requested) = requested_headers
            && !self.rule.allowed_headers().allows_headers(requested)
        {
            return CorsDecision::rejected(
                kind,
                PolicyMismatch::HeadersNotAllowed {
                    headers: requested.to_string(),
                },
            );
        }

        let mut headers = HeaderCollection::new();
        headers.extend(self.builder.build_origin_headers(origin, origin_decision));
        headers.extend(self.builder.build_methods_header(requested_method));
        headers.extend(self.builder.build_allowed_headers(requested_headers));
        headers.extend(self.builder.build_credentials_header());
        headers.extend(self.builder.build_max_age_header());

        CorsDecision::accepted(kind, headers.into_headers())
    }

    fn process_actual(&self, request: &RequestContext<'_>, origin: &str) -> CorsDecision {
        let kind = DecisionKind::Actual;
        let origin_decision = match self.check_origin(origin) {
            Ok(decision) => decision,
            Err(mismatch) => return CorsDecision::rejected(kind, mismatch),
        };

        let method = request.method.trim();
        if !self.rule.methods().allows_method(method) {
            return CorsDecision::rejected(
                kind,
                PolicyMismatch::MethodNotAllowed {
                    method: method.to_string(),
                },
            );
        }

        let mut headers = HeaderCollection::new();
        headers.extend(self.builder.build_origin_headers(origin, origin_decision));
        headers.extend(self.builder.build_credentials_header());
        headers.extend(self.builder.build_exposed_headers());

        CorsDecision::accepted(kind, headers.into_headers())
    }

    fn check_origin(&self, origin: &str) -> Result<OriginDecision, PolicyMismatch> {
        match self.rule.origins().resolve(origin) {
            OriginDecision::Disallow => Err(PolicyMismatch::OriginNotAllowed {
                origin: origin.to_string(),
            }),
            decision => Ok(decision),
        }
    }
}

#[cfg(test)]
#[path = "cors_test.rs"]
mod cors_test;
