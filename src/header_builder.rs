use crate::constants::{WILDCARD, header};
use crate::headers::HeaderCollection;
use crate::origin::OriginDecision;
use crate::rule::PolicyRule;

pub(crate) struct HeaderBuilder<'a> {
    rule: &'a PolicyRule,
}

impl<'a> HeaderBuilder<'a> {
    pub(crate) fn new(rule: &'a PolicyRule) -> Self {
        Self { rule }
    }

    /// `Access-Control-Allow-Origin` for an accepted origin. Never emits `*`
    /// together with credentials.
    pub(crate) fn build_origin_headers(
        &self,
        origin: &str,
        decision: OriginDecision,
    ) -> HeaderCollection {
        let mut headers = HeaderCollection::with_capacity(2);
        match decision {
            OriginDecision::Any if !self.rule.credentials() => {
                headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, WILDCARD);
            }
            OriginDecision::Any | OriginDecision::Mirror => {
                headers.push(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
                headers.add_vary(header::ORIGIN);
            }
            OriginDecision::Disallow => {}
        }
        headers
    }

    pub(crate) fn build_methods_header(&self, requested_method: &str) -> HeaderCollection {
        let mut headers = HeaderCollection::with_capacity(1);
        if let Some(value) = self
            .rule
            .methods()
            .header_value(requested_method, self.rule.credentials())
        {
            headers.push(header::ACCESS_CONTROL_ALLOW_METHODS, value);
        }
        headers
    }

    pub(crate) fn build_allowed_headers(&self, requested: Option<&str>) -> HeaderCollection {
        let mut headers = HeaderCollection::with_capacity(1);
        if let Some(value) = self
            .rule
            .allowed_headers()
            .header_value(requested, self.rule.credentials())
        {
            headers.push(header::ACCESS_CONTROL_ALLOW_HEADERS, value);
        }
        headers
    }

    pub(crate) fn build_credentials_header(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_capacity(1);
        if self.rule.credentials() {
            headers.push(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
        }
        headers
    }

    pub(crate) fn build_max_age_header(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_capacity(1);
        if let Some(max_age) = self.rule.max_age() {
            headers.push(header::ACCESS_CONTROL_MAX_AGE, max_age.to_string());
        }
        headers
    }

    pub(crate) fn build_exposed_headers(&self) -> HeaderCollection {
        let mut headers = HeaderCollection::with_capacity(1);
        if let Some(value) = self.rule.exposed_headers().header_value() {
            headers.push(header::ACCESS_CONTROL_EXPOSE_HEADERS, value);
        }
        headers
    }
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
