use crate::constants::method;

/// Per-request view of the headers relevant to CORS evaluation.
///
/// `path` is the matched route path. The remaining fields are copied from the
/// request line and the `Origin`, `Access-Control-Request-Method` and
/// `Access-Control-Request-Headers` headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub method: &'a str,
    pub origin: Option<&'a str>,
    pub access_control_request_method: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    /// Builds a context for an actual (non-preflight) request.
    pub fn new(path: &'a str, method: &'a str) -> Self {
        Self {
            path,
            method,
            origin: None,
            access_control_request_method: None,
            access_control_request_headers: None,
        }
    }

    pub fn with_origin(mut self, origin: &'a str) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_request_method(mut self, requested: &'a str) -> Self {
        self.access_control_request_method = Some(requested);
        self
    }

    pub fn with_request_headers(mut self, requested: &'a str) -> Self {
        self.access_control_request_headers = Some(requested);
        self
    }

    /// The `Origin` header, treating an empty value as absent.
    pub fn origin(&self) -> Option<&'a str> {
        self.origin
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
    }

    /// The `Access-Control-Request-Method` header, treating an empty value as absent.
    pub fn requested_method(&self) -> Option<&'a str> {
        self.access_control_request_method
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// The `Access-Control-Request-Headers` value, treating an empty value as absent.
    pub fn requested_headers(&self) -> Option<&'a str> {
        self.access_control_request_headers
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// An `OPTIONS` request carrying both `Origin` and `Access-Control-Request-Method`.
    pub fn is_preflight(&self) -> bool {
        self.method.trim().eq_ignore_ascii_case(method::OPTIONS)
            && self.origin().is_some()
            && self.requested_method().is_some()
    }

    /// The method the routed handler would see: the requested method for a
    /// preflight, the request method otherwise.
    pub fn route_method(&self) -> &'a str {
        if self.is_preflight() {
            self.requested_method().unwrap_or(self.method)
        } else {
            self.method.trim()
        }
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
