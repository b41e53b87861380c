#![allow(dead_code)]

use bunner_cors_registry::constants::method;
use bunner_cors_registry::{
    AllowedHeaders, AllowedMethods, AllowedOrigins, CorsDecision, ExposedHeaders, OriginMatcher,
    PolicyRegistry, RequestContext, RuleOptions,
};

pub struct RuleBuilder {
    options: RuleOptions,
}

impl RuleBuilder {
    pub fn new(path: &str) -> Self {
        Self {
            options: RuleOptions::permit_defaults(path),
        }
    }

    pub fn origins<I, T>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OriginMatcher>,
    {
        self.options.origins = AllowedOrigins::list(origins);
        self
    }

    pub fn any_origin(mut self) -> Self {
        self.options.origins = AllowedOrigins::any();
        self
    }

    pub fn methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.methods = AllowedMethods::list(methods);
        self
    }

    pub fn methods_any(mut self) -> Self {
        self.options.methods = AllowedMethods::any();
        self
    }

    pub fn allowed_headers(mut self, headers: AllowedHeaders) -> Self {
        self.options.allowed_headers = headers;
        self
    }

    pub fn exposed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.exposed_headers = ExposedHeaders::list(headers);
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.options.credentials = enabled;
        self
    }

    pub fn max_age(mut self, value: Option<u64>) -> Self {
        self.options.max_age = value;
        self
    }

    pub fn route_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.route_methods = Some(methods.into_iter().map(Into::into).collect());
        self
    }

    pub fn into_options(self) -> RuleOptions {
        self.options
    }
}

pub fn rule(path: &str) -> RuleBuilder {
    RuleBuilder::new(path)
}

pub fn registry<I>(rules: I) -> PolicyRegistry
where
    I: IntoIterator<Item = RuleBuilder>,
{
    PolicyRegistry::from_rules(rules.into_iter().map(RuleBuilder::into_options))
        .expect("valid CORS registry")
}

pub struct ActualRequestBuilder {
    path: String,
    method: String,
    origin: Option<String>,
}

impl ActualRequestBuilder {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method::GET.into(),
            origin: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn evaluate(self, registry: &PolicyRegistry) -> CorsDecision {
        let ctx = RequestContext {
            path: &self.path,
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: None,
            access_control_request_headers: None,
        };
        registry.evaluate(&ctx)
    }
}

pub struct PreflightRequestBuilder {
    path: String,
    origin: Option<String>,
    request_method: Option<String>,
    request_headers: Option<String>,
}

impl PreflightRequestBuilder {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            origin: None,
            request_method: Some(method::GET.into()),
            request_headers: None,
        }
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = Some(method.into());
        self
    }

    pub fn request_headers(mut self, headers: impl Into<String>) -> Self {
        self.request_headers = Some(headers.into());
        self
    }

    pub fn evaluate(self, registry: &PolicyRegistry) -> CorsDecision {
        let ctx = RequestContext {
            path: &self.path,
            method: method::OPTIONS,
            origin: self.origin.as_deref(),
            access_control_request_method: self.request_method.as_deref(),
            access_control_request_headers: self.request_headers.as_deref(),
        };
        registry.evaluate(&ctx)
    }
}

pub fn actual_request(path: &str) -> ActualRequestBuilder {
    ActualRequestBuilder::new(path)
}

pub fn preflight_request(path: &str) -> PreflightRequestBuilder {
    PreflightRequestBuilder::new(path)
}

/// The rule set of the demo application: a permissive global rule, the `/api`
/// mapping, the account controller with its method-level override, and the
/// `/cors` pages.
pub fn demo_registry() -> PolicyRegistry {
    registry([
        rule("/**").methods_any(),
        rule("/api/**").methods([method::GET, method::HEAD, method::POST]).max_age(Some(3600)),
        rule("/account/**")
            .methods([method::GET, method::DELETE])
            .max_age(Some(3600)),
        rule("/account/{id}")
            .route_methods([method::GET])
            .origins(["https://domain2.com"])
            .methods([method::GET])
            .max_age(Some(3600)),
    ])
}
