mod common;

use bunner_cors_registry::constants::{header, method};
use bunner_cors_registry::{AllowedHeaders, RequestContext};
use common::builders::{preflight_request, registry, rule};
use common::headers::header_value;
use proptest::prelude::*;

fn staggered_case(input: &str) -> String {
    input
        .chars()
        .enumerate()
        .map(|(idx, ch)| {
            if idx % 2 == 0 {
                ch.to_ascii_lowercase()
            } else {
                ch.to_ascii_uppercase()
            }
        })
        .collect()
}

fn subdomain_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9]{1,16}").unwrap()
}

fn header_name_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z]{1,16}").unwrap()
}

fn path_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-z0-9]{1,8}", 0..5)
        .prop_map(|segments| format!("/{}", segments.join("/")))
}

fn method_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just(method::GET),
        Just(method::HEAD),
        Just(method::POST),
        Just(method::PUT),
        Just(method::DELETE),
        Just(method::OPTIONS),
    ]
}

proptest! {
    #[test]
    fn request_without_origin_is_always_allowed_without_headers(
        path in path_strategy(),
        request_method in method_strategy(),
        requested in prop::option::of(method_strategy()),
    ) {
        let registry = registry([
            rule("/**").methods_any(),
            rule("/api/**").origins(["https://domain2.com"]).credentials(true),
        ]);
        let ctx = RequestContext {
            path: &path,
            method: request_method,
            origin: None,
            access_control_request_method: requested,
            access_control_request_headers: Some("X-Test"),
        };

        let decision = registry.evaluate(&ctx);

        prop_assert!(decision.allowed);
        prop_assert!(decision.headers.is_empty());
    }

    #[test]
    fn credentialed_rule_never_emits_wildcard_origin(
        subdomain in subdomain_strategy(),
        preflight in any::<bool>(),
    ) {
        let origin = format!("https://{}.domain2.com", subdomain);
        let registry = registry([rule("/**")
            .origins([
                bunner_cors_registry::OriginMatcher::wildcard("https://*.domain2.com").unwrap(),
            ])
            .methods_any()
            .credentials(true)]);
        let ctx = RequestContext {
            path: "/api/account/5",
            method: if preflight { method::OPTIONS } else { method::GET },
            origin: Some(&origin),
            access_control_request_method: Some(method::GET),
            access_control_request_headers: None,
        };

        let decision = registry.evaluate(&ctx);

        prop_assert!(decision.allowed);
        prop_assert_eq!(
            decision.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(origin.as_str())
        );
        prop_assert_ne!(decision.header(header::ACCESS_CONTROL_ALLOW_METHODS), Some("*"));
    }

    #[test]
    fn credentialed_rule_never_mirrors_literal_wildcard_origin(
        origin in prop_oneof![
            Just("*".to_string()),
            Just(" * ".to_string()),
            "https://[a-z0-9]{1,8}\\.example",
        ],
        preflight in any::<bool>(),
    ) {
        let registry = registry([rule("/**")
            .origins([bunner_cors_registry::OriginMatcher::pattern_str("(?:.*)").unwrap()])
            .methods_any()
            .credentials(true)]);
        let ctx = RequestContext {
            path: "/cors/json",
            method: if preflight { method::OPTIONS } else { method::GET },
            origin: Some(&origin),
            access_control_request_method: Some(method::GET),
            access_control_request_headers: None,
        };

        let decision = registry.evaluate(&ctx);

        prop_assert_ne!(decision.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), Some("*"));
        prop_assert_eq!(decision.allowed, origin.trim() != "*");
    }

    #[test]
    fn evaluation_is_idempotent(
        path in path_strategy(),
        subdomain in subdomain_strategy(),
        request_method in method_strategy(),
    ) {
        let registry = registry([
            rule("/**"),
            rule("/api/**").origins(["https://app.example"]).max_age(Some(60)),
        ]);
        let origin = format!("https://{}.example", subdomain);
        let ctx = RequestContext::new(&path, request_method)
            .with_origin(&origin)
            .with_request_method(method::POST)
            .with_request_headers("X-Trace");

        prop_assert_eq!(registry.evaluate(&ctx), registry.evaluate(&ctx));
    }

    #[test]
    fn more_specific_prefix_always_wins(
        tail in proptest::collection::vec("[a-z0-9]{1,8}", 0..4),
        register_broad_first in any::<bool>(),
    ) {
        let broad = rule("/api/**").max_age(Some(1));
        let narrow = rule("/api/account/**").max_age(Some(2));
        let registry = if register_broad_first {
            registry([broad, narrow])
        } else {
            registry([narrow, broad])
        };
        let path = format!("/api/account/{}", tail.join("/"));

        let headers = registry.evaluate(
            &RequestContext::new(&path, method::OPTIONS)
                .with_origin("https://foo.com")
                .with_request_method(method::GET),
        ).headers;

        prop_assert_eq!(header_value(&headers, header::ACCESS_CONTROL_MAX_AGE), Some("2"));
    }

    #[test]
    fn allowed_headers_matching_is_case_insensitive(header in header_name_strategy()) {
        let allowed = header.to_uppercase();
        let request_variant = staggered_case(&header);

        let decision = preflight_request("/x")
            .origin("https://prop.test")
            .request_method(method::GET)
            .request_headers(request_variant)
            .evaluate(&registry([
                rule("/**").allowed_headers(AllowedHeaders::list([allowed.clone()])),
            ]));

        prop_assert!(decision.allowed);
        prop_assert!(decision.is_preflight());
    }
}
