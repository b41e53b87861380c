mod common;

use bunner_cors_registry::constants::{header, method};
use bunner_cors_registry::PolicyMismatch;
use common::asserts::{
    assert_actual, assert_header_absent, assert_header_eq, assert_not_applicable,
    assert_rejected, assert_vary_eq, assert_vary_is_empty,
};
use common::builders::{actual_request, registry, rule};

#[test]
fn actual_request_with_wildcard_origin_emits_star() {
    let registry = registry([rule("/**")]);

    let headers = assert_actual(
        actual_request("/cors/json")
            .origin("https://foo.com")
            .evaluate(&registry),
    );

    assert_header_eq(&headers, header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");
    assert_vary_is_empty(&headers);
}

#[test]
fn actual_request_never_emits_preflight_only_headers() {
    let registry = registry([rule("/**").max_age(Some(600))]);

    let headers = assert_actual(
        actual_request("/cors/json")
            .origin("https://foo.com")
            .evaluate(&registry),
    );

    assert_header_absent(&headers, header::ACCESS_CONTROL_ALLOW_METHODS);
    assert_header_absent(&headers, header::ACCESS_CONTROL_ALLOW_HEADERS);
    assert_header_absent(&headers, header::ACCESS_CONTROL_MAX_AGE);
}

#[test]
fn actual_request_emits_exposed_headers() {
    let registry = registry([rule("/**").exposed_headers(["X-Result", "X-Trace"])]);

    let headers = assert_actual(
        actual_request("/cors/json")
            .origin("https://foo.com")
            .evaluate(&registry),
    );

    assert_header_eq(&headers, header::ACCESS_CONTROL_EXPOSE_HEADERS, "X-Result,X-Trace");
}

#[test]
fn actual_request_with_credentials_echoes_origin() {
    let registry = registry([rule("/**")
        .origins(["https://domain2.com"])
        .credentials(true)]);

    let headers = assert_actual(
        actual_request("/account/5")
            .origin("https://domain2.com")
            .evaluate(&registry),
    );

    assert_header_eq(
        &headers,
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        "https://domain2.com",
    );
    assert_header_eq(&headers, header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
    assert_vary_eq(&headers, [header::ORIGIN]);
}

#[test]
fn actual_request_method_is_matched_case_insensitively() {
    let registry = registry([rule("/**").methods([method::GET])]);

    assert_actual(
        actual_request("/x")
            .method("get")
            .origin("https://foo.com")
            .evaluate(&registry),
    );
}

#[test]
fn actual_request_with_disallowed_method_is_rejected() {
    let registry = registry([rule("/**").methods([method::GET])]);

    let mismatch = assert_rejected(
        actual_request("/x")
            .method(method::DELETE)
            .origin("https://foo.com")
            .evaluate(&registry),
    );

    assert_eq!(
        mismatch,
        PolicyMismatch::MethodNotAllowed {
            method: method::DELETE.into()
        }
    );
}

#[test]
fn actual_request_without_origin_is_not_applicable() {
    let registry = registry([rule("/**")]);

    assert_not_applicable(actual_request("/x").evaluate(&registry));
}

#[test]
fn actual_request_with_blank_origin_is_not_applicable() {
    let registry = registry([rule("/**")]);

    assert_not_applicable(actual_request("/x").origin("").evaluate(&registry));
}
