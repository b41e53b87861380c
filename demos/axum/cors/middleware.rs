use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header::VARY},
    middleware::Next,
    response::Response,
};
use bunner_cors_registry::{CorsDecision, DecisionKind, Headers, RequestContext, constants::header};

use super::AppState;

pub async fn cors_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let owned_ctx = OwnedRequestContext::from_request(&request);
    let decision = state.registry.evaluate(&owned_ctx.as_request_context());

    match decision.kind {
        DecisionKind::Preflight => preflight_response(decision),
        DecisionKind::Actual => {
            let mut response = next.run(request).await;
            if decision.allowed {
                apply_headers(response.headers_mut(), &decision.headers);
            } else if let Some(mismatch) = &decision.mismatch {
                tracing::debug!(
                    path = %owned_ctx.path,
                    reason = %mismatch,
                    "serving without CORS headers"
                );
            }
            response
        }
        DecisionKind::NotApplicable => next.run(request).await,
    }
}

fn preflight_response(decision: CorsDecision) -> Response {
    if decision.allowed {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        apply_headers(response.headers_mut(), &decision.headers);
        return response;
    }

    let message = match &decision.mismatch {
        Some(mismatch) => format!("Invalid CORS request: {mismatch}"),
        None => "Invalid CORS request".to_string(),
    };
    let mut response = Response::new(Body::from(message));
    *response.status_mut() = StatusCode::FORBIDDEN;
    response
}

/// Writes the CORS headers, keeping any `Vary` entries the handler already set.
fn apply_headers(map: &mut HeaderMap, headers: &Headers) {
    for (name, value) in headers.iter() {
        let (Ok(header_name), Ok(header_value)) =
            (HeaderName::try_from(name.as_str()), HeaderValue::from_str(value))
        else {
            continue;
        };

        if header_name == VARY {
            if !varies_on(map, value) {
                map.append(VARY, header_value);
            }
        } else {
            map.insert(header_name, header_value);
        }
    }
}

fn varies_on(map: &HeaderMap, value: &str) -> bool {
    map.get_all(VARY)
        .iter()
        .filter_map(|existing| existing.to_str().ok())
        .flat_map(|existing| existing.split(','))
        .any(|token| token.trim().eq_ignore_ascii_case(value))
}

struct OwnedRequestContext {
    path: String,
    method: String,
    origin: Option<String>,
    access_control_request_method: Option<String>,
    access_control_request_headers: Option<String>,
}

impl OwnedRequestContext {
    fn from_request(request: &Request) -> Self {
        let headers = request.headers();

        Self {
            path: request.uri().path().to_string(),
            method: request.method().as_str().to_string(),
            origin: header_value(headers, header::ORIGIN),
            access_control_request_method: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_METHOD,
            ),
            access_control_request_headers: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_HEADERS,
            ),
        }
    }

    fn as_request_context(&self) -> RequestContext<'_> {
        RequestContext {
            path: &self.path,
            method: &self.method,
            origin: self.origin.as_deref(),
            access_control_request_method: self.access_control_request_method.as_deref(),
            access_control_request_headers: self.access_control_request_headers.as_deref(),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}
