use crate::constants::WILDCARD;
use crate::util::{dedup_ignore_case, equals_ignore_case, split_header_list};

/// Configuration for the `Access-Control-Allow-Headers` response value.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum AllowedHeaders {
    List(Vec<String>),
    /// Any requested header is allowed.
    #[default]
    Any,
}

impl AllowedHeaders {
    /// Builds an allow-list, trimming and removing duplicates. A list holding
    /// only `*` collapses to [`Self::Any`].
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = dedup_ignore_case(values);
        if values.len() == 1 && values[0] == WILDCARD {
            return Self::Any;
        }
        Self::List(values)
    }

    pub fn any() -> Self {
        Self::Any
    }

    /// Checks a comma-separated `Access-Control-Request-Headers` value.
    pub fn allows_headers(&self, request_headers: &str) -> bool {
        match self {
            Self::Any => true,
            Self::List(allowed) => split_header_list(request_headers).all(|header| {
                allowed
                    .iter()
                    .any(|allowed_header| equals_ignore_case(allowed_header, header))
            }),
        }
    }

    /// Header value for a preflight that requested `requested`.
    ///
    /// [`Self::Any`] echoes the requested headers when credentials are on,
    /// since browsers read `*` literally in that case.
    pub fn header_value(&self, requested: Option<&str>, credentials: bool) -> Option<String> {
        match self {
            Self::Any if credentials => requested
                .map(|headers| split_header_list(headers).collect::<Vec<_>>().join(","))
                .filter(|value| !value.is_empty()),
            Self::Any => Some(WILDCARD.to_string()),
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(values.join(",")),
        }
    }
}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;
