use crate::constants::{WILDCARD, method};
use crate::util::{dedup_ignore_case, equals_ignore_case};
use once_cell::sync::Lazy;

static PERMIT_DEFAULT_METHODS: Lazy<AllowedMethods> =
    Lazy::new(|| AllowedMethods::list([method::GET, method::HEAD, method::POST]));

/// Configuration for the `Access-Control-Allow-Methods` response header.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AllowedMethods {
    /// Any method is allowed.
    Any,
    /// Explicit list, matched case-insensitively and emitted as written.
    List(Vec<String>),
}

impl AllowedMethods {
    /// Construct an explicit list of allowed methods. A list holding only `*`
    /// collapses to [`Self::Any`].
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

    pub fn allows_method(&self, requested: &str) -> bool {
        let requested = requested.trim();
        match self {
            Self::Any => !requested.is_empty(),
            Self::List(values) => values
                .iter()
                .any(|allowed| equals_ignore_case(allowed, requested)),
        }
    }

    /// Header value for a preflight that requested `requested`.
    ///
    /// With credentials a literal `*` is not treated as a wildcard by browsers,
    /// so [`Self::Any`] echoes the requested method instead.
    pub fn header_value(&self, requested: &str, credentials: bool) -> Option<String> {
        match self {
            Self::Any if credentials => Some(requested.trim().to_string()),
            Self::Any => Some(WILDCARD.to_string()),
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(values.join(",")),
        }
    }
}

impl Default for AllowedMethods {
    /// `GET`, `HEAD` and `POST`.
    fn default() -> Self {
        PERMIT_DEFAULT_METHODS.clone()
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;
