use crate::constants::WILDCARD;
use crate::util::dedup_ignore_case;

/// Configuration mirror of the `Access-Control-Expose-Headers` response header,
/// emitted on actual (non-preflight) responses only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExposedHeaders {
    List(Vec<String>),
    Any,
}

impl Default for ExposedHeaders {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl ExposedHeaders {
    /// Builds a list from the provided iterator, trimming whitespace and
    /// removing duplicates.
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let deduped = dedup_ignore_case(values);
        if deduped.len() == 1 && deduped[0] == WILDCARD {
            return Self::Any;
        }

        Self::List(deduped)
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(values.join(",")),
            Self::Any => Some(WILDCARD.to_string()),
        }
    }

    /// Explicitly configured header names; empty for [`Self::Any`].
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        match self {
            Self::List(values) => values.iter(),
            Self::Any => (&[] as &[String]).iter(),
        }
    }
}

#[cfg(test)]
#[path = "exposed_headers_test.rs"]
mod exposed_headers_test;
