use crate::constants::WILDCARD;
use crate::pattern::{PATTERN_COMPILE_BUDGET, PatternError, compile, push_escaped};
use crate::util::equals_ignore_case;
use regex_automata::meta::Regex;
use std::fmt;

const MAX_ORIGIN_LENGTH: usize = 4_096;

/// Origins a rule accepts.
#[derive(Clone, Debug, Default)]
pub enum AllowedOrigins {
    #[default]
    Any,
    List(Vec<OriginMatcher>),
}

/// Outcome of checking a request origin against [`AllowedOrigins`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginDecision {
    /// Every origin is allowed; `*` may be emitted.
    Any,
    /// The origin matched an entry and must be echoed back.
    Mirror,
    Disallow,
}

#[derive(Clone)]
pub enum OriginMatcher {
    Exact(String),
    Pattern { source: String, regex: Regex },
}

impl OriginMatcher {
    /// Exact origin, compared case-insensitively. A trailing `/` is dropped.
    pub fn exact<S: Into<String>>(value: S) -> Self {
        let value = value.into();
        let trimmed = value.trim().trim_end_matches('/');
        Self::Exact(trimmed.to_string())
    }

    /// Raw regular expression, matched case-insensitively against the whole origin.
    pub fn pattern_str(pattern: &str) -> Result<Self, PatternError> {
        let regex = compile(&format!("^(?:{pattern})$"), true, PATTERN_COMPILE_BUDGET)?;
        Ok(Self::Pattern {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Wildcard origin pattern such as `https://*.domain2.com` or
    /// `http://localhost:*`, where `*` matches any run of characters.
    pub fn wildcard(pattern: &str) -> Result<Self, PatternError> {
        let trimmed = pattern.trim().trim_end_matches('/');
        let mut source = String::with_capacity(trimmed.len() * 2 + 2);
        source.push('^');
        for ch in trimmed.chars() {
            if ch == '*' {
                source.push_str(".*");
            } else {
                push_escaped(&mut source, ch);
            }
        }
        source.push('$');

        let regex = compile(&source, true, PATTERN_COMPILE_BUDGET)?;
        Ok(Self::Pattern {
            source: trimmed.to_string(),
            regex,
        })
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            OriginMatcher::Exact(value) => equals_ignore_case(value, candidate),
            OriginMatcher::Pattern { regex, .. } => regex.is_match(candidate.as_bytes()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OriginMatcher::Exact(value) => value,
            OriginMatcher::Pattern { source, .. } => source,
        }
    }

    pub(crate) fn is_wildcard(&self) -> bool {
        matches!(self, OriginMatcher::Exact(value) if value == WILDCARD)
    }

    /// Whether the entry accepts every origin: a run of `*` or a bare `.*` / `.+` regex.
    pub(crate) fn matches_any(&self) -> bool {
        let source = self.as_str().trim();
        let only_stars = !source.is_empty() && source.chars().all(|ch| ch == '*');
        match self {
            OriginMatcher::Exact(_) => only_stars,
            OriginMatcher::Pattern { .. } => {
                only_stars || matches!(source, ".*" | ".+" | "^.*$" | "^.+$")
            }
        }
    }
}

impl fmt::Debug for OriginMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginMatcher::Exact(value) => f.debug_tuple("Exact").field(value).finish(),
            OriginMatcher::Pattern { source, .. } => {
                f.debug_tuple("Pattern").field(source).finish()
            }
        }
    }
}

impl From<String> for OriginMatcher {
    fn from(value: String) -> Self {
        OriginMatcher::exact(value)
    }
}

impl From<&str> for OriginMatcher {
    fn from(value: &str) -> Self {
        OriginMatcher::exact(value)
    }
}

impl AllowedOrigins {
    pub fn any() -> Self {
        Self::Any
    }

    /// Builds an allow-list. A list holding only `*` collapses to [`Self::Any`].
    pub fn list<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OriginMatcher>,
    {
        let matchers: Vec<OriginMatcher> = values.into_iter().map(Into::into).collect();
        if matchers.len() == 1 && matchers[0].is_wildcard() {
            return Self::Any;
        }
        Self::List(matchers)
    }

    /// A literal `*` request origin is never mirrored.
    pub fn resolve(&self, origin: &str) -> OriginDecision {
        if origin.len() > MAX_ORIGIN_LENGTH {
            return OriginDecision::Disallow;
        }

        match self {
            AllowedOrigins::Any => OriginDecision::Any,
            AllowedOrigins::List(_) if origin.trim() == WILDCARD => OriginDecision::Disallow,
            AllowedOrigins::List(matchers) => {
                if matchers.iter().any(|matcher| matcher.matches(origin)) {
                    OriginDecision::Mirror
                } else {
                    OriginDecision::Disallow
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
