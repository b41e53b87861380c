use crate::constants::MATCH_ALL_PATHS;
use crate::pattern::{PATTERN_COMPILE_BUDGET, PatternError, compile, push_escaped};
use regex_automata::meta::Regex;
use std::cmp::Reverse;
use std::fmt;

/// Ant-style route pattern such as `/api/**`, `/account/{id}` or `/files/*.txt`.
///
/// - `?` matches one character within a segment
/// - `*` matches zero or more characters within a segment
/// - `**` matches zero or more whole segments
/// - `{name}` matches one non-empty segment, `{name:regex}` constrains it
#[derive(Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
    specificity: Specificity,
}

/// Ordering key where a greater value means a more specific pattern.
///
/// Fields are compared in declaration order: catch-all `/**` ranks lowest,
/// then any pattern containing `**` ranks below patterns without one, then
/// fewer wildcards in total, longer literal text, fewer `*`, fewer variables.
/// A prefix pattern such as `/api/account/**` therefore loses to `/api/{id}`
/// but competes with `/**/x` on wildcard count and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    not_catch_all: bool,
    no_double_wildcards: bool,
    fewer_wildcards: Reverse<usize>,
    length: usize,
    fewer_single_wildcards: Reverse<usize>,
    fewer_variables: Reverse<usize>,
}

#[derive(Default)]
struct PatternStats {
    variables: usize,
    single_wildcards: usize,
    double_wildcards: usize,
    length: usize,
}

impl PathPattern {
    /// Compiles `pattern`. A missing leading `/` is added.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let trimmed = pattern.trim();
        let source = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };

        let mut stats = PatternStats::default();
        let regex_source = translate(&source, &mut stats)?;
        let regex = compile(&regex_source, false, PATTERN_COMPILE_BUDGET)?;

        let total = stats.variables + stats.single_wildcards + 2 * stats.double_wildcards;
        let specificity = Specificity {
            not_catch_all: source != MATCH_ALL_PATHS,
            no_double_wildcards: stats.double_wildcards == 0,
            fewer_wildcards: Reverse(total),
            length: stats.length,
            fewer_single_wildcards: Reverse(stats.single_wildcards),
            fewer_variables: Reverse(stats.variables),
        };

        Ok(Self {
            source,
            regex,
            specificity,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// Matches the path component of `path`; any query string is ignored.
    pub fn matches(&self, path: &str) -> bool {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        self.regex.is_match(path.as_bytes())
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathPattern")
            .field("source", &self.source)
            .field("specificity", &self.specificity)
            .finish()
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for PathPattern {}

fn translate(source: &str, stats: &mut PatternStats) -> Result<String, PatternError> {
    let body = &source[1..];
    let segments: Vec<&str> = if body.is_empty() {
        Vec::new()
    } else {
        body.split('/').collect()
    };

    let mut regex = String::with_capacity(source.len() * 2 + 8);
    regex.push('^');

    let last = segments.len().saturating_sub(1);
    for (index, segment) in segments.iter().enumerate() {
        if *segment == "**" {
            stats.double_wildcards += 1;
            if index == last {
                regex.push_str("(?:/.*)?");
            } else {
                regex.push_str("(?:/[^/]+)*");
            }
            continue;
        }

        regex.push('/');
        stats.length += 1;
        translate_segment(source, segment, &mut regex, stats)?;
    }

    if segments.last() != Some(&"**") {
        regex.push_str("/?");
    }
    regex.push('$');

    Ok(regex)
}

fn translate_segment(
    source: &str,
    segment: &str,
    regex: &mut String,
    stats: &mut PatternStats,
) -> Result<(), PatternError> {
    if segment.contains("**") {
        return Err(PatternError::Syntax {
            pattern: source.to_string(),
            reason: "`**` must occupy a whole path segment",
        });
    }

    let mut chars = segment.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '*' => {
                stats.single_wildcards += 1;
                regex.push_str("[^/]*");
            }
            '?' => {
                stats.length += 1;
                regex.push_str("[^/]");
            }
            '{' => {
                let variable = read_variable(source, &mut chars)?;
                stats.variables += 1;
                stats.length += 1;
                match variable.split_once(':') {
                    Some((_, constraint)) if !constraint.is_empty() => {
                        regex.push_str("(?:");
                        regex.push_str(constraint);
                        regex.push(')');
                    }
                    _ => regex.push_str("[^/]+"),
                }
            }
            '}' => {
                return Err(PatternError::Syntax {
                    pattern: source.to_string(),
                    reason: "unbalanced `}`",
                });
            }
            other => {
                stats.length += 1;
                push_escaped(regex, other);
            }
        }
    }

    Ok(())
}

fn read_variable(source: &str, chars: &mut std::str::Chars<'_>) -> Result<String, PatternError> {
    let mut depth = 1usize;
    let mut variable = String::new();
    for ch in chars.by_ref() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let name = variable.split(':').next().unwrap_or_default();
                    if name.trim().is_empty() {
                        return Err(PatternError::Syntax {
                            pattern: source.to_string(),
                            reason: "path variable requires a name",
                        });
                    }
                    return Ok(variable);
                }
            }
            _ => {}
        }
        variable.push(ch);
    }

    Err(PatternError::Syntax {
        pattern: source.to_string(),
        reason: "unterminated `{` in path variable",
    })
}

#[cfg(test)]
#[path = "path_pattern_test.rs"]
mod path_pattern_test;
