use regex_automata::meta::{BuildError, Regex};
use std::time::{Duration, Instant};
use thiserror::Error;

pub(crate) const PATTERN_COMPILE_BUDGET: Duration = Duration::from_millis(100);
pub(crate) const MAX_PATTERN_LENGTH: usize = 50_000;

/// Errors raised while compiling a path or origin pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile pattern `{pattern}`")]
    Build {
        pattern: String,
        #[source]
        source: Box<BuildError>,
    },
    #[error("compiling pattern exceeded the configured budget ({elapsed:?} > {budget:?})")]
    Timeout { elapsed: Duration, budget: Duration },
    #[error("pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
    #[error("invalid pattern `{pattern}`: {reason}")]
    Syntax {
        pattern: String,
        reason: &'static str,
    },
}

/// Compiles `source` into an anchored-by-caller meta regex, enforcing the
/// length limit and the compile budget.
pub(crate) fn compile(
    source: &str,
    case_insensitive: bool,
    budget: Duration,
) -> Result<Regex, PatternError> {
    if source.len() > MAX_PATTERN_LENGTH {
        return Err(PatternError::TooLong {
            length: source.len(),
            max: MAX_PATTERN_LENGTH,
        });
    }

    let started = Instant::now();
    let regex = if case_insensitive {
        Regex::new(&format!("(?i:{source})"))
    } else {
        Regex::new(source)
    }
    .map_err(|err| PatternError::Build {
        pattern: source.to_string(),
        source: Box::new(err),
    })?;
    let elapsed = started.elapsed();
    if elapsed > budget {
        return Err(PatternError::Timeout { elapsed, budget });
    }

    Ok(regex)
}

/// Appends `ch` to `out`, escaping regex meta characters.
pub(crate) fn push_escaped(out: &mut String, ch: char) {
    if matches!(
        ch,
        '\\' | '.'
            | '+'
            | '*'
            | '?'
            | '('
            | ')'
            | '|'
            | '['
            | ']'
            | '{'
            | '}'
            | '^'
            | '$'
            | '#'
            | '&'
            | '-'
            | '~'
    ) {
        out.push('\\');
    }
    out.push(ch);
}

#[cfg(test)]
#[path = "pattern_test.rs"]
mod pattern_test;
