//! Route matching logic.
//!
//! # Responsibilities
//! - Match a normalized location path against one compiled pattern
//! - Extract parameter values on success
//!
//! # Design Decisions
//! - Static patterns use string comparison, no regex
//! - Dynamic patterns compile to a single anchored regex
//! - Case-insensitive and trailing-slash tolerant unless configured otherwise

use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::Serialize;

use crate::routing::pattern::{Modifier, PathPattern, PatternError, Segment};

/// Value captured for one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Single(String),
    /// Segments captured by a `*` or `+` parameter.
    Repeated(Vec<String>),
}

impl ParamValue {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            ParamValue::Single(s) => Some(s),
            ParamValue::Repeated(_) => None,
        }
    }

    pub fn as_repeated(&self) -> Option<&[String]> {
        match self {
            ParamValue::Single(_) => None,
            ParamValue::Repeated(v) => Some(v),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Single(s) => f.write_str(s),
            ParamValue::Repeated(v) => f.write_str(&v.join("/")),
        }
    }
}

/// Parameters extracted from a match, keyed by name.
pub type Params = BTreeMap<String, ParamValue>;

/// Matching options shared by every route of a router.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Case-sensitive matching.
    pub sensitive: bool,
    /// Reject a trailing slash the pattern does not have.
    pub strict: bool,
}

/// Trait for matching a location path against a route pattern.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns the extracted parameters if the path matches.
    fn match_path(&self, path: &str) -> Option<Params>;
}

/// Matches a pattern without parameters.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    expected: String,
    options: MatchOptions,
}

impl ExactMatcher {
    pub fn new(path: impl Into<String>, options: MatchOptions) -> Self {
        let path = path.into();
        Self {
            // Folded once when matching is case-insensitive.
            expected: if options.sensitive {
                path
            } else {
                path.to_lowercase()
            },
            options,
        }
    }
}

impl Matcher for ExactMatcher {
    fn match_path(&self, path: &str) -> Option<Params> {
        let path = if path.is_empty() { "/" } else { path };
        // The root pattern has no trailing slash to tolerate.
        let candidate = if self.options.strict || self.expected == "/" {
            path
        } else {
            path.strip_suffix('/').unwrap_or(path)
        };

        let matched = if self.options.sensitive {
            candidate == self.expected
        } else {
            candidate.to_lowercase() == self.expected
        };
        matched.then(Params::new)
    }
}

#[derive(Debug, Clone)]
struct ParamSlot {
    group: String,
    name: String,
    modifier: Modifier,
}

/// Matches a pattern with parameters through one anchored regex.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
    params: Vec<ParamSlot>,
}

impl RegexMatcher {
    pub fn new(pattern: &PathPattern, options: MatchOptions) -> Result<Self, PatternError> {
        let source = pattern.to_regex(options.sensitive, options.strict);
        let regex = Regex::new(&source).map_err(|e| PatternError::InvalidRegex {
            pattern: pattern.source().to_string(),
            reason: e.to_string(),
        })?;

        let params = pattern
            .segments()
            .iter()
            .enumerate()
            .filter_map(|(i, segment)| match segment {
                Segment::Param { name, modifier, .. } => Some(ParamSlot {
                    group: format!("p{i}"),
                    name: name.clone(),
                    modifier: *modifier,
                }),
                Segment::Static(_) => None,
            })
            .collect();

        Ok(Self { regex, params })
    }
}

impl Matcher for RegexMatcher {
    fn match_path(&self, path: &str) -> Option<Params> {
        let captures = self.regex.captures(path)?;
        let mut params = Params::new();

        for slot in &self.params {
            let captured = captures.name(&slot.group).map(|m| m.as_str());
            let value = match (captured, slot.modifier.is_repeatable()) {
                (Some(s), true) => ParamValue::Repeated(
                    s.split('/')
                        .filter(|p| !p.is_empty())
                        .map(str::to_string)
                        .collect(),
                ),
                (None, true) => ParamValue::Repeated(Vec::new()),
                (Some(s), false) => ParamValue::Single(s.to_string()),
                (None, false) => continue,
            };
            params.insert(slot.name.clone(), value);
        }
        Some(params)
    }
}

/// Compile a parsed pattern into the cheapest matcher that handles it.
pub fn compile(
    pattern: &PathPattern,
    options: MatchOptions,
) -> Result<Box<dyn Matcher>, PatternError> {
    match pattern.static_path() {
        Some(path) => Ok(Box::new(ExactMatcher::new(path, options))),
        None => Ok(Box::new(RegexMatcher::new(pattern, options)?)),
    }
}
