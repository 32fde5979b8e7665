//! Path pattern parsing.
//!
//! # Grammar
//! ```text
//! pattern   = { "/" segment }
//! segment   = static | param
//! param     = ":" name [ "(" regex ")" ] [ "?" | "*" | "+" ]
//! name      = [A-Za-z0-9_]+
//! ```
//!
//! # Design Decisions
//! - Parsing is separate from compilation so config validation can report
//!   pattern errors without building a router
//! - Patterns without parameters never touch the regex engine
//! - A segment may not mix static text and a parameter

use std::collections::HashSet;
use std::fmt::Write;

use thiserror::Error;

/// Regex used for a parameter without a custom one.
pub const DEFAULT_PARAM_REGEX: &str = "[^/]+?";

/// Error produced while parsing a path pattern.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern '{pattern}': empty parameter name")]
    EmptyParamName { pattern: String },

    #[error("pattern '{pattern}': unbalanced parentheses")]
    Unbalanced { pattern: String },

    #[error("pattern '{pattern}': unexpected '{rest}' after parameter '{name}'")]
    TrailingCharacters {
        pattern: String,
        name: String,
        rest: String,
    },

    #[error("pattern '{pattern}': segment '{segment}' mixes static text and a parameter")]
    MixedSegment { pattern: String, segment: String },

    #[error("pattern '{pattern}': parameter '{name}' is declared twice")]
    DuplicateParam { pattern: String, name: String },

    #[error("pattern '{pattern}': invalid regex: {reason}")]
    InvalidRegex { pattern: String, reason: String },
}

/// How many segments a parameter may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    /// Exactly one segment.
    One,
    /// `?`: zero or one segment.
    Optional,
    /// `*`: zero or more segments.
    ZeroOrMore,
    /// `+`: one or more segments.
    OneOrMore,
}

impl Modifier {
    pub fn is_repeatable(self) -> bool {
        matches!(self, Modifier::ZeroOrMore | Modifier::OneOrMore)
    }
}

/// One `/`-separated piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param {
        name: String,
        regex: Option<String>,
        modifier: Modifier,
    },
}

/// A parsed path pattern such as `/users/:id(\d+)` or `/:catchAll(.*)*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        let mut segments = Vec::new();
        let mut seen = HashSet::new();

        for raw in split_segments(source)? {
            let segment = if let Some(body) = raw.strip_prefix(':') {
                parse_param(source, body)?
            } else if raw.contains(':') {
                return Err(PatternError::MixedSegment {
                    pattern: source.to_string(),
                    segment: raw.to_string(),
                });
            } else {
                Segment::Static(raw.to_string())
            };

            if let Segment::Param { name, .. } = &segment {
                if !seen.insert(name.clone()) {
                    return Err(PatternError::DuplicateParam {
                        pattern: source.to_string(),
                        name: name.clone(),
                    });
                }
            }
            segments.push(segment);
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when the pattern has no parameters.
    pub fn is_static(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Static(_)))
    }

    /// True for a single repeatable or `.*` parameter, which matches any path.
    pub fn is_catch_all(&self) -> bool {
        match self.segments.as_slice() {
            [Segment::Param {
                regex, modifier, ..
            }] => *modifier == Modifier::ZeroOrMore || regex.as_deref() == Some(".*"),
            _ => false,
        }
    }

    /// Canonical literal path of a static pattern (`/` for the root).
    pub fn static_path(&self) -> Option<String> {
        if !self.is_static() {
            return None;
        }
        let mut out = String::new();
        for segment in &self.segments {
            if let Segment::Static(s) = segment {
                out.push('/');
                out.push_str(s);
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        Some(out)
    }

    /// Anchored regex source. Parameter `i` is captured as group `p{i}`.
    pub fn to_regex(&self, sensitive: bool, strict: bool) -> String {
        let mut out = String::new();
        if !sensitive {
            out.push_str("(?i)");
        }
        out.push('^');

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Static(s) => {
                    out.push('/');
                    out.push_str(&regex::escape(s));
                }
                Segment::Param {
                    regex, modifier, ..
                } => {
                    let r = regex.as_deref().unwrap_or(DEFAULT_PARAM_REGEX);
                    // Writing to a String cannot fail.
                    let _ = match modifier {
                        Modifier::One => write!(out, "/(?P<p{i}>{r})"),
                        Modifier::Optional => write!(out, "(?:/(?P<p{i}>{r}))?"),
                        Modifier::ZeroOrMore => {
                            write!(out, "(?:/(?P<p{i}>(?:{r})(?:/(?:{r}))*))?")
                        }
                        Modifier::OneOrMore => write!(out, "/(?P<p{i}>(?:{r})(?:/(?:{r}))*)"),
                    };
                }
            }
        }

        if self.segments.is_empty() {
            out.push_str(if strict { "/" } else { "/?" });
        } else if !strict {
            out.push_str("/?");
        }
        out.push('$');
        out
    }
}

/// Split on `/` outside of parentheses, dropping empty pieces.
fn split_segments(source: &str) -> Result<Vec<&str>, PatternError> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in source.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' => {
                depth = depth.checked_sub(1).ok_or_else(|| PatternError::Unbalanced {
                    pattern: source.to_string(),
                })?;
            }
            '/' if depth == 0 => {
                segments.push(&source[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(PatternError::Unbalanced {
            pattern: source.to_string(),
        });
    }
    segments.push(&source[start..]);

    Ok(segments.into_iter().filter(|s| !s.is_empty()).collect())
}

fn parse_param(source: &str, body: &str) -> Result<Segment, PatternError> {
    let name_len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(body.len());
    let name = &body[..name_len];
    if name.is_empty() {
        return Err(PatternError::EmptyParamName {
            pattern: source.to_string(),
        });
    }

    let mut rest = &body[name_len..];
    let mut regex = None;
    if rest.starts_with('(') {
        let close = matching_paren(rest).ok_or_else(|| PatternError::Unbalanced {
            pattern: source.to_string(),
        })?;
        regex = Some(rest[1..close].to_string());
        rest = &rest[close + 1..];
    }

    let modifier = match rest {
        "" => Modifier::One,
        "?" => Modifier::Optional,
        "*" => Modifier::ZeroOrMore,
        "+" => Modifier::OneOrMore,
        other => {
            return Err(PatternError::TrailingCharacters {
                pattern: source.to_string(),
                name: name.to_string(),
                rest: other.to_string(),
            })
        }
    };

    Ok(Segment::Param {
        name: name.to_string(),
        regex,
        modifier,
    })
}

/// Byte index of the `)` closing the `(` at index 0.
fn matching_paren(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
