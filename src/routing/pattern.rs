//! Route path patterns.
//!
//! # Responsibilities
//! - Parse declared path strings into a closed pattern type, once, at build time
//! - Answer "how many request segments can this pattern consume" for the matcher
//!
//! # Design Decisions
//! - No string inspection at match time: the matcher works on `Segment` variants
//! - Optional parameters are greedy (consume a segment first, then none)

use std::fmt;

/// One piece of a declared path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Exact, case-sensitive text.
    Literal(String),
    /// `:name`, binds exactly one segment.
    Param(String),
    /// `:name?`, binds zero or one segment.
    OptionalParam(String),
}

impl Segment {
    /// Parameter name bound by this segment, if any.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            Segment::Literal(_) => None,
            Segment::Param(name) | Segment::OptionalParam(name) => Some(name.as_str()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => write!(f, "{}", text),
            Segment::Param(name) => write!(f, ":{}", name),
            Segment::OptionalParam(name) => write!(f, ":{}?", name),
        }
    }
}

/// The pattern of a single route node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutePattern {
    /// Matches the parent's path exactly; consumes nothing.
    Index,
    /// A run of segments. Empty for the root (`/`) and for pathless layouts.
    Segments(Vec<Segment>),
}

impl RoutePattern {
    /// Parse a declared path such as `"contentList/:cid?"`.
    ///
    /// Leading, trailing and repeated slashes are ignored, so `"/"` and `""`
    /// both yield an empty segment run.
    pub fn parse(path: &str) -> Result<Self, PatternError> {
        let mut segments = Vec::new();
        for piece in path.split('/').filter(|p| !p.is_empty()) {
            segments.push(parse_segment(piece)?);
        }
        Ok(RoutePattern::Segments(segments))
    }

    /// Segments of this pattern (empty for `Index`).
    pub fn segments(&self) -> &[Segment] {
        match self {
            RoutePattern::Index => &[],
            RoutePattern::Segments(segments) => segments,
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, RoutePattern::Index)
    }

    /// True when the pattern names one fixed, non-empty path.
    pub fn is_literal(&self) -> bool {
        match self {
            RoutePattern::Index => false,
            RoutePattern::Segments(segments) => {
                !segments.is_empty() && segments.iter().all(|s| matches!(s, Segment::Literal(_)))
            }
        }
    }

    /// Parameter names declared by this pattern, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments().iter().filter_map(Segment::param_name)
    }

    /// All ways this pattern can consume a prefix of `rest`, in match order.
    ///
    /// Each entry is the number of request segments consumed plus the
    /// parameters bound while consuming them.
    pub(crate) fn consumptions<'a>(&self, rest: &[&'a str]) -> Vec<(usize, Vec<(String, &'a str)>)> {
        match self {
            RoutePattern::Index => {
                if rest.is_empty() {
                    vec![(0, Vec::new())]
                } else {
                    Vec::new()
                }
            }
            RoutePattern::Segments(segments) => {
                let mut out = Vec::new();
                expand(segments, rest, 0, &mut Vec::new(), &mut out);
                out
            }
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutePattern::Index => write!(f, "(index)"),
            RoutePattern::Segments(segments) => {
                let parts: Vec<String> = segments.iter().map(ToString::to_string).collect();
                write!(f, "{}", parts.join("/"))
            }
        }
    }
}

fn expand<'a>(
    segments: &[Segment],
    rest: &[&'a str],
    consumed: usize,
    bound: &mut Vec<(String, &'a str)>,
    out: &mut Vec<(usize, Vec<(String, &'a str)>)>,
) {
    let Some((first, tail)) = segments.split_first() else {
        out.push((consumed, bound.clone()));
        return;
    };
    let next = rest.get(consumed).copied();

    match first {
        Segment::Literal(text) => {
            if next == Some(text.as_str()) {
                expand(tail, rest, consumed + 1, bound, out);
            }
        }
        Segment::Param(name) => {
            if let Some(value) = next {
                bound.push((name.clone(), value));
                expand(tail, rest, consumed + 1, bound, out);
                bound.pop();
            }
        }
        Segment::OptionalParam(name) => {
            if let Some(value) = next {
                bound.push((name.clone(), value));
                expand(tail, rest, consumed + 1, bound, out);
                bound.pop();
            }
            expand(tail, rest, consumed, bound, out);
        }
    }
}

fn parse_segment(piece: &str) -> Result<Segment, PatternError> {
    let Some(param) = piece.strip_prefix(':') else {
        return Ok(Segment::Literal(piece.to_string()));
    };
    let (name, optional) = match param.strip_suffix('?') {
        Some(name) => (name, true),
        None => (param, false),
    };
    if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(PatternError::InvalidParam(piece.to_string()));
    }
    Ok(if optional {
        Segment::OptionalParam(name.to_string())
    } else {
        Segment::Param(name.to_string())
    })
}

/// A declared path could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("invalid parameter segment `{0}`")]
    InvalidParam(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_segments() {
        let pattern = RoutePattern::parse("contentList/:cid?").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("contentList".into()),
                Segment::OptionalParam("cid".into()),
            ]
        );
        assert_eq!(pattern.to_string(), "contentList/:cid?");
        assert_eq!(pattern.param_names().collect::<Vec<_>>(), vec!["cid"]);
    }

    #[test]
    fn test_parse_root_is_empty() {
        assert_eq!(RoutePattern::parse("/").unwrap(), RoutePattern::Segments(vec![]));
        assert_eq!(RoutePattern::parse("").unwrap(), RoutePattern::Segments(vec![]));
    }

    #[test]
    fn test_parse_rejects_bad_params() {
        assert!(matches!(RoutePattern::parse("a/:"), Err(PatternError::InvalidParam(_))));
        assert!(matches!(RoutePattern::parse(":?"), Err(PatternError::InvalidParam(_))));
        assert!(matches!(RoutePattern::parse(":a-b"), Err(PatternError::InvalidParam(_))));
    }

    #[test]
    fn test_optional_consumptions_are_greedy() {
        let pattern = RoutePattern::parse("contentList/:cid?").unwrap();
        let options = pattern.consumptions(&["contentList", "42", "content"]);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].0, 2);
        assert_eq!(options[0].1, vec![("cid".to_string(), "42")]);
        assert_eq!(options[1].0, 1);
        assert!(options[1].1.is_empty());
    }

    #[test]
    fn test_index_consumes_nothing() {
        assert_eq!(RoutePattern::Index.consumptions(&[]).len(), 1);
        assert!(RoutePattern::Index.consumptions(&["x"]).is_empty());
    }

    #[test]
    fn test_literal_mismatch() {
        let pattern = RoutePattern::parse("config").unwrap();
        assert!(pattern.consumptions(&["Config"]).is_empty());
        assert!(pattern.consumptions(&[]).is_empty());
        assert!(pattern.is_literal());
        assert!(!RoutePattern::parse("/").unwrap().is_literal());
    }
}
