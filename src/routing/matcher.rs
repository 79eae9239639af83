//! Route matching logic.
//!
//! # Responsibilities
//! - Split a request path into segments (query split off, fragment dropped)
//! - Find the unique root-to-leaf chain whose patterns consume the whole path
//! - Bind parameter values along the chain
//!
//! # Design Decisions
//! - Recursive descent with backtracking; first declared child wins
//! - Segment text is case-sensitive and not percent-decoded
//! - An exhausted path still tries children (index, all-optional) before the
//!   current node terminates the chain
//! - Deterministic: same tree and path always yield the same result

use std::collections::BTreeMap;

use crate::routing::tree::{NodeId, RouteTree};

/// Parameter name to bound value.
pub type Params = BTreeMap<String, String>;

/// One node of a matched chain and the request segments it consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedNode {
    pub node: NodeId,
    pub segments: Vec<String>,
    pub params: Vec<(String, String)>,
}

/// A successful match: the chain from root to leaf plus its bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchContext {
    /// The request path as given.
    pub path: String,
    pub chain: Vec<MatchedNode>,
    pub params: Params,
    pub query: BTreeMap<String, String>,
}

impl MatchContext {
    /// Matched node ids, root first.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.chain.iter().map(|m| m.node)
    }

    pub fn leaf(&self) -> Option<NodeId> {
        self.chain.last().map(|m| m.node)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Segments consumed by the whole chain, in order.
    pub fn consumed(&self) -> Vec<&str> {
        self.chain
            .iter()
            .flat_map(|m| m.segments.iter().map(String::as_str))
            .collect()
    }

    /// The first `len` nodes of the chain with only their own bindings.
    pub fn prefix(&self, len: usize) -> MatchContext {
        let chain: Vec<MatchedNode> = self.chain.iter().take(len).cloned().collect();
        let params: Params = chain
            .iter()
            .flat_map(|m| m.params.iter().cloned())
            .collect();
        MatchContext {
            path: self.path.clone(),
            chain,
            params,
            query: self.query.clone(),
        }
    }
}

/// Outcome of matching a path against a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Matched(MatchContext),
    NoMatch,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched(_))
    }

    pub fn into_context(self) -> Option<MatchContext> {
        match self {
            MatchResult::Matched(ctx) => Some(ctx),
            MatchResult::NoMatch => None,
        }
    }
}

/// Split `path` into non-empty segments and an optional raw query string.
pub fn split_path(path: &str) -> (Vec<&str>, Option<&str>) {
    let path = path.split_once('#').map_or(path, |(p, _)| p);
    let (path, query) = match path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path, None),
    };
    let segments = path.split('/').filter(|s| !s.is_empty()).collect();
    (segments, query)
}

impl RouteTree {
    /// Match `path` against this tree.
    pub fn match_path(&self, path: &str) -> MatchResult {
        let (segments, query) = split_path(path);
        let mut chain = Vec::new();

        if !self.enter(NodeId::ROOT, &segments, &mut chain) {
            return MatchResult::NoMatch;
        }

        let params: Params = chain
            .iter()
            .flat_map(|m: &MatchedNode| m.params.iter().cloned())
            .collect();
        let query: BTreeMap<String, String> = query
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default();

        MatchResult::Matched(MatchContext {
            path: path.to_string(),
            chain,
            params,
            query,
        })
    }

    /// Try `id`'s pattern against `rest`, then descend.
    fn enter(&self, id: NodeId, rest: &[&str], chain: &mut Vec<MatchedNode>) -> bool {
        let node = &self[id];
        for (consumed, bound) in node.pattern().consumptions(rest) {
            chain.push(MatchedNode {
                node: id,
                segments: rest[..consumed].iter().map(|s| s.to_string()).collect(),
                params: bound
                    .into_iter()
                    .map(|(name, value)| (name, value.to_string()))
                    .collect(),
            });
            if self.descend(id, &rest[consumed..], chain) {
                return true;
            }
            chain.pop();
        }
        false
    }

    fn descend(&self, id: NodeId, rest: &[&str], chain: &mut Vec<MatchedNode>) -> bool {
        for &child in self[id].children() {
            if self.enter(child, rest, chain) {
                return true;
            }
        }
        rest.is_empty()
    }
}
