//! Back/forward history of committed locations.
//!
//! # Design Decisions
//! - Only committed navigations (Loaded or Failed) move history
//! - Stacks are bounded; the oldest entry is dropped past `limit`
//! - Navigating to the current location again does not add an entry

use std::collections::VecDeque;

/// How a navigation should affect history once it commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// New entry; clears the forward stack.
    Push,
    /// Replace the current entry.
    Replace,
    Back,
    Forward,
}

#[derive(Debug)]
pub struct History {
    back: VecDeque<String>,
    forward: VecDeque<String>,
    current: Option<String>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            back: VecDeque::new(),
            forward: VecDeque::new(),
            current: None,
            limit: limit.max(1),
        }
    }

    /// Path of the last committed navigation.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn peek_back(&self) -> Option<&str> {
        self.back.back().map(String::as_str)
    }

    pub fn peek_forward(&self) -> Option<&str> {
        self.forward.back().map(String::as_str)
    }

    pub fn back_len(&self) -> usize {
        self.back.len()
    }

    pub fn forward_len(&self) -> usize {
        self.forward.len()
    }

    /// Apply a committed navigation to `path`.
    pub fn record(&mut self, path: &str, kind: NavigationKind) {
        match kind {
            NavigationKind::Push => self.push(path),
            NavigationKind::Replace => self.current = Some(path.to_string()),
            NavigationKind::Back => {
                if self.peek_back() == Some(path) {
                    self.back.pop_back();
                    if let Some(prev) = self.current.replace(path.to_string()) {
                        push_bounded(&mut self.forward, prev, self.limit);
                    }
                } else {
                    self.push(path);
                }
            }
            NavigationKind::Forward => {
                if self.peek_forward() == Some(path) {
                    self.forward.pop_back();
                    if let Some(prev) = self.current.replace(path.to_string()) {
                        push_bounded(&mut self.back, prev, self.limit);
                    }
                } else {
                    self.push(path);
                }
            }
        }
    }

    fn push(&mut self, path: &str) {
        if self.current.as_deref() == Some(path) {
            return;
        }
        if let Some(prev) = self.current.replace(path.to_string()) {
            push_bounded(&mut self.back, prev, self.limit);
        }
        self.forward.clear();
    }
}

fn push_bounded(stack: &mut VecDeque<String>, path: String, limit: usize) {
    stack.push_back(path);
    while stack.len() > limit {
        stack.pop_front();
    }
}
