#![forbid(unsafe_code)]

//! Ordered, duplicate-free class token lists.
//!
//! A [`ClassList`] behaves like a DOM `classList`: tokens keep insertion
//! order, adding an existing token is a no-op, and the list renders as a
//! single space-separated string. Tokens are opaque; nothing here interprets
//! them.

use std::fmt;

/// An ordered set of presentation class tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Parse a whitespace-separated class string.
    pub fn parse(classes: &str) -> Self {
        let mut list = Self::new();
        list.add_all(classes.split_whitespace());
        list
    }

    /// Add a token. Returns `false` if it was already present or blank.
    pub fn add(&mut self, token: &str) -> bool {
        let token = token.trim();
        if token.is_empty() || self.contains(token) {
            return false;
        }
        self.tokens.push(token.to_owned());
        true
    }

    /// Add every token in `tokens`.
    pub fn add_all<'a>(&mut self, tokens: impl IntoIterator<Item = &'a str>) {
        for token in tokens {
            self.add(token);
        }
    }

    /// Remove a token. Returns `false` if it was absent.
    pub fn remove(&mut self, token: &str) -> bool {
        match self.tokens.iter().position(|t| t == token) {
            Some(idx) => {
                self.tokens.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove every token in `tokens`.
    pub fn remove_all<'a>(&mut self, tokens: impl IntoIterator<Item = &'a str>) {
        for token in tokens {
            self.remove(token);
        }
    }

    /// Add `token` when `on`, remove it otherwise.
    pub fn set(&mut self, token: &str, on: bool) {
        if on {
            self.add(token);
        } else {
            self.remove(token);
        }
    }

    /// Check membership.
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Check that every token is present.
    pub fn contains_all<'a>(&self, tokens: impl IntoIterator<Item = &'a str>) -> bool {
        tokens.into_iter().all(|t| self.contains(t))
    }

    /// Check that no token is present.
    pub fn contains_none<'a>(&self, tokens: impl IntoIterator<Item = &'a str>) -> bool {
        tokens.into_iter().all(|t| !self.contains(t))
    }

    /// Iterate tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

impl<'a> FromIterator<&'a str> for ClassList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut list = Self::new();
        list.add_all(iter);
        list
    }
}

impl<'a> Extend<&'a str> for ClassList {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}
