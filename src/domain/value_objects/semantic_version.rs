//! Semantic version value object (major.minor.patch)

use std::fmt;

use serde::{Serialize, Serializer};

/// Runtime version triple, ordered lexicographically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SemanticVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SemanticVersion {
    /// Create a version
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse `major[.minor[.patch]]`
    ///
    /// Missing trailing components default to 0 and a component is read by its
    /// leading digits, so `3.22.0-0.1.pre` parses as 3.22.0. The major
    /// component is required.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.trim().split('.');
        let major = leading_number(parts.next()?)?;
        let minor = parts.next().and_then(leading_number).unwrap_or(0);
        let patch = parts.next().and_then(leading_number).unwrap_or(0);
        Some(Self::new(major, minor, patch))
    }

    /// Parse the first version out of a constraint such as `>=3.0.0 <4.0.0`
    ///
    /// Comparison and caret operators are stripped and the first
    /// whitespace-separated token is parsed.
    pub fn from_constraint(constraint: &str) -> Option<Self> {
        let stripped = constraint
            .replace(">=", "")
            .replace("<=", "")
            .replace(['^', '>', '<', '=', '~', '\'', '"'], "");
        let first = stripped.split_whitespace().next()?;
        Self::parse(first)
    }
}

fn leading_number(part: &str) -> Option<u32> {
    let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
