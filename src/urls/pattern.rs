// Regex path patterns with named captures

use std::collections::BTreeMap;
use std::fmt;

use regex::{Captures as RegexCaptures, Regex};

use super::error::RouteError;

/// Named values extracted from a request path
pub type Captures = BTreeMap<String, String>;

/// A compiled pattern over a request path (without its leading slash).
///
/// Patterns are searched, not implicitly anchored: `^` and `$` mean what they
/// mean in the regex. Whether the match has to consume the whole path is
/// decided by the caller, see [`RoutePattern::match_full`] and
/// [`RoutePattern::match_prefix`].
#[derive(Clone)]
pub struct RoutePattern {
    regex: Regex,
}

impl fmt::Debug for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RoutePattern").field(&self.regex.as_str()).finish()
    }
}

impl RoutePattern {
    /// Compiles a pattern, failing on an invalid regex
    pub fn new(pattern: &str) -> Result<Self, RouteError> {
        let regex: Regex = Regex::new(pattern).map_err(|source: regex::Error| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self { regex })
    }

    /// The source text of the pattern
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Matches the start of `path` and returns the captures plus the unmatched rest
    pub fn match_prefix<'p>(&self, path: &'p str) -> Option<(Captures, &'p str)> {
        let caps: RegexCaptures<'p> = self.regex.captures(path)?;
        let end: usize = caps.get(0)?.end();

        Some((self.collect(&caps), &path[end..]))
    }

    /// Matches only when nothing of `path` is left over
    pub fn match_full(&self, path: &str) -> Option<Captures> {
        match self.match_prefix(path)? {
            (captures, "") => Some(captures),
            _ => None,
        }
    }

    fn collect(&self, caps: &RegexCaptures<'_>) -> Captures {
        self.regex
            .capture_names()
            .flatten()
            .filter_map(|name: &str| caps.name(name).map(|m| (name.to_string(), m.as_str().to_string())))
            .collect()
    }
}
