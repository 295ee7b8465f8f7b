//! Partner exclusion by name

use std::collections::BTreeSet;

/// Partners excluded when nothing else is configured
pub const DEFAULT_EXCLUDED: &str = "Media.Net";

/// Case-insensitive set of partner names that are never tuned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl ExclusionSet {
    /// Parse a comma-separated list; blank entries are ignored
    pub fn from_csv(list: &str) -> Self {
        Self {
            names: list
                .split(',')
                .map(normalize)
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.names.contains(&normalize(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::from_csv(DEFAULT_EXCLUDED)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
