use std::fmt;

/// Separator between scope and name inside a key. A tab can never legally
/// appear in a routing-scope identifier or a DNS name, so the derivation is
/// collision-free.
const SEPARATOR: char = '\t';

/// Normalize an owner name for lookup: lowercase, trailing dot.
///
/// DNS names compare case-insensitively and the wire codec hands us fully
/// qualified names; rows and query names must land on the same form.
pub fn normalize_name(name: &str) -> String {
    let trimmed = name.trim();
    let mut normalized = trimmed.to_ascii_lowercase();
    if !normalized.ends_with('.') {
        normalized.push('.');
    }
    normalized
}

/// Cache lookup key derived from (routing scope, owner name).
///
/// The key deliberately omits the query type: lookups resolve by name and
/// filter by each entry's own type tag, so invalidation messages and queries
/// always agree on the key for a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(scope: &str, name: &str) -> Self {
        let mut key = String::with_capacity(scope.len() + name.len() + 2);
        key.push_str(scope.trim());
        key.push(SEPARATOR);
        key.push_str(&normalize_name(name));
        Self(key)
    }

    pub fn scope(&self) -> &str {
        self.0.split(SEPARATOR).next().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        match self.0.split_once(SEPARATOR) {
            Some((_, name)) => name,
            None => "",
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scope(), self.name())
    }
}
