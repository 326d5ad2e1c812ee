//! Service-level API key matching.
//!
//! The key is a shared secret compared as-is (no hashing). Comparison is constant time
//! over the key bytes. With no key configured nothing ever matches.

use subtle::ConstantTimeEq;

#[derive(Clone, Default)]
pub struct ServiceKeyMatcher {
    key: Option<String>,
}

impl std::fmt::Debug for ServiceKeyMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceKeyMatcher")
            .field("configured", &self.is_configured())
            .finish()
    }
}

impl ServiceKeyMatcher {
    pub fn new(key: Option<&str>) -> Self {
        Self {
            key: key.filter(|k| !k.is_empty()).map(str::to_string),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.key.is_some()
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.key
            .as_deref()
            .is_some_and(|key| constant_time_eq(key, candidate))
    }
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
