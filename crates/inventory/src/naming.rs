//! Product name deduplication.
//!
//! A colliding name gets the first free `" (n)"` suffix, the way a file manager
//! names copies: `Widget`, `Widget (1)`, `Widget (2)`, ...
//!
//! Comparison is exact and case-sensitive. Callers pass an already-trimmed
//! candidate; internal whitespace is left alone.

use std::collections::HashSet;
use std::num::NonZeroU32;

/// How far the suffix search may go before giving up.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SuffixLimit {
    /// Keep counting until a free name is found. Always terminates: a finite
    /// listing can only block finitely many suffixes.
    #[default]
    Unbounded,
    /// Try suffixes `(1)` through `(n)` only.
    AtMost(NonZeroU32),
}

impl SuffixLimit {
    fn allows(self, n: u64) -> bool {
        match self {
            SuffixLimit::Unbounded => true,
            SuffixLimit::AtMost(max) => n <= u64::from(max.get()),
        }
    }
}

/// Computes a name distinct from every existing product name.
#[derive(Debug, Copy, Clone, Default)]
pub struct NameResolver {
    limit: SuffixLimit,
}

impl NameResolver {
    pub fn new(limit: SuffixLimit) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> SuffixLimit {
        self.limit
    }

    /// Resolve `candidate` against `existing` names.
    ///
    /// Returns `None` only when a bounded limit is configured and every suffix
    /// within it is taken.
    pub fn resolve<'a, I>(&self, candidate: &str, existing: I) -> Option<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let taken: HashSet<&str> = existing.into_iter().collect();
        if !taken.contains(candidate) {
            return Some(candidate.to_string());
        }

        let mut n: u64 = 1;
        while self.limit.allows(n) {
            let suffixed = suffixed_name(candidate, n);
            if !taken.contains(suffixed.as_str()) {
                tracing::debug!(candidate, resolved = %suffixed, "product name deduplicated");
                return Some(suffixed);
            }
            n += 1;
        }
        None
    }
}

fn suffixed_name(base: &str, n: u64) -> String {
    format!("{base} ({n})")
}
