//! Anchor allocation for the data dictionary.

use ahash::{AHashMap, AHashSet};
use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_]+").unwrap());

/// Lowercase slug: runs of anything but `[a-z0-9_]` collapse to `-`
pub fn slugify(s: &str) -> String {
    let lower = s.to_lowercase();
    let slug = NON_SLUG.replace_all(&lower, "-");
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "section".to_string()
    } else {
        slug.to_string()
    }
}

/// Hands out unique anchors; a taken slug gets `-1`, `-2`, ... appended
#[derive(Debug, Default)]
pub struct AnchorSet {
    taken: AHashSet<String>,
    assigned: AHashMap<String, String>,
}

impl AnchorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an anchor for `key`, derived from `wanted`.
    ///
    /// Calling again with the same key returns the anchor already assigned.
    pub fn assign(&mut self, key: &str, wanted: &str) -> String {
        if let Some(existing) = self.assigned.get(key) {
            return existing.clone();
        }

        let base = slugify(wanted);
        let mut anchor = base.clone();
        let mut n = 1;
        while self.taken.contains(&anchor) {
            anchor = format!("{}-{}", base, n);
            n += 1;
        }

        self.taken.insert(anchor.clone());
        self.assigned.insert(key.to_string(), anchor.clone());
        anchor
    }

    /// Anchor previously assigned to `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.assigned.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("OrderItem"), "orderitem");
        assert_eq!(slugify("sales Order"), "sales-order");
        assert_eq!(slugify("--"), "section");
    }

    #[test]
    fn test_collisions_get_suffixes() {
        let mut anchors = AnchorSet::new();
        assert_eq!(anchors.assign("app:x", "app-x"), "app-x");
        assert_eq!(anchors.assign("model:app.X", "app-x"), "app-x-1");
        assert_eq!(anchors.assign("model:other.X", "app-x"), "app-x-2");
    }

    #[test]
    fn test_assign_is_stable_per_key() {
        let mut anchors = AnchorSet::new();
        let first = anchors.assign("model:a.M", "m");
        let again = anchors.assign("model:a.M", "different");
        assert_eq!(first, again);
        assert_eq!(anchors.get("model:a.M"), Some("m"));
        assert_eq!(anchors.get("model:b.M"), None);
    }
}
