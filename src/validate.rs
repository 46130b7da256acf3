//! Input normalization for add-on names and table lookups.
//!
//! Add-on names resolve in three tiers: exact wire name, synonym
//! lookup, then an error carrying the closest suggestion. Table names
//! typed on the command line get "did you mean" candidates.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

// ── Valid value sets ─────────────────────────────────────────

/// Wire names of every known add-on, lowercased.
pub static VALID_ADDONS: LazyLock<HashSet<&str>> =
    LazyLock::new(|| ["wc"].into_iter().collect());

// ── Synonym maps ─────────────────────────────────────────────

pub static ADDON_SYNONYMS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("woocommerce", "wc"),
        ("woo", "wc"),
        ("woo-commerce", "wc"),
        ("woo_commerce", "wc"),
    ]
    .into_iter()
    .collect()
});

/// Normalize an add-on name via exact match or synonym lookup.
///
/// Returns the lowercased canonical wire name, or the original input
/// with an optional suggestion.
pub fn normalize_addon(input: &str) -> Result<String, (String, Option<String>)> {
    let lower = input.trim().to_lowercase();

    // Tier 1: exact match
    if VALID_ADDONS.contains(lower.as_str()) {
        return Ok(lower);
    }

    // Tier 2: synonym lookup
    if let Some(&canonical) = ADDON_SYNONYMS.get(lower.as_str()) {
        return Ok(canonical.to_string());
    }

    // Tier 3: closest suggestion
    let suggestion = find_closest_match(&lower, &VALID_ADDONS, &ADDON_SYNONYMS);
    Err((input.to_string(), suggestion))
}

/// Find the closest matching value across valid set and synonyms.
fn find_closest_match(
    input: &str,
    valid: &HashSet<&str>,
    synonyms: &HashMap<&str, &str>,
) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;

    for &v in valid.iter().chain(synonyms.keys()) {
        let dist = levenshtein_distance(input, v);
        if dist <= 3 && best.is_none_or(|(_, d)| dist < d) {
            // Synonyms report the name they map to
            let target = synonyms.get(v).copied().unwrap_or(v);
            best = Some((target, dist));
        }
    }

    best.map(|(v, _)| v.to_uppercase())
}

// ── Levenshtein distance ─────────────────────────────────────

/// Compute the Levenshtein edit distance between two strings.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for i in 1..=a_len {
        curr[0] = i;
        for j in 1..=b_len {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Find table names similar to the searched one.
///
/// Comparison is case-insensitive. Returns up to `max` names with edit
/// distance ≤ 3, sorted by distance then alphabetically.
#[must_use]
pub fn find_similar_names(searched: &str, existing: &[String], max: usize) -> Vec<String> {
    let searched = searched.to_lowercase();
    let mut candidates: Vec<(usize, &str)> = existing
        .iter()
        .map(|name| (levenshtein_distance(&searched, &name.to_lowercase()), name.as_str()))
        .filter(|(dist, _)| *dist <= 3)
        .collect();

    candidates.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));

    candidates
        .into_iter()
        .take(max)
        .map(|(_, name)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_addon() {
        assert_eq!(normalize_addon("WC"), Ok("wc".to_string()));
        assert_eq!(normalize_addon("wc"), Ok("wc".to_string()));
        assert_eq!(normalize_addon("WooCommerce"), Ok("wc".to_string()));
        assert_eq!(normalize_addon(" woo "), Ok("wc".to_string()));
    }

    #[test]
    fn test_normalize_addon_suggests_closest() {
        let (input, suggestion) = normalize_addon("wooo").unwrap_err();
        assert_eq!(input, "wooo");
        assert_eq!(suggestion.as_deref(), Some("WC"));

        let (_, suggestion) = normalize_addon("jetpack-backup").unwrap_err();
        assert!(suggestion.is_none());
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", "abd"), 1);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_find_similar_names() {
        let tables = vec![
            "SiteModel".to_string(),
            "PostModel".to_string(),
            "WCOrderModel".to_string(),
        ];
        let result = find_similar_names("sitemodle", &tables, 3);
        assert_eq!(result.first().map(String::as_str), Some("SiteModel"));
        assert!(!result.contains(&"WCOrderModel".to_string()));
    }
}
