use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-]+").expect("valid regex"));
static REPEATED_HYPHENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("valid regex"));

/// URL-safe form of a title: lower-cased, whitespace runs become `-`, anything
/// outside `[a-z0-9_-]` is dropped, hyphen runs collapse, edge hyphens are trimmed.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let hyphenated = WHITESPACE.replace_all(&lowered, "-");
    let stripped = DISALLOWED.replace_all(&hyphenated, "");
    let collapsed = REPEATED_HYPHENS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// Slug stored on a new post: the title slug plus the creation instant in
/// Unix milliseconds.
pub fn post_slug(title: &str, created_at_millis: i64) -> String {
    let base = slugify(title);
    if base.is_empty() {
        created_at_millis.to_string()
    } else {
        format!("{}-{}", base, created_at_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Contract Law Basics"), "contract-law-basics");
        assert_eq!(slugify("  Tenant\tRights \n 101 "), "tenant-rights-101");
    }

    #[test]
    fn strips_punctuation_and_collapses_hyphens() {
        assert_eq!(slugify("What's New in GST?"), "whats-new-in-gst");
        assert_eq!(slugify("Wills -- & -- Probate"), "wills-probate");
        assert_eq!(slugify("--Section_138--"), "section_138");
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        assert_eq!(slugify("Café Déjà Vu"), "caf-dj-vu");
    }

    #[test]
    fn post_slug_appends_timestamp() {
        assert_eq!(
            post_slug("Contract Law Basics", 1_700_000_000_000),
            "contract-law-basics-1700000000000"
        );
        assert_ne!(post_slug("Same", 1), post_slug("Same", 2));
    }

    #[test]
    fn title_without_slug_characters_uses_timestamp_alone() {
        assert_eq!(post_slug("!!!", 42), "42");
    }

    #[test]
    fn slugify_is_stable() {
        let once = slugify("Property Disputes: A Primer");
        assert_eq!(slugify(&once), once);
    }
}
