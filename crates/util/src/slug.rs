//! Slugification of display names into URL-safe tokens.
//!
//! The same transform is used when generating outbound links and when
//! resolving inbound ones, so `name -> slug -> index` recovers the original
//! use case whenever two names in a section do not collapse to the same slug.

use once_cell::sync::Lazy;
use regex::Regex;

/// Anything outside ASCII word characters, whitespace and hyphens.
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").expect("valid slug pattern"));
/// Runs of whitespace, underscores and hyphens.
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_-]+").expect("valid separator pattern"));

/// Normalizes a display name into a lowercase, hyphen-delimited token.
///
/// Steps, in order: lower-case, trim, strip disallowed characters, collapse
/// separator runs into a single `-`, trim leading/trailing `-`.
///
/// # Example
/// ```rust
/// use showroom_util::slugify;
///
/// assert_eq!(slugify("  Multi Line  "), "multi-line");
/// assert_eq!(slugify("Right (Icon) _Style_"), "right-icon-style");
/// ```
pub fn slugify(input: &str) -> String {
    let lowered = input.to_lowercase();
    let stripped = DISALLOWED.replace_all(lowered.trim(), "");
    let collapsed = SEPARATORS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}
