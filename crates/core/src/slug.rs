//! Slug derivation for `formattedCommonName`.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Derives the unique slug stored as `formattedCommonName`.
///
/// NFKD-decomposes the name, drops combining marks, lowercases, and collapses
/// every run of non-alphanumeric characters into one `-`. Leading and trailing
/// separators are removed, so the result may be empty.
pub fn format_common_name(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for c in name.nfkd().filter(|c| !is_combining_mark(*c)) {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
