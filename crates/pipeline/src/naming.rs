//! Slug derivation for provider job keys and workflow file names.

/// Derive the identifier used as a job key and file name stem.
///
/// The name is lowercased and every run of whitespace becomes a single `-`,
/// including runs at either end (`" Build"` gives `"-build"`). Distinct names
/// may still collapse to the same slug (`"Build"` and `"build"`); callers
/// decide how to handle that.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }
    slug
}
