/// Lowercases `raw` and replaces every character outside `[a-z0-9-]` with `-`.
///
/// Applied as the operator types, so "Ann & Ben" becomes "ann---ben"; runs of
/// dashes are kept rather than collapsed.
pub fn normalize_slug(raw: &str) -> String {
    raw.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' { c } else { '-' })
        .collect()
}
