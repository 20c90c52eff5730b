//! Small string helpers shared by the feed parsers and oracles.

/// Lowercases `value` and drops every non-alphanumeric character.
///
/// Feed names ("Stealth Rock", "Flash Fire") and reference-data ids
/// ("stealthrock", "flashfire") compare equal after this transform.
pub fn to_id(value: &str) -> String {
    value
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Strips the position letter from an active-slot identifier.
///
/// Active pointers may carry `"p1a: Pikachu"` while roster entries use
/// `"p1: Pikachu"`.
pub fn normalize_ident(ident: &str) -> String {
    match ident.split_once(':') {
        Some((prefix, name))
            if prefix.len() > 2 && prefix.starts_with('p') && prefix.is_char_boundary(2) =>
        {
            format!("{}:{}", &prefix[..2], name)
        }
        _ => ident.to_string(),
    }
}

/// Returns the name portion of an identifier (`"p1: Pikachu"` -> `"Pikachu"`).
pub fn ident_name(ident: &str) -> &str {
    ident
        .split_once(':')
        .map(|(_, name)| name.trim())
        .unwrap_or(ident)
}
