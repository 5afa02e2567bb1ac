use quarry_core::{Error, Result};

/// Checks that `name` is a plain SQL identifier, optionally qualified by a
/// single `alias.` prefix.
///
/// Table and column names are spliced into statement text, so anything that
/// is not `[A-Za-z_][A-Za-z0-9_]*` is rejected.
pub fn validate_ident(name: &str) -> Result<()> {
    let mut parts = name.split('.');
    let valid = match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, _) => is_plain(name),
        (Some(qualifier), Some(name), None) => is_plain(qualifier) && is_plain(name),
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::invalid_argument(format!(
            "`{name}` is not a valid identifier"
        )))
    }
}

fn is_plain(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
