use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureKeyError {
    #[error("texture handle must not be empty")]
    Empty,
    #[error("texture handle must not start with '/'")]
    LeadingSlash,
    #[error("texture handle must not contain '\\\\'")]
    Backslash,
    #[error("texture handle must not contain '..'")]
    ParentTraversal,
    #[error("texture handle contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

pub(crate) fn validate_texture_handle(handle: &str) -> Result<(), TextureKeyError> {
    if handle.is_empty() {
        return Err(TextureKeyError::Empty);
    }
    if handle.starts_with('/') {
        return Err(TextureKeyError::LeadingSlash);
    }
    if handle.contains('\\') {
        return Err(TextureKeyError::Backslash);
    }
    if handle.contains("..") {
        return Err(TextureKeyError::ParentTraversal);
    }
    for ch in handle.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '/' | '-') {
            continue;
        }
        return Err(TextureKeyError::InvalidCharacter { character: ch });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_texture_handle;

    #[test]
    fn accepts_valid_handles() {
        for handle in ["wall", "entity/coin_1", "a-b/c_d"] {
            assert!(validate_texture_handle(handle).is_ok(), "handle={handle}");
        }
    }

    #[test]
    fn rejects_invalid_handles() {
        for handle in ["", "/a", "..", "a/../b", r"a\b", "A", "a.png"] {
            assert!(validate_texture_handle(handle).is_err(), "handle={handle}");
        }
    }
}
