//! Slug ids — the 22-character URL-safe task identifiers the queue expects.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use uuid::Uuid;

/// Generate a new slug id: a v4 UUID, base64url-encoded without padding.
///
/// The top bit of the first byte is cleared so the slug never starts
/// with `-` (shell- and URL-friendly).
pub fn slug_id() -> String {
    let mut bytes = *Uuid::new_v4().as_bytes();
    bytes[0] &= 0x7f;
    URL_SAFE_NO_PAD.encode(bytes)
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_22_chars() {
        assert_eq!(slug_id().len(), 22);
    }

    #[test]
    fn slug_uses_url_safe_alphabet() {
        let slug = slug_id();
        assert!(
            slug.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "unexpected character in slug: {slug}"
        );
        assert!(!slug.contains('='));
    }

    #[test]
    fn slug_never_starts_with_dash() {
        for _ in 0..256 {
            let slug = slug_id();
            assert!(!slug.starts_with('-'), "slug started with dash: {slug}");
        }
    }

    #[test]
    fn slug_decodes_to_16_bytes() {
        let bytes = URL_SAFE_NO_PAD.decode(slug_id()).unwrap();
        assert_eq!(bytes.len(), 16);
    }

    #[test]
    fn slugs_are_distinct() {
        assert_ne!(slug_id(), slug_id());
    }
}
