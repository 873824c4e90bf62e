//! Storage key generation.
//!
//! All randomly named objects go through this module so every backend uses
//! the same key layout. Names are 32 bytes from a CSPRNG rendered as
//! unpadded URL-safe base64 (43 characters), which keeps keys safe to embed
//! in URLs without escaping and makes collisions statistically impossible.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use reelvault_core::Orientation;

const RANDOM_NAME_BYTES: usize = 32;

/// Random base name without prefix or extension.
fn random_name() -> String {
    let mut raw = [0u8; RANDOM_NAME_BYTES];
    rand::rng().fill_bytes(&mut raw);
    URL_SAFE_NO_PAD.encode(raw)
}

/// Generate a storage key for processed media, e.g. `landscape/{name}.mp4`.
///
/// `extension` must include the leading dot.
pub fn generate_media_key(orientation: Orientation, extension: &str) -> String {
    format!("{}{}{}", orientation.key_prefix(), random_name(), extension)
}

/// Generate a random asset filename, e.g. `{name}.png`. Used for thumbnails
/// written to the static assets directory.
pub fn generate_asset_name(extension: &str) -> String {
    format!("{}{}", random_name(), extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_media_key_shape() {
        let key = generate_media_key(Orientation::Landscape, ".mp4");
        assert!(key.starts_with("landscape/"));
        assert!(key.ends_with(".mp4"));

        // 32 bytes encode to 43 base64 characters without padding
        let name = &key["landscape/".len()..key.len() - ".mp4".len()];
        assert_eq!(name.len(), 43);
        assert!(name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_media_key_prefix_follows_orientation() {
        assert!(generate_media_key(Orientation::Portrait, ".mp4").starts_with("portrait/"));
        assert!(generate_media_key(Orientation::Other, ".mp4").starts_with("other/"));
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<String> = (0..100)
            .map(|_| generate_media_key(Orientation::Landscape, ".mp4"))
            .collect();
        assert_eq!(keys.len(), 100);
    }

    #[test]
    fn test_asset_name_has_no_prefix() {
        let name = generate_asset_name(".png");
        assert!(!name.contains('/'));
        assert!(name.ends_with(".png"));
    }
}
