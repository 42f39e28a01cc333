use data_encoding::BASE32_NOPAD;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generates an opaque bearer session token: 20 random bytes, BASE32.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; 20];
    rand::thread_rng().fill_bytes(&mut bytes);

    BASE32_NOPAD.encode(&bytes).to_lowercase()
}

/// Generates a password-reset token: 32 random bytes, hex.
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);

    hex::encode(bytes)
}

/// SHA-256 digest of a token, hex-encoded. Only digests are persisted.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();

    hasher.update(token);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_tokens_are_distinct() {
        assert_ne!(generate_session_token(), generate_session_token());
    }

    #[test]
    fn test_session_token_is_lowercase_base32() {
        let token = generate_session_token();
        assert_eq!(token.len(), 32);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_reset_token_is_64_hex_chars() {
        let token = generate_reset_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_token_hash_is_stable() {
        assert_eq!(hash_token("abc"), hash_token("abc"));
        assert_ne!(hash_token("abc"), hash_token("abd"));
    }

    #[test]
    fn test_token_hash_is_sha256_hex() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
