//! Request Signing
//!
//! Every request carries a `Hash` field the service recomputes server-side.

use sha2::{Digest, Sha256};

/// Compute the verification hash for a request.
///
/// The hashed text is `SomeSalt+{api_key}+{private_key}++{parameter}+ended`,
/// with an absent parameter rendered as the empty string. The result is the
/// lowercase hex SHA-256 digest.
pub fn verification_hash(api_key: &str, private_key: &str, parameter: Option<&str>) -> String {
    let data = format!(
        "SomeSalt+{}+{}++{}+ended",
        api_key,
        private_key,
        parameter.unwrap_or_default()
    );

    hex::encode(Sha256::digest(data.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const API_KEY: &str = "test-api-key";
    const PRIVATE_KEY: &str = "test-private-key";

    #[test]
    fn test_hash_with_parameter() {
        assert_eq!(
            verification_hash(API_KEY, PRIVATE_KEY, Some("35757442")),
            "2a4929cde76b6b5a795c526562646c76c61e566ff466c88312acb546c831097e"
        );
        assert_eq!(
            verification_hash(API_KEY, PRIVATE_KEY, Some("volkswagen")),
            "dfacba21db45e119798bfd0b746c9f3dbef369929ecdb3a0b967aaa6f0e5eb67"
        );
    }

    #[test]
    fn test_hash_without_parameter() {
        let expected = "08a1b0310cb7c27d93ecc95faa8806b7af9518c75285ab991ac37e3b9c774a51";
        assert_eq!(verification_hash(API_KEY, PRIVATE_KEY, None), expected);
        // An empty parameter renders exactly like an absent one.
        assert_eq!(verification_hash(API_KEY, PRIVATE_KEY, Some("")), expected);
    }

    #[test]
    fn test_hash_is_deterministic() {
        let a = verification_hash(API_KEY, PRIVATE_KEY, Some("diff_2024-01-15.zip"));
        let b = verification_hash(API_KEY, PRIVATE_KEY, Some("diff_2024-01-15.zip"));
        assert_eq!(a, b);
        assert_eq!(
            a,
            "31bfc2cc402a939f6d8a9745aaf2331bf6f88ad92e62bf229a2b3bd2bea5e5c5"
        );
        assert_ne!(a, verification_hash(API_KEY, "other-key", Some("diff_2024-01-15.zip")));
    }
}
