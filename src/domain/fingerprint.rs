// Short SHA-256 fingerprints used for tamper evidence
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest.
pub const FINGERPRINT_LEN: usize = 16;

/// Hash the canonical JSON form of `value`.
///
/// The value goes through `serde_json::Value` first, whose object map keeps
/// keys sorted, so field order in the source type does not matter.
pub fn fingerprint<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let canonical = serde_json::to_value(value)?;
    let bytes = serde_json::to_vec(&canonical)?;
    Ok(digest_hex(&bytes))
}

fn digest_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let mut hex = hex::encode(hasher.finalize());
    hex.truncate(FINGERPRINT_LEN);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fingerprint_length() {
        let hash = fingerprint(&json!({"a": 1})).unwrap();
        assert_eq!(hash.len(), FINGERPRINT_LEN);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_ignores_key_order() {
        #[derive(Serialize)]
        struct Ab {
            a: i32,
            b: i32,
        }
        #[derive(Serialize)]
        struct Ba {
            b: i32,
            a: i32,
        }

        let left = fingerprint(&Ab { a: 1, b: 2 }).unwrap();
        let right = fingerprint(&Ba { b: 2, a: 1 }).unwrap();
        assert_eq!(left, right);
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let a = fingerprint(&json!({"accepted": true, "ref": "DEMO"})).unwrap();
        let b = fingerprint(&json!({"accepted": false, "ref": "DEMO"})).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_known_digest_prefix() {
        // sha256("abc")
        assert_eq!(digest_hex(b"abc"), "ba7816bf8f01cfea");
    }
}
