//! Keystream XOR codec for stored secrets.
//!
//! Layout of the decoded blob (the stored value is its base64 text):
//!   [ 8-byte random prefix | plaintext XOR repeated key ]
//!
//! The prefix is stored but never mixed into the keystream, so the body
//! depends only on `(plaintext, key)`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

use super::keys::DerivedKey;

/// Size of the random prefix in bytes.
pub const PREFIX_LEN: usize = 8;

/// Why a stored secret could not be turned back into text.
///
/// `NotText` is what a wrong passphrase usually produces, but a wrong key
/// can just as well yield valid (garbled) text, so none of these is proof
/// of anything in particular.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecryptionFailure {
    #[error("stored secret is not valid base64")]
    Malformed,

    #[error("stored secret is shorter than its 8-byte prefix")]
    Truncated,

    #[error("decrypted secret is not valid UTF-8 — wrong password or corrupted data")]
    NotText,
}

/// Encode `plaintext` under `key` and return the base64 text to store.
pub fn encode(plaintext: &[u8], key: &DerivedKey) -> String {
    let prefix: [u8; PREFIX_LEN] = rand::random();

    let mut blob = Vec::with_capacity(PREFIX_LEN + plaintext.len());
    blob.extend_from_slice(&prefix);
    blob.extend(xor_with_keystream(plaintext, key));

    BASE64.encode(blob)
}

/// Decode a blob produced by [`encode`].
///
/// Never panics and never returns a storage error: every failure mode
/// collapses into a [`DecryptionFailure`].
pub fn decode(blob: &str, key: &DerivedKey) -> Result<String, DecryptionFailure> {
    let bytes = BASE64
        .decode(blob.trim())
        .map_err(|_| DecryptionFailure::Malformed)?;

    if bytes.len() < PREFIX_LEN {
        return Err(DecryptionFailure::Truncated);
    }

    // The prefix does not participate in the transform.
    let body = &bytes[PREFIX_LEN..];
    let plaintext: Vec<u8> = xor_with_keystream(body, key).collect();

    String::from_utf8(plaintext).map_err(|_| DecryptionFailure::NotText)
}

fn xor_with_keystream<'a>(data: &'a [u8], key: &'a DerivedKey) -> impl Iterator<Item = u8> + 'a {
    data.iter()
        .zip(key.keystream(data.len()))
        .map(|(byte, k)| byte ^ k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KEY_LEN;

    fn key(fill: u8) -> DerivedKey {
        DerivedKey::from_bytes([fill; KEY_LEN])
    }

    #[test]
    fn encode_decode_roundtrip() {
        let k = key(0x5A);
        let blob = encode(b"Secr3t!", &k);
        assert_eq!(decode(&blob, &k).unwrap(), "Secr3t!");
    }

    #[test]
    fn roundtrip_longer_than_key() {
        let k = key(0x11);
        let long = "p".repeat(KEY_LEN * 3 + 5);
        let blob = encode(long.as_bytes(), &k);
        assert_eq!(decode(&blob, &k).unwrap(), long);
    }

    #[test]
    fn roundtrip_unicode() {
        let k = key(0x42);
        let secret = "密码-пароль-🔑";
        let blob = encode(secret.as_bytes(), &k);
        assert_eq!(decode(&blob, &k).unwrap(), secret);
    }

    #[test]
    fn empty_plaintext_is_prefix_only() {
        let k = key(0x01);
        let blob = encode(b"", &k);
        assert_eq!(BASE64.decode(&blob).unwrap().len(), PREFIX_LEN);
        assert_eq!(decode(&blob, &k).unwrap(), "");
    }

    #[test]
    fn two_encodings_differ_only_in_prefix() {
        let k = key(0x33);
        let a = encode(b"hello", &k);
        let b = encode(b"hello", &k);
        assert_ne!(a, b, "random prefix must make blobs differ");

        let raw_a = BASE64.decode(&a).unwrap();
        let raw_b = BASE64.decode(&b).unwrap();
        assert_eq!(raw_a[PREFIX_LEN..], raw_b[PREFIX_LEN..]);

        assert_eq!(decode(&a, &k).unwrap(), "hello");
        assert_eq!(decode(&b, &k).unwrap(), "hello");
    }

    #[test]
    fn wrong_key_does_not_recover_plaintext() {
        let blob = encode(b"hello", &key(0x01));
        let recovered = decode(&blob, &key(0x02));
        assert_ne!(recovered.as_deref(), Ok("hello"));
    }

    #[test]
    fn invalid_utf8_is_not_text() {
        // 0xFF is never valid in UTF-8; XOR with a zero key leaves it as is.
        let mut raw = vec![0u8; PREFIX_LEN];
        raw.push(0xFF);
        let blob = BASE64.encode(raw);
        assert_eq!(decode(&blob, &key(0x00)), Err(DecryptionFailure::NotText));
    }

    #[test]
    fn non_base64_is_malformed() {
        assert_eq!(
            decode("not base64 at all!", &key(0x01)),
            Err(DecryptionFailure::Malformed)
        );
    }

    #[test]
    fn short_blob_is_truncated() {
        let blob = BASE64.encode([1u8, 2, 3]);
        assert_eq!(decode(&blob, &key(0x01)), Err(DecryptionFailure::Truncated));
    }
}
