// common/src/auth/credentials.rs
use ed25519_dalek::{Signature, VerifyingKey, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

use super::error::{AuthError, CredentialField, MalformedReason};

/// Names of the headers carrying the three credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderNames {
    pub signature: String,
    pub message: String,
    pub public_key: String,
}

impl HeaderNames {
    /// Header names are case-insensitive, so they are stored lowercased
    pub fn new(signature: &str, message: &str, public_key: &str) -> Self {
        Self {
            signature: signature.trim().to_ascii_lowercase(),
            message: message.trim().to_ascii_lowercase(),
            public_key: public_key.trim().to_ascii_lowercase(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [
            self.signature.as_str(),
            self.message.as_str(),
            self.public_key.as_str(),
        ]
        .into_iter()
    }

    pub fn name_of(&self, field: CredentialField) -> &str {
        match field {
            CredentialField::Signature => &self.signature,
            CredentialField::Message => &self.message,
            CredentialField::PublicKey => &self.public_key,
        }
    }
}

impl Default for HeaderNames {
    fn default() -> Self {
        Self::new("x-signature", "x-message", "x-public-key")
    }
}

/// The three credential strings of a request, all present and non-empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletCredentials {
    signature: String,
    message: String,
    public_key: String,
}

/// Credentials after base58 decoding, ready for verification
#[derive(Debug, Clone)]
pub struct DecodedCredentials {
    pub verifying_key: VerifyingKey,
    pub signature: Signature,
}

impl WalletCredentials {
    pub fn new(
        signature: impl Into<String>,
        message: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let signature = signature.into();
        let message = message.into();
        let public_key = public_key.into();

        if signature.is_empty() || message.is_empty() || public_key.is_empty() {
            return Err(missing_error(
                signature.is_empty(),
                message.is_empty(),
                public_key.is_empty(),
            ));
        }

        Ok(Self {
            signature,
            message,
            public_key,
        })
    }

    /// Build credentials from raw header values.
    ///
    /// `lookup` returns the bytes of a header by name. Absent and empty
    /// headers are reported together as missing before any value is
    /// inspected further.
    pub fn from_lookup<'a, F>(names: &HeaderNames, lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<&'a [u8]>,
    {
        let read = |field: CredentialField| {
            lookup(names.name_of(field)).filter(|bytes| !bytes.is_empty())
        };

        match (
            read(CredentialField::Signature),
            read(CredentialField::Message),
            read(CredentialField::PublicKey),
        ) {
            (Some(signature), Some(message), Some(public_key)) => Self::new(
                utf8(CredentialField::Signature, signature)?,
                utf8(CredentialField::Message, message)?,
                utf8(CredentialField::PublicKey, public_key)?,
            ),
            (signature, message, public_key) => Err(missing_error(
                signature.is_none(),
                message.is_none(),
                public_key.is_none(),
            )),
        }
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Decode the base58 key and signature into their fixed-size forms
    pub fn decode(&self) -> Result<DecodedCredentials, AuthError> {
        let key_bytes: [u8; PUBLIC_KEY_LENGTH] =
            decode_fixed(CredentialField::PublicKey, &self.public_key)?;
        let signature_bytes: [u8; SIGNATURE_LENGTH] =
            decode_fixed(CredentialField::Signature, &self.signature)?;

        let verifying_key = VerifyingKey::from_bytes(&key_bytes)
            .map_err(|_| MalformedReason::RejectedKey)?;
        let signature = Signature::from_bytes(&signature_bytes);

        Ok(DecodedCredentials {
            verifying_key,
            signature,
        })
    }
}

fn missing_error(signature: bool, message: bool, public_key: bool) -> AuthError {
    let missing = [
        (CredentialField::Signature, signature),
        (CredentialField::Message, message),
        (CredentialField::PublicKey, public_key),
    ]
    .into_iter()
    .filter_map(|(field, absent)| absent.then_some(field))
    .collect();

    AuthError::MissingCredentials { missing }
}

fn utf8(field: CredentialField, bytes: &[u8]) -> Result<&str, MalformedReason> {
    std::str::from_utf8(bytes).map_err(|_| MalformedReason::NotUtf8(field))
}

/// Upper bound on the base58 length of `n` bytes (log 256 / log 58 < 1.38)
const fn max_encoded_len(n: usize) -> usize {
    n * 138 / 100 + 1
}

fn decode_fixed<const N: usize>(
    field: CredentialField,
    encoded: &str,
) -> Result<[u8; N], MalformedReason> {
    // Decoding is quadratic in the input, so oversized values never reach it
    let max = max_encoded_len(N);
    if encoded.len() > max {
        return Err(MalformedReason::TooLong { field, max });
    }

    let bytes = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| MalformedReason::InvalidBase58(field))?;

    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| MalformedReason::WrongLength {
        field,
        expected: N,
        actual: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, Vec<u8>> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.as_bytes().to_vec()))
            .collect()
    }

    #[test]
    fn test_from_lookup_reads_configured_names() {
        let names = HeaderNames::default();
        let map = headers(&[
            ("x-signature", "sig"),
            ("x-message", "hello"),
            ("x-public-key", "key"),
        ]);

        let creds = WalletCredentials::from_lookup(&names, |name| {
            map.get(name).map(|v| v.as_slice())
        })
        .unwrap();

        assert_eq!(creds.signature(), "sig");
        assert_eq!(creds.message(), "hello");
        assert_eq!(creds.public_key(), "key");
    }

    #[test]
    fn test_missing_and_empty_headers_are_reported_together() {
        let names = HeaderNames::default();
        let map = headers(&[("x-message", "hello"), ("x-public-key", "")]);

        let err = WalletCredentials::from_lookup(&names, |name| {
            map.get(name).map(|v| v.as_slice())
        })
        .unwrap_err();

        assert_eq!(
            err,
            AuthError::MissingCredentials {
                missing: vec![CredentialField::Signature, CredentialField::PublicKey],
            }
        );
    }

    #[test]
    fn test_non_utf8_header_is_malformed() {
        let names = HeaderNames::default();
        let mut map = headers(&[("x-signature", "sig"), ("x-public-key", "key")]);
        map.insert("x-message".to_string(), vec![0xff, 0xfe]);

        let err = WalletCredentials::from_lookup(&names, |name| {
            map.get(name).map(|v| v.as_slice())
        })
        .unwrap_err();

        assert_eq!(
            err,
            AuthError::MalformedCredentials(MalformedReason::NotUtf8(CredentialField::Message))
        );
    }

    #[test]
    fn test_decode_rejects_non_base58_characters() {
        // '0', 'O', 'I' and 'l' are outside the alphabet
        let creds = WalletCredentials::new("0OIl", "hello", "11111111111111111111111111111111").unwrap();
        let err = creds.decode().unwrap_err();
        assert!(matches!(err, AuthError::MalformedCredentials(_)));
    }

    #[test]
    fn test_decode_rejects_short_public_key() {
        let short_key = bs58::encode([7u8; 16]).into_string();
        let signature = bs58::encode([1u8; 64]).into_string();
        let creds = WalletCredentials::new(signature, "hello", short_key).unwrap();

        assert_eq!(
            creds.decode().unwrap_err(),
            AuthError::MalformedCredentials(MalformedReason::WrongLength {
                field: CredentialField::PublicKey,
                expected: 32,
                actual: 16,
            })
        );
    }

    #[test]
    fn test_decode_rejects_short_signature() {
        let key = bs58::encode([0u8; 32]).into_string();
        let signature = bs58::encode([1u8; 63]).into_string();
        let creds = WalletCredentials::new(signature, "hello", key).unwrap();

        assert_eq!(
            creds.decode().unwrap_err(),
            AuthError::MalformedCredentials(MalformedReason::WrongLength {
                field: CredentialField::Signature,
                expected: 64,
                actual: 63,
            })
        );
    }

    #[test]
    fn test_oversized_values_rejected_before_decoding() {
        let signature = bs58::encode([1u8; 64]).into_string();
        let creds = WalletCredentials::new(signature, "hello", "z".repeat(30_000)).unwrap();

        assert_eq!(
            creds.decode().unwrap_err(),
            AuthError::MalformedCredentials(MalformedReason::TooLong {
                field: CredentialField::PublicKey,
                max: 45,
            })
        );

        let key = bs58::encode([9u8; 32]).into_string();
        let creds = WalletCredentials::new("z".repeat(30_000), "hello", key).unwrap();
        assert!(matches!(
            creds.decode().unwrap_err(),
            AuthError::MalformedCredentials(MalformedReason::TooLong {
                field: CredentialField::Signature,
                ..
            })
        ));
    }

    #[test]
    fn test_length_bound_admits_every_full_width_value() {
        // All-0xff arrays produce the longest encodings for their size
        assert!(bs58::encode([0xffu8; 32]).into_string().len() <= max_encoded_len(32));
        assert!(bs58::encode([0xffu8; 64]).into_string().len() <= max_encoded_len(64));
        assert!(bs58::encode([0u8; 64]).into_string().len() <= max_encoded_len(64));
    }

    #[test]
    fn test_header_names_lowercased() {
        let names = HeaderNames::new("X-Signature", " X-Message ", "X-PUBLIC-KEY");
        assert_eq!(names, HeaderNames::default());
    }
}
