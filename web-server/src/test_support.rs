// web-server/src/test_support.rs
use ed25519_dalek::{Signer, SigningKey};

/// Credential headers for `message` signed by the key derived from `seed`
pub fn sign(seed: u8, message: &str) -> Vec<(&'static str, String)> {
    let key = SigningKey::from_bytes(&[seed; 32]);
    let signature = key.sign(message.as_bytes());

    vec![
        ("x-signature", bs58::encode(signature.to_bytes()).into_string()),
        ("x-message", message.to_string()),
        ("x-public-key", wallet_of(seed)),
    ]
}

pub fn wallet_of(seed: u8) -> String {
    let key = SigningKey::from_bytes(&[seed; 32]);
    bs58::encode(key.verifying_key().to_bytes()).into_string()
}
