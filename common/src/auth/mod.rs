//! Stateless wallet-signature authentication.
//!
//! Every request carries three headers: a base58 Ed25519 public key, the
//! plaintext message it signed, and the base58 detached signature. The
//! pipeline turns those headers into a [`CallerIdentity`] or an
//! [`AuthError`]. There is no session, nonce or replay window: a signed
//! message stays valid for as long as the caller keeps presenting it.

mod credentials;
mod error;
mod identity;
mod pipeline;
mod policy;
mod verifier;

pub use credentials::{DecodedCredentials, HeaderNames, WalletCredentials};
pub use error::{AuthError, CredentialField, ErrorBody, MalformedReason};
pub use identity::CallerIdentity;
pub use pipeline::AuthPipeline;
pub use policy::{AccessPolicy, PassThrough};
pub use verifier::SignatureVerifier;
