// common/src/auth/pipeline.rs
use std::fmt;
use std::sync::Arc;

use super::credentials::{HeaderNames, WalletCredentials};
use super::error::AuthError;
use super::identity::CallerIdentity;
use super::policy::{AccessPolicy, PassThrough};
use super::verifier::SignatureVerifier;

/// Ordered authentication stages: extract, verify, authorize.
///
/// Each stage either hands its output to the next or ends the request with
/// an [`AuthError`]. Everything runs synchronously; nothing is cached between
/// calls.
#[derive(Clone)]
pub struct AuthPipeline {
    names: HeaderNames,
    verifier: SignatureVerifier,
    policy: Arc<dyn AccessPolicy>,
}

impl AuthPipeline {
    pub fn new(names: HeaderNames) -> Self {
        Self {
            names,
            verifier: SignatureVerifier::new(),
            policy: Arc::new(PassThrough),
        }
    }

    /// Replace the pass-through authorization stage
    pub fn with_policy<P>(mut self, policy: P) -> Self
    where
        P: AccessPolicy + 'static,
    {
        self.policy = Arc::new(policy);
        self
    }

    /// Replace the signature verification stage
    pub fn with_verifier(mut self, verifier: SignatureVerifier) -> Self {
        self.verifier = verifier;
        self
    }

    pub fn header_names(&self) -> &HeaderNames {
        &self.names
    }

    /// Run all stages for one request
    pub fn authenticate<'a, F>(&self, lookup: F, path: &str) -> Result<CallerIdentity, AuthError>
    where
        F: Fn(&str) -> Option<&'a [u8]>,
    {
        let credentials = WalletCredentials::from_lookup(&self.names, lookup)?;
        let identity = self.verifier.verify(&credentials)?;
        self.policy.authorize(&identity, path)?;
        Ok(identity)
    }
}

impl Default for AuthPipeline {
    fn default() -> Self {
        Self::new(HeaderNames::default())
    }
}

impl fmt::Debug for AuthPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthPipeline")
            .field("names", &self.names)
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}
