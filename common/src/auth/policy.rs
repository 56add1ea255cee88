// common/src/auth/policy.rs
use super::error::AuthError;
use super::identity::CallerIdentity;

/// Authorization stage run after the caller's identity is established.
///
/// No role data is derived from a wallet signature, so the default policy
/// lets every verified wallet through. Deployments that need roles supply
/// their own policy and return [`AuthError::Forbidden`] to deny.
pub trait AccessPolicy: Send + Sync {
    fn authorize(&self, identity: &CallerIdentity, path: &str) -> Result<(), AuthError>;
}

/// Accepts every verified caller
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl AccessPolicy for PassThrough {
    fn authorize(&self, _identity: &CallerIdentity, _path: &str) -> Result<(), AuthError> {
        Ok(())
    }
}
