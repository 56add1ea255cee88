// common/src/auth/error.rs
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The credential a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialField {
    Signature,
    Message,
    PublicKey,
}

impl CredentialField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialField::Signature => "signature",
            CredentialField::Message => "message",
            CredentialField::PublicKey => "public_key",
        }
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a present credential could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("{0} header is not valid UTF-8")]
    NotUtf8(CredentialField),

    #[error("{0} is not valid base58")]
    InvalidBase58(CredentialField),

    #[error("{field} decodes to {actual} bytes, expected {expected}")]
    WrongLength {
        field: CredentialField,
        expected: usize,
        actual: usize,
    },

    #[error("{field} is longer than {max} characters")]
    TooLong { field: CredentialField, max: usize },

    #[error("public key is not a valid Ed25519 point")]
    RejectedKey,
}

/// Terminal outcome of a failed authentication attempt.
///
/// The variants stay distinct for logging; [`AuthError::error_body`]
/// collapses every caller-side cause into one uniform response so that a
/// client cannot tell which credential was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("missing credential headers: {}", join_fields(.missing))]
    MissingCredentials { missing: Vec<CredentialField> },

    #[error("malformed credentials: {0}")]
    MalformedCredentials(#[from] MalformedReason),

    #[error("signature does not match message and public key")]
    InvalidSignature,

    #[error("internal verification error: {0}")]
    InternalVerificationError(String),

    #[error("access denied")]
    Forbidden,
}

impl AuthError {
    /// Fine-grained category, for logs only
    pub fn category(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials { .. } => "missing_credentials",
            AuthError::MalformedCredentials(_) => "malformed_credentials",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::InternalVerificationError(_) => "internal_error",
            AuthError::Forbidden => "forbidden",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MissingCredentials { .. }
            | AuthError::MalformedCredentials(_)
            | AuthError::InvalidSignature => 401,
            AuthError::Forbidden => 403,
            AuthError::InternalVerificationError(_) => 500,
        }
    }

    /// True when the caller sent bad or missing credentials
    pub fn is_client_error(&self) -> bool {
        !matches!(self, AuthError::InternalVerificationError(_))
    }

    /// Body sent on the wire
    pub fn error_body(&self) -> ErrorBody {
        match self {
            AuthError::MissingCredentials { .. }
            | AuthError::MalformedCredentials(_)
            | AuthError::InvalidSignature => ErrorBody {
                error: "unauthorized",
                message: "Authentication failed",
            },
            AuthError::Forbidden => ErrorBody {
                error: "forbidden",
                message: "Access denied",
            },
            AuthError::InternalVerificationError(_) => ErrorBody {
                error: "internal_error",
                message: "Internal server error",
            },
        }
    }
}

/// Uniform JSON error shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: &'static str,
}

fn join_fields(fields: &[CredentialField]) -> String {
    fields
        .iter()
        .map(CredentialField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_errors_share_one_body() {
        let errors = [
            AuthError::MissingCredentials { missing: vec![CredentialField::Message] },
            AuthError::MalformedCredentials(MalformedReason::RejectedKey),
            AuthError::InvalidSignature,
        ];

        for error in &errors {
            assert_eq!(error.status_code(), 401);
            assert!(error.is_client_error());
            assert_eq!(error.error_body(), errors[0].error_body());
        }
    }

    #[test]
    fn test_internal_error_is_server_side() {
        let error = AuthError::InternalVerificationError("boom".to_string());
        assert_eq!(error.status_code(), 500);
        assert!(!error.is_client_error());
        assert_eq!(error.error_body().error, "internal_error");
    }

    #[test]
    fn test_display_names_missing_fields() {
        let error = AuthError::MissingCredentials {
            missing: vec![CredentialField::Signature, CredentialField::PublicKey],
        };
        assert_eq!(error.to_string(), "missing credential headers: signature, public_key");
    }

    #[test]
    fn test_wrong_length_display() {
        let reason = MalformedReason::WrongLength {
            field: CredentialField::PublicKey,
            expected: 32,
            actual: 16,
        };
        assert_eq!(reason.to_string(), "public_key decodes to 16 bytes, expected 32");
    }

    #[test]
    fn test_body_serializes_to_error_and_message() {
        let body = serde_json::to_value(AuthError::InvalidSignature.error_body()).unwrap();
        assert_eq!(body, serde_json::json!({
            "error": "unauthorized",
            "message": "Authentication failed"
        }));
    }
}
