use thiserror::Error;

use crate::store::StorageError;

/// Error outputs from the delegation engine.
#[derive(Debug, Error)]
pub enum DelegationError {
    /// No primary-wallet account is available to register a scoped key against.
    #[error("no_account")]
    NoAccount,
    /// An operation requiring a primary wallet was invoked while none is connected.
    #[error("not_connected")]
    NotConnected,
    /// A scoped signing attempt encountered an action kind the local signer cannot construct.
    #[error("unsupported_action: {kind}")]
    UnsupportedAction {
        /// The offending action kind, e.g. `AddKey`.
        kind: String,
    },
    /// The network reports zero remaining allowance for the scoped key.
    ///
    /// The stored credential has already been cleared when this surfaces;
    /// the caller must re-establish authorization via
    /// [`create_scoped_key`](crate::DelegationMiddleware::create_scoped_key).
    #[error("allowance_exhausted: {public_key}")]
    AllowanceExhausted {
        /// Public key of the exhausted scoped credential.
        public_key: String,
    },
    /// The transport rejected or failed to deliver a transaction. Propagated
    /// verbatim, never retried.
    #[error("submission_failed: {error}")]
    Submission {
        /// Transport-reported failure detail.
        error: String,
    },
    /// A network query (not a submission) failed.
    #[error("rpc_error: {error}")]
    Rpc {
        /// Transport-reported failure detail.
        error: String,
    },
    /// Key material could not be decoded.
    #[error("invalid_key: {reason}")]
    InvalidKey {
        /// What was wrong with the presented key.
        reason: String,
    },
    /// A balance or gas amount could not be parsed.
    #[error("invalid_amount: {value}")]
    InvalidAmount {
        /// The unparseable input.
        value: String,
    },
    /// Unexpected error serializing information.
    #[error("serialization_error: {error}")]
    Serialization {
        /// Underlying serializer message.
        error: String,
    },
    /// Credential persistence failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<serde_json::Error> for DelegationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            error: err.to_string(),
        }
    }
}
