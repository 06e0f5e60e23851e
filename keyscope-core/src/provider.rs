use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::balance::YoctoNear;
use crate::error::DelegationError;
use crate::transaction::{ExecutionOutcome, SignedTransaction};

/// The network's view of a registered access key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKeyView {
    /// Current transaction nonce for the key.
    #[serde(default)]
    pub nonce: u64,
    /// Remaining spending allowance; `None` means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowance: Option<YoctoNear>,
}

/// Network transport consumed by the engine. Implementations live outside
/// this crate (a JSON-RPC client in production, a mock in tests); the engine
/// only depends on this seam.
#[async_trait]
pub trait NetworkProvider: Send + Sync {
    /// Submits a signed transaction and awaits its execution outcome.
    ///
    /// # Errors
    /// Returns [`DelegationError::Submission`] (or a transport-specific
    /// error) when the transaction is rejected or cannot be delivered.
    async fn submit(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<ExecutionOutcome, DelegationError>;

    /// Queries the current view of `public_key` as registered on
    /// `account_id`.
    ///
    /// # Errors
    /// Returns [`DelegationError::Rpc`] when the query cannot be answered.
    async fn query_access_key(
        &self,
        account_id: &str,
        public_key: &str,
    ) -> Result<AccessKeyView, DelegationError>;
}
