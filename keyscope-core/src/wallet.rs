use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DelegationError;
use crate::transaction::{ExecutionOutcome, PendingTransaction};

/// An account exposed by a connected primary wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAccount {
    /// The account's on-chain identifier.
    pub account_id: String,
    /// The wallet's own signing key for the account, when it exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
}

/// The capability surface of an interactive primary wallet.
///
/// Implemented by wallet-connector adapters outside this crate, and by
/// [`DelegationMiddleware`](crate::DelegationMiddleware), which decorates an
/// inner implementation; calling code is agnostic to which layer it holds.
#[async_trait]
pub trait PrimaryWallet: Send + Sync {
    /// Lists the accounts the wallet currently exposes.
    ///
    /// # Errors
    /// Returns [`DelegationError::NotConnected`] when no wallet session is
    /// active.
    async fn get_accounts(&self) -> Result<Vec<WalletAccount>, DelegationError>;

    /// Signs `tx` after interactive approval and submits it.
    ///
    /// # Errors
    /// Returns [`DelegationError::NotConnected`] without a session, or the
    /// transport's submission error verbatim.
    async fn sign_and_send_transaction(
        &self,
        tx: &PendingTransaction,
    ) -> Result<ExecutionOutcome, DelegationError>;

    /// Ends the wallet session and releases its state.
    ///
    /// # Errors
    /// Returns a transport or wallet-specific error when teardown fails.
    async fn sign_out(&self) -> Result<(), DelegationError>;
}
