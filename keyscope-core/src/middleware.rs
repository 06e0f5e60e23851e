use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::balance::YoctoNear;
use crate::credential::ScopedCredential;
use crate::defaults::DEFAULT_KEY_ALLOWANCE;
use crate::error::DelegationError;
use crate::keys::SigningKeypair;
use crate::oracle::AllowanceOracle;
use crate::policy::{self, Decision};
use crate::provider::NetworkProvider;
use crate::signer::LocalSigner;
use crate::store::ScopedKeyStore;
use crate::transaction::{
    AccessKey, Action, ExecutionOutcome, FunctionCallPermission, PendingTransaction,
};
use crate::wallet::{PrimaryWallet, WalletAccount};

/// The composition point of the delegation engine.
///
/// Implements [`PrimaryWallet`] over an inner wallet and intercepts three
/// operations: scoped-key creation, sign-out, and sign-and-send. Everything
/// else passes through unmodified. Per transaction, [`policy::evaluate`]
/// routes between the [`LocalSigner`] and the inner wallet; both paths
/// return the same outcome shape.
pub struct DelegationMiddleware {
    wallet: Arc<dyn PrimaryWallet>,
    store: Arc<dyn ScopedKeyStore>,
    signer: LocalSigner,
    oracle: AllowanceOracle,
    allowance_preflight: bool,
}

impl DelegationMiddleware {
    /// Wraps `wallet`, keeping scoped credentials in `store` and reaching
    /// the network through `provider`. The allowance pre-flight is enabled
    /// by default.
    #[must_use]
    pub fn new(
        wallet: Arc<dyn PrimaryWallet>,
        store: Arc<dyn ScopedKeyStore>,
        provider: Arc<dyn NetworkProvider>,
    ) -> Self {
        Self {
            wallet,
            store: Arc::clone(&store),
            signer: LocalSigner::new(Arc::clone(&provider)),
            oracle: AllowanceOracle::new(provider, store),
            allowance_preflight: true,
        }
    }

    /// Enables or disables the pre-submission allowance check.
    #[must_use]
    pub const fn with_allowance_preflight(mut self, enabled: bool) -> Self {
        self.allowance_preflight = enabled;
        self
    }

    /// The currently stored scoped credential, if any.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn scoped_credential(&self) -> Result<Option<ScopedCredential>, DelegationError> {
        self.store.read().map_err(DelegationError::from)
    }

    /// Registers a fresh scoped key for `contract_id`/`method_names` with
    /// the default spending allowance. See
    /// [`create_scoped_key_with_allowance`].
    ///
    /// [`create_scoped_key_with_allowance`]: Self::create_scoped_key_with_allowance
    ///
    /// # Errors
    /// See [`create_scoped_key_with_allowance`](Self::create_scoped_key_with_allowance).
    pub async fn create_scoped_key(
        &self,
        contract_id: &str,
        method_names: &[String],
    ) -> Result<ExecutionOutcome, DelegationError> {
        self.create_scoped_key_with_allowance(contract_id, method_names, DEFAULT_KEY_ALLOWANCE)
            .await
    }

    /// Generates a key pair locally, asks the inner wallet to sign and
    /// submit the on-chain registration (an `AddKey` on the wallet's own
    /// account, scoped to `contract_id`/`method_names` with `allowance`),
    /// and persists the credential only once that transaction has
    /// succeeded. A failed or rejected registration leaves no local state.
    ///
    /// # Errors
    /// [`DelegationError::NoAccount`] when the wallet exposes no account,
    /// the wallet's own error when registration fails, or a storage error
    /// from the final persistence step.
    pub async fn create_scoped_key_with_allowance(
        &self,
        contract_id: &str,
        method_names: &[String],
        allowance: YoctoNear,
    ) -> Result<ExecutionOutcome, DelegationError> {
        let accounts = self.wallet.get_accounts().await?;
        let Some(account) = accounts.first() else {
            return Err(DelegationError::NoAccount);
        };

        let keypair = SigningKeypair::generate();
        let registration = PendingTransaction {
            signer_id: Some(account.account_id.clone()),
            receiver_id: account.account_id.clone(),
            actions: vec![Action::AddKey {
                public_key: keypair.public_key(),
                access_key: AccessKey {
                    permission: FunctionCallPermission {
                        receiver_id: contract_id.to_string(),
                        method_names: method_names.to_vec(),
                        allowance: Some(allowance),
                    },
                },
            }],
        };

        let outcome = self.wallet.sign_and_send_transaction(&registration).await?;
        if !outcome.is_success() {
            warn!(
                contract_id,
                "scoped key registration rejected on-chain, not persisting credential"
            );
            return Ok(outcome);
        }

        let credential = ScopedCredential::new(
            account.account_id.clone(),
            &keypair,
            contract_id.to_string(),
            method_names.to_vec(),
            allowance,
        );
        self.store.write(&credential)?;
        info!(
            account_id = %credential.account_id,
            contract_id = %credential.contract_id,
            public_key = %credential.public_key,
            "scoped key registered and persisted"
        );
        Ok(outcome)
    }
}

#[async_trait]
impl PrimaryWallet for DelegationMiddleware {
    async fn get_accounts(&self) -> Result<Vec<WalletAccount>, DelegationError> {
        self.wallet.get_accounts().await
    }

    async fn sign_and_send_transaction(
        &self,
        tx: &PendingTransaction,
    ) -> Result<ExecutionOutcome, DelegationError> {
        let credential = self.store.read()?;
        if let Some(credential) = credential {
            if policy::evaluate(tx, Some(&credential)) == Decision::AllowLocal {
                if self.allowance_preflight {
                    self.oracle.preflight(&credential).await?;
                }
                debug!(receiver_id = %tx.receiver_id, "signing transaction with scoped key");
                return self.signer.sign_and_submit(&credential, tx).await;
            }
        }

        debug!(receiver_id = %tx.receiver_id, "escalating transaction to primary wallet");
        self.wallet.sign_and_send_transaction(tx).await
    }

    async fn sign_out(&self) -> Result<(), DelegationError> {
        // Clear the scoped key first so both layers release state even when
        // the forwarded sign-out fails.
        let cleared = self.store.clear();
        let forwarded = self.wallet.sign_out().await;
        cleared?;
        forwarded
    }
}
