use std::sync::Arc;

use sha2::{Digest as _, Sha256};
use tracing::debug;

use crate::balance::YoctoNear;
use crate::credential::ScopedCredential;
use crate::defaults::DEFAULT_FUNCTION_CALL_GAS;
use crate::error::DelegationError;
use crate::keys::SigningKeypair;
use crate::provider::NetworkProvider;
use crate::transaction::{
    Action, ExecutionOutcome, FunctionCallAction, PendingTransaction, SignedTransaction,
    Transaction,
};

/// Signs policy-approved transactions with a scoped credential and submits
/// them directly, bypassing interactive approval.
///
/// Submission failures propagate to the caller unmodified; the signer never
/// retries and never mutates stored state.
pub struct LocalSigner {
    provider: Arc<dyn NetworkProvider>,
}

impl LocalSigner {
    /// Creates a signer over the given transport.
    #[must_use]
    pub fn new(provider: Arc<dyn NetworkProvider>) -> Self {
        Self { provider }
    }

    /// Signs `tx` with `credential`'s key pair and submits it.
    ///
    /// # Errors
    /// [`DelegationError::UnsupportedAction`] if any action is not a
    /// function call, [`DelegationError::InvalidKey`] if the stored secret
    /// is corrupt, or the transport's error verbatim.
    pub async fn sign_and_submit(
        &self,
        credential: &ScopedCredential,
        tx: &PendingTransaction,
    ) -> Result<ExecutionOutcome, DelegationError> {
        let actions = normalize_actions(&tx.actions)?;
        let keypair = credential.keypair()?;

        let transaction = Transaction {
            signer_id: credential.account_id.clone(),
            public_key: keypair.public_key(),
            receiver_id: tx.receiver_id.clone(),
            actions,
        };
        let signed = sign_transaction(&keypair, transaction)?;

        debug!(
            receiver_id = %signed.transaction.receiver_id,
            actions = signed.transaction.actions.len(),
            "submitting locally signed transaction"
        );
        self.provider.submit(&signed).await
    }
}

/// Converts raw actions into normalized function calls, filling in the
/// default gas budget and a zero deposit where unspecified.
fn normalize_actions(actions: &[Action]) -> Result<Vec<FunctionCallAction>, DelegationError> {
    actions
        .iter()
        .map(|action| match action {
            Action::FunctionCall {
                method_name,
                args,
                gas,
                deposit,
            } => Ok(FunctionCallAction {
                method_name: method_name.clone(),
                args: if args.is_null() {
                    serde_json::Value::Object(serde_json::Map::new())
                } else {
                    args.clone()
                },
                gas: gas.unwrap_or(DEFAULT_FUNCTION_CALL_GAS),
                deposit: deposit.unwrap_or(YoctoNear::from_yocto(0)),
            }),
            other => Err(DelegationError::UnsupportedAction {
                kind: other.kind().to_string(),
            }),
        })
        .collect()
}

/// Signs the sha-256 hash of the transaction's canonical JSON encoding.
pub(crate) fn sign_transaction(
    keypair: &SigningKeypair,
    transaction: Transaction,
) -> Result<SignedTransaction, DelegationError> {
    let bytes = serde_json::to_vec(&transaction)?;
    let hash = Sha256::digest(&bytes);
    let signature = keypair.sign(&hash);
    Ok(SignedTransaction {
        transaction,
        signature,
    })
}

/// Recomputes the signable hash of a signed transaction's body. Exposed so
/// transports and tests can verify signatures without re-deriving the
/// canonical encoding.
///
/// # Errors
/// Returns [`DelegationError::Serialization`] if the body cannot be encoded.
pub fn transaction_hash(transaction: &Transaction) -> Result<Vec<u8>, DelegationError> {
    let bytes = serde_json::to_vec(transaction)?;
    Ok(Sha256::digest(&bytes).to_vec())
}
