use std::sync::Arc;

use tracing::{info, warn};

use crate::credential::ScopedCredential;
use crate::error::DelegationError;
use crate::provider::NetworkProvider;
use crate::store::ScopedKeyStore;

/// Pre-flight check of a scoped key's remaining allowance against the
/// network's authoritative view.
///
/// Best-effort and staleness-tolerant: a nonzero reading does not guarantee
/// the following submission succeeds (another spend may race it), and a
/// failed submission after a nonzero reading must not touch the stored
/// credential. Only an explicit zero observation clears it.
pub struct AllowanceOracle {
    provider: Arc<dyn NetworkProvider>,
    store: Arc<dyn ScopedKeyStore>,
}

impl AllowanceOracle {
    /// Creates an oracle over the given transport and credential store.
    #[must_use]
    pub fn new(provider: Arc<dyn NetworkProvider>, store: Arc<dyn ScopedKeyStore>) -> Self {
        Self { provider, store }
    }

    /// Checks `credential`'s remaining allowance before a local signing
    /// attempt.
    ///
    /// An explicit zero allowance deletes the credential from the store and
    /// fails with [`DelegationError::AllowanceExhausted`]; submitting would
    /// be guaranteed to be rejected and the caller must re-establish
    /// authorization. A query failure is tolerated (logged, pre-flight
    /// passes), as is an unlimited key.
    ///
    /// # Errors
    /// [`DelegationError::AllowanceExhausted`] on a zero reading, or a
    /// [`StorageError`](crate::StorageError) if the subsequent clear fails.
    pub async fn preflight(&self, credential: &ScopedCredential) -> Result<(), DelegationError> {
        let view = match self
            .provider
            .query_access_key(&credential.account_id, &credential.public_key)
            .await
        {
            Ok(view) => view,
            Err(err) => {
                warn!(error = %err, "allowance query failed, proceeding without pre-flight");
                return Ok(());
            }
        };

        match view.allowance {
            Some(allowance) if allowance.is_zero() => {
                info!(
                    public_key = %credential.public_key,
                    "scoped key allowance exhausted, clearing credential"
                );
                self.store.clear().map_err(DelegationError::from)?;
                Err(DelegationError::AllowanceExhausted {
                    public_key: credential.public_key.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}
