use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};

use crate::balance::YoctoNear;
use crate::error::DelegationError;
use crate::keys::{keypair_from_secret, SigningKeypair};

/// A locally held key pair authorized on-chain for a single contract and a
/// bounded set of methods.
///
/// At most one credential exists per store; creating a new one overwrites
/// the prior record. The private key is wrapped in a [`SecretString`]: it is
/// redacted from `Debug` output and only reaches bytes through the store's
/// serde adapter, never through any submitted payload.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedCredential {
    /// The blockchain account the key is attached to.
    pub account_id: String,
    /// Registered public key, `ed25519:<base58>`.
    pub public_key: String,
    /// Sensitive: the matching secret key.
    #[serde(with = "secret_string")]
    pub private_key: SecretString,
    /// The single contract this key is authorized against.
    pub contract_id: String,
    /// Methods this key may invoke; empty means all methods on the contract.
    pub allowed_methods: Vec<String>,
    /// Spending budget recorded at creation time. Not kept in sync with the
    /// network; absent in records written by earlier iterations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowance: Option<YoctoNear>,
}

impl ScopedCredential {
    /// Builds a credential from a freshly generated key pair and the scope
    /// it was registered with.
    #[must_use]
    pub fn new(
        account_id: String,
        keypair: &SigningKeypair,
        contract_id: String,
        allowed_methods: Vec<String>,
        allowance: YoctoNear,
    ) -> Self {
        Self {
            account_id,
            public_key: keypair.public_key(),
            private_key: keypair.secret_key(),
            contract_id,
            allowed_methods,
            allowance: Some(allowance),
        }
    }

    /// Whether the credential's scope admits a call to `method_name`.
    /// An empty allow-list admits every method on the scoped contract.
    #[must_use]
    pub fn allows_method(&self, method_name: &str) -> bool {
        self.allowed_methods.is_empty()
            || self.allowed_methods.iter().any(|m| m == method_name)
    }

    /// Whether `receiver_id` is the contract this key was scoped to.
    #[must_use]
    pub fn matches_receiver(&self, receiver_id: &str) -> bool {
        self.contract_id == receiver_id
    }

    /// Reconstructs the signing key pair from the stored secret.
    ///
    /// # Errors
    /// Returns [`DelegationError::InvalidKey`] if the stored material is
    /// corrupt.
    pub fn keypair(&self) -> Result<SigningKeypair, DelegationError> {
        keypair_from_secret(&self.private_key)
    }
}

// SecretString deliberately has no Serialize impl; persistence is the one
// place the secret may cross into bytes, via this adapter only.
mod secret_string {
    use secrecy::{ExposeSecret as _, SecretString};
    use serde::{Deserialize as _, Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(secret.expose_secret())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretString::from)
    }
}

impl Clone for ScopedCredential {
    fn clone(&self) -> Self {
        Self {
            account_id: self.account_id.clone(),
            public_key: self.public_key.clone(),
            private_key: SecretString::from(self.private_key.expose_secret().to_owned()),
            contract_id: self.contract_id.clone(),
            allowed_methods: self.allowed_methods.clone(),
            allowance: self.allowance,
        }
    }
}
