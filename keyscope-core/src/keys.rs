use ed25519_dalek::{Signature, Signer as _, SigningKey, Verifier as _, VerifyingKey};
use rand::rngs::OsRng;
use secrecy::{ExposeSecret as _, SecretString};
use zeroize::Zeroizing;

use crate::error::DelegationError;

/// Prefix carried by every encoded ed25519 key and signature on the wire.
pub const ED25519_PREFIX: &str = "ed25519:";

const SECRET_KEY_LEN: usize = 32;
const PUBLIC_KEY_LEN: usize = 32;
const KEYPAIR_LEN: usize = 64;
const SIGNATURE_LEN: usize = 64;

/// An ed25519 key pair for a scoped credential.
///
/// Secret material only leaves this type through [`secret_key`], which wraps
/// it in a [`SecretString`] so downstream holders inherit redacted `Debug`
/// output and best-effort zeroization.
///
/// [`secret_key`]: SigningKeypair::secret_key
pub struct SigningKeypair {
    key: SigningKey,
}

impl SigningKeypair {
    /// Generates a fresh random key pair from the OS entropy source.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Reconstructs a key pair from an encoded secret key
    /// (`ed25519:<base58>` over either the 64-byte secret‖public
    /// concatenation or the bare 32-byte seed).
    ///
    /// # Errors
    /// Returns [`DelegationError::InvalidKey`] if the encoding or length is
    /// wrong.
    pub fn from_secret_key(encoded: &str) -> Result<Self, DelegationError> {
        let data = decode_key_data(encoded)?;
        if data.len() != SECRET_KEY_LEN && data.len() != KEYPAIR_LEN {
            return Err(DelegationError::InvalidKey {
                reason: format!("unexpected secret key length {}", data.len()),
            });
        }
        let seed = Zeroizing::new(<[u8; SECRET_KEY_LEN]>::try_from(&data[..SECRET_KEY_LEN]).map_err(
            |_| DelegationError::InvalidKey {
                reason: "secret key seed out of bounds".to_string(),
            },
        )?);
        Ok(Self {
            key: SigningKey::from_bytes(&seed),
        })
    }

    /// The public half, encoded as `ed25519:<base58>`.
    #[must_use]
    pub fn public_key(&self) -> String {
        encode_key_data(&self.key.verifying_key().to_bytes())
    }

    /// The secret half, encoded as `ed25519:<base58>` over the 64-byte
    /// secret‖public concatenation (the layout wallet tooling expects).
    #[must_use]
    pub fn secret_key(&self) -> SecretString {
        let mut buf = Zeroizing::new([0u8; KEYPAIR_LEN]);
        buf[..SECRET_KEY_LEN].copy_from_slice(&self.key.to_bytes());
        buf[SECRET_KEY_LEN..].copy_from_slice(&self.key.verifying_key().to_bytes());
        SecretString::from(encode_key_data(buf.as_ref()))
    }

    /// Signs a message (typically a transaction hash), returning the
    /// signature encoded as `ed25519:<base58>`.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> String {
        let signature = self.key.sign(message);
        encode_key_data(&signature.to_bytes())
    }
}

impl std::fmt::Debug for SigningKeypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKeypair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Verifies an encoded signature against an encoded public key.
///
/// # Errors
/// Returns [`DelegationError::InvalidKey`] if either input cannot be
/// decoded; a well-formed but non-matching signature yields `Ok(false)`.
pub fn verify_signature(
    public_key: &str,
    message: &[u8],
    signature: &str,
) -> Result<bool, DelegationError> {
    let key_bytes = decode_key_data(public_key)?;
    let key_bytes: [u8; PUBLIC_KEY_LEN] =
        key_bytes
            .as_slice()
            .try_into()
            .map_err(|_| DelegationError::InvalidKey {
                reason: format!("unexpected public key length {}", key_bytes.len()),
            })?;
    let verifying_key =
        VerifyingKey::from_bytes(&key_bytes).map_err(|err| DelegationError::InvalidKey {
            reason: format!("malformed public key: {err}"),
        })?;

    let sig_bytes = decode_key_data(signature)?;
    let sig_bytes: [u8; SIGNATURE_LEN] =
        sig_bytes
            .as_slice()
            .try_into()
            .map_err(|_| DelegationError::InvalidKey {
                reason: format!("unexpected signature length {}", sig_bytes.len()),
            })?;
    let signature = Signature::from_bytes(&sig_bytes);

    Ok(verifying_key.verify(message, &signature).is_ok())
}

/// Reconstructs a key pair from a [`SecretString`]-wrapped secret key.
///
/// # Errors
/// See [`SigningKeypair::from_secret_key`].
pub fn keypair_from_secret(secret: &SecretString) -> Result<SigningKeypair, DelegationError> {
    SigningKeypair::from_secret_key(secret.expose_secret())
}

fn encode_key_data(data: &[u8]) -> String {
    format!("{ED25519_PREFIX}{}", bs58::encode(data).into_string())
}

fn decode_key_data(encoded: &str) -> Result<Zeroizing<Vec<u8>>, DelegationError> {
    let body = encoded.strip_prefix(ED25519_PREFIX).unwrap_or(encoded);
    bs58::decode(body)
        .into_vec()
        .map(Zeroizing::new)
        .map_err(|err| DelegationError::InvalidKey {
            reason: format!("base58 decode failed: {err}"),
        })
}
