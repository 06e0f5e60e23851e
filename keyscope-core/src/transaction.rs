use serde::{Deserialize, Serialize};

use crate::balance::{NearGas, YoctoNear};

/// A transaction the application wants signed and submitted, before any
/// routing decision has been made.
///
/// Wire shape matches what wallet-connector front-ends exchange: camelCase
/// fields, actions as `{type, params}` tagged objects, amounts as decimal
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTransaction {
    /// Account expected to sign. Optional; the signer is chosen by whichever
    /// path ends up executing the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer_id: Option<String>,
    /// Target account or contract.
    pub receiver_id: String,
    /// Ordered, all-or-nothing batch of actions.
    pub actions: Vec<Action>,
}

/// One unit of work within a transaction.
///
/// Only [`Action::FunctionCall`] is eligible for local signing; every other
/// kind forces escalation to the primary wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all_fields = "camelCase")]
pub enum Action {
    /// Invoke a method on the receiving contract.
    FunctionCall {
        /// Contract method to invoke.
        method_name: String,
        /// JSON arguments passed to the method.
        #[serde(default)]
        args: serde_json::Value,
        /// Gas budget; defaults to
        /// [`DEFAULT_FUNCTION_CALL_GAS`](crate::DEFAULT_FUNCTION_CALL_GAS)
        /// when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gas: Option<NearGas>,
        /// Attached deposit; defaults to zero when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        deposit: Option<YoctoNear>,
    },
    /// Move tokens to the receiver.
    Transfer {
        /// Amount to transfer.
        deposit: YoctoNear,
    },
    /// Register a new access key on the signing account.
    AddKey {
        /// Public key being registered, `ed25519:<base58>`.
        public_key: String,
        /// Scope and budget granted to the key.
        access_key: AccessKey,
    },
    /// Remove an access key from the signing account.
    DeleteKey {
        /// Public key being removed.
        public_key: String,
    },
}

impl Action {
    /// The action's kind tag as it appears on the wire.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FunctionCall { .. } => "FunctionCall",
            Self::Transfer { .. } => "Transfer",
            Self::AddKey { .. } => "AddKey",
            Self::DeleteKey { .. } => "DeleteKey",
        }
    }
}

/// Permission envelope attached to an [`Action::AddKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessKey {
    /// The function-call permission granted to the key. The engine never
    /// registers full-access keys.
    pub permission: FunctionCallPermission,
}

/// A function-call-only key permission: one receiver, a method allow-list,
/// a spending allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallPermission {
    /// The single contract the key may call.
    pub receiver_id: String,
    /// Methods the key may invoke; empty means all methods on the receiver.
    pub method_names: Vec<String>,
    /// Spending budget, decremented by the network as the key is used.
    /// Absent means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowance: Option<YoctoNear>,
}

/// A function call after local-signing normalization: defaults filled in,
/// nothing optional left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallAction {
    /// Contract method to invoke.
    pub method_name: String,
    /// JSON arguments passed to the method.
    pub args: serde_json::Value,
    /// Concrete gas budget.
    pub gas: NearGas,
    /// Concrete attached deposit.
    pub deposit: YoctoNear,
}

/// The unsigned body of a locally constructed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The account the scoped key belongs to.
    pub signer_id: String,
    /// Public key the signature must verify against.
    pub public_key: String,
    /// Target contract.
    pub receiver_id: String,
    /// Normalized function calls, in submission order.
    pub actions: Vec<FunctionCallAction>,
}

/// A fully signed transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    /// The signed body.
    pub transaction: Transaction,
    /// ed25519 signature over the sha-256 hash of the body's canonical
    /// encoding, as `ed25519:<base58>`.
    pub signature: String,
}

/// The network's report on an executed transaction. Both signing paths
/// return this same shape, so callers are agnostic to which signer ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionOutcome {
    /// Hash of the executed transaction.
    pub transaction_hash: String,
    /// Terminal execution status.
    pub status: ExecutionStatus,
    /// Log lines emitted by the receipt chain.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub logs: Vec<String>,
}

/// Terminal status of an executed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Execution succeeded; carries the base64-encoded return value.
    SuccessValue(String),
    /// Execution failed on-chain; carries the failure description.
    Failure(String),
}

impl ExecutionOutcome {
    /// Whether the transaction executed successfully.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, ExecutionStatus::SuccessValue(_))
    }
}
