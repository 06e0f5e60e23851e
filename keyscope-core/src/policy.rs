//! The decision function between autonomous signing and escalation.
//!
//! A conservative allow-list: any unrecognized action kind, unscoped method,
//! or receiver other than the credential's contract forces the safer,
//! interactive path. The whole action batch is inspected; a transaction is
//! atomic, so a single out-of-scope action disqualifies the batch.

use tracing::debug;

use crate::credential::ScopedCredential;
use crate::transaction::{Action, PendingTransaction};

/// Routing decision for one pending transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Sign with the scoped credential and submit directly.
    AllowLocal,
    /// Forward to the interactive primary wallet.
    Escalate,
}

/// Decides whether `tx` may be signed with `credential`.
///
/// Pure apart from trace output: no I/O, no store access. Escalates, in
/// order, on a missing credential, a foreign receiver, a non-function-call
/// action, or a method outside a non-empty allow-list; otherwise the local
/// path is allowed. An empty allow-list admits every method on the scoped
/// contract.
#[must_use]
pub fn evaluate(tx: &PendingTransaction, credential: Option<&ScopedCredential>) -> Decision {
    let Some(credential) = credential else {
        debug!("no scoped credential stored, escalating");
        return Decision::Escalate;
    };

    if !credential.matches_receiver(&tx.receiver_id) {
        debug!(
            receiver_id = %tx.receiver_id,
            contract_id = %credential.contract_id,
            "receiver outside credential scope, escalating"
        );
        return Decision::Escalate;
    }

    for action in &tx.actions {
        match action {
            Action::FunctionCall { method_name, .. } => {
                if !credential.allows_method(method_name) {
                    debug!(method = %method_name, "method outside credential scope, escalating");
                    return Decision::Escalate;
                }
            }
            other => {
                debug!(kind = other.kind(), "non-function-call action, escalating");
                return Decision::Escalate;
            }
        }
    }

    Decision::AllowLocal
}
