//! Shared doubles for the integration suite: a scriptable primary wallet
//! and a scriptable network transport.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use keyscope_core::{
    AccessKeyView, DelegationError, ExecutionOutcome, ExecutionStatus, NetworkProvider,
    PendingTransaction, PrimaryWallet, SignedTransaction, WalletAccount, YoctoNear,
};
use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber honoring `RUST_LOG` so routing decisions show
/// up in test output. Later calls are no-ops; tests share one process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A primary wallet double that records every call and can be scripted to
/// fail, reject, or report a disconnected session.
pub struct MockWallet {
    accounts: Vec<WalletAccount>,
    connected: AtomicBool,
    fail_next_send: Mutex<Option<String>>,
    reject_next_send: AtomicBool,
    fail_sign_out: AtomicBool,
    pub sent: Mutex<Vec<PendingTransaction>>,
    pub sign_outs: AtomicUsize,
}

impl MockWallet {
    pub fn connected(account_id: &str) -> Self {
        Self {
            accounts: vec![WalletAccount {
                account_id: account_id.to_string(),
                public_key: None,
            }],
            connected: AtomicBool::new(true),
            fail_next_send: Mutex::new(None),
            reject_next_send: AtomicBool::new(false),
            fail_sign_out: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
            sign_outs: AtomicUsize::new(0),
        }
    }

    pub fn with_no_accounts() -> Self {
        let mut wallet = Self::connected("unused");
        wallet.accounts.clear();
        wallet
    }

    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    /// The next sign-and-send call errors before reaching the chain.
    pub fn fail_next_send(&self, error: &str) {
        *self.fail_next_send.lock().unwrap() = Some(error.to_string());
    }

    /// The next sign-and-send call returns an on-chain `Failure` status.
    pub fn reject_next_send(&self) {
        self.reject_next_send.store(true, Ordering::SeqCst);
    }

    pub fn fail_sign_out(&self) {
        self.fail_sign_out.store(true, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl PrimaryWallet for MockWallet {
    async fn get_accounts(&self) -> Result<Vec<WalletAccount>, DelegationError> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(DelegationError::NotConnected);
        }
        Ok(self.accounts.clone())
    }

    async fn sign_and_send_transaction(
        &self,
        tx: &PendingTransaction,
    ) -> Result<ExecutionOutcome, DelegationError> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(DelegationError::NotConnected);
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(tx.clone());
        let sequence = sent.len();
        drop(sent);

        if let Some(error) = self.fail_next_send.lock().unwrap().take() {
            return Err(DelegationError::Submission { error });
        }
        let status = if self.reject_next_send.swap(false, Ordering::SeqCst) {
            ExecutionStatus::Failure("registration rejected".to_string())
        } else {
            ExecutionStatus::SuccessValue(String::new())
        };
        Ok(ExecutionOutcome {
            transaction_hash: format!("primary-{sequence}"),
            status,
            logs: vec![],
        })
    }

    async fn sign_out(&self) -> Result<(), DelegationError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign_out.swap(false, Ordering::SeqCst) {
            return Err(DelegationError::Rpc {
                error: "session teardown failed".to_string(),
            });
        }
        Ok(())
    }
}

/// A network transport double with a scriptable access-key view.
pub struct MockProvider {
    allowance: Mutex<Option<YoctoNear>>,
    fail_query: AtomicBool,
    fail_next_submit: Mutex<Option<String>>,
    pub submissions: Mutex<Vec<SignedTransaction>>,
}

impl MockProvider {
    /// A provider reporting a healthy nonzero allowance.
    pub fn healthy() -> Self {
        Self {
            allowance: Mutex::new(Some(YoctoNear::from_yocto(
                249_000_000_000_000_000_000_000,
            ))),
            fail_query: AtomicBool::new(false),
            fail_next_submit: Mutex::new(None),
            submissions: Mutex::new(Vec::new()),
        }
    }

    pub fn set_allowance(&self, allowance: Option<YoctoNear>) {
        *self.allowance.lock().unwrap() = allowance;
    }

    pub fn fail_queries(&self) {
        self.fail_query.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_submit(&self, error: &str) {
        *self.fail_next_submit.lock().unwrap() = Some(error.to_string());
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

#[async_trait]
impl NetworkProvider for MockProvider {
    async fn submit(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<ExecutionOutcome, DelegationError> {
        let mut submissions = self.submissions.lock().unwrap();
        submissions.push(transaction.clone());
        let sequence = submissions.len();
        drop(submissions);

        if let Some(error) = self.fail_next_submit.lock().unwrap().take() {
            return Err(DelegationError::Submission { error });
        }
        Ok(ExecutionOutcome {
            transaction_hash: format!("local-{sequence}"),
            status: ExecutionStatus::SuccessValue(String::new()),
            logs: vec![],
        })
    }

    async fn query_access_key(
        &self,
        _account_id: &str,
        _public_key: &str,
    ) -> Result<AccessKeyView, DelegationError> {
        if self.fail_query.load(Ordering::SeqCst) {
            return Err(DelegationError::Rpc {
                error: "access key query failed".to_string(),
            });
        }
        Ok(AccessKeyView {
            nonce: 1,
            allowance: *self.allowance.lock().unwrap(),
        })
    }
}
