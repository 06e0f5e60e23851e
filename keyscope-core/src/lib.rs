#![deny(clippy::all)]
#![warn(clippy::pedantic, clippy::nursery)]
//! Access-delegation engine for account-based-chain wallets.
//!
//! Sits between an application and an interactive primary wallet and
//! decides, per outgoing transaction, whether it can be signed autonomously
//! with a narrowly-scoped local key pair or must be escalated to the wallet
//! for approval. See [`DelegationMiddleware`] for the composition point.

use strum::{Display, EnumString};

/// The network a scoped credential and its transactions target.
///
/// Only used to pick default RPC endpoints for callers wiring up a
/// [`NetworkProvider`]; the engine itself never opens a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Network {
    Testnet,
    Mainnet,
}

impl Network {
    /// Default JSON-RPC endpoint for this network.
    #[must_use]
    pub const fn rpc_url(self) -> &'static str {
        match self {
            Self::Testnet => "https://test.rpc.fastnear.com",
            Self::Mainnet => "https://free.rpc.fastnear.com",
        }
    }
}

mod balance;
pub use balance::*;

mod credential;
pub use credential::*;

mod defaults;
pub use defaults::*;

mod error;
pub use error::*;

mod keys;
pub use keys::*;

mod middleware;
pub use middleware::*;

mod oracle;
pub use oracle::*;

pub mod policy;
pub use policy::Decision;

mod provider;
pub use provider::*;

mod signer;
pub use signer::*;

mod store;
pub use store::*;

mod transaction;
pub use transaction::*;

mod wallet;
pub use wallet::*;
