use crate::balance::{NearGas, YoctoNear};

/// Spending allowance granted to a freshly registered scoped key when the
/// caller does not supply one: 0.25 NEAR in yocto.
///
/// The value is load-bearing for compatibility with records written by
/// earlier front-end iterations; do not change it without a migration.
pub const DEFAULT_KEY_ALLOWANCE: YoctoNear =
    YoctoNear::from_yocto(250_000_000_000_000_000_000_000);

/// Gas attached to a locally signed function call when the transaction does
/// not specify one: 30 Tgas.
pub const DEFAULT_FUNCTION_CALL_GAS: NearGas = NearGas::from_gas(30_000_000_000_000);
