//! The word arithmetic kernel: pure, total functions over concrete 256-bit
//! values. Nothing in this module builds IR nodes — see [`crate::ctor`] for
//! the smart-constructor layer that wraps these functions with the
//! concrete/symbolic folding decision.

pub mod arith;
mod wide;

/// The crate's concrete 256-bit integer type.
///
/// Grounded in how the `other_examples` EVM crates (`revm`, `eth_vm`)
/// represent EVM words: a fixed-width unsigned integer from the `ruint`
/// family (`alloy-primitives::U256` is itself `ruint::Uint<256, 4>`).
pub type U256 = ruint::aliases::U256;

pub(crate) use wide::mulmod_wide;
pub(crate) use wide::addmod_wide;
