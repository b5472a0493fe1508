//! # Shared Types Crate
//!
//! Wire primitives shared by the Klaytn decode subsystem.
//!
//! ## Design Principles
//!
//! - **Strict input**: hex must carry the `0x` prefix; either case is accepted.
//! - **Canonical output**: lowercase, minimal digits for quantities, full width
//!   for addresses and hashes.

pub mod entities;
pub mod errors;
pub mod hex;

pub use entities::*;
pub use errors::*;
