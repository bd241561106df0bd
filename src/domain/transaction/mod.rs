//! Transaction pipeline and signer resolution.
mod signers;
pub use signers::*;

mod tx;
pub use tx::*;
