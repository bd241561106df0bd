//! Data model: keys, assets, memos, payments, operations and account snapshots.

mod account;
pub use account::*;

mod asset;
pub use asset::*;

mod error;
pub use error::*;

mod horizon;
pub use horizon::*;

mod keypair;
pub use keypair::*;

mod memo;
pub use memo::*;

mod operation;
pub use operation::*;

mod payment;
pub use payment::*;

mod source;
pub use source::*;
