//! Constants shared across the client.
mod http_client;
pub use http_client::*;

mod logging;
pub use logging::*;

mod stellar_transaction;
pub use stellar_transaction::*;
