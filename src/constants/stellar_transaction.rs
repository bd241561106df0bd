//! Constants for Stellar transaction assembly.
//!
//! Network passphrases, Horizon endpoints, fee defaults and the XDR limits the
//! pipeline checks before handing an envelope to the network.

/// Base fee per operation, in stroops.
pub const STELLAR_DEFAULT_TRANSACTION_FEE: u32 = 100;
/// Maximum number of operations allowed in a Stellar transaction
pub const STELLAR_MAX_OPERATIONS: usize = 100;
/// Maximum number of signatures an envelope can carry
pub const STELLAR_MAX_SIGNATURES: usize = 20;

/// Number of stroops in one unit of any asset (7 decimal places).
pub const STELLAR_STROOPS_PER_UNIT: i64 = 10_000_000;
/// Decimal places carried by Stellar amounts.
pub const STELLAR_AMOUNT_DECIMALS: usize = 7;

/// Maximum byte length of a text memo.
pub const STELLAR_MAX_MEMO_TEXT_LEN: usize = 28;
/// Maximum byte length of an account home domain.
pub const STELLAR_MAX_HOME_DOMAIN_LEN: usize = 32;
/// Maximum length of a credit asset code.
pub const STELLAR_MAX_ASSET_CODE_LEN: usize = 12;
/// Asset codes up to this length are encoded as `credit_alphanum4`.
pub const STELLAR_ALPHANUM4_CODE_LEN: usize = 4;
/// Signer weights and thresholds are single bytes on the ledger.
pub const STELLAR_MAX_WEIGHT: u32 = 255;

/// Passphrase of the public Stellar network
pub const STELLAR_PUBLIC_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";
/// Passphrase of the SDF test network
pub const STELLAR_TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// Horizon API base URL for Stellar mainnet
pub const STELLAR_HORIZON_MAINNET_URL: &str = "https://horizon.stellar.org";
/// Horizon API base URL for Stellar testnet
pub const STELLAR_HORIZON_TESTNET_URL: &str = "https://horizon-testnet.stellar.org";
