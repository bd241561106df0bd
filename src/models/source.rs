use crate::models::{is_valid_address, BuildError, Seed};

/// Identifies the account a transaction originates from.
///
/// A `Seed` source can also sign for itself. An `Address` source only names the
/// account; the transaction must then be signed by explicitly supplied seeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceAccount {
    Seed(Seed),
    Address(String),
}

impl SourceAccount {
    pub fn seed(seed: impl Into<Seed>) -> Self {
        SourceAccount::Seed(seed.into())
    }

    pub fn address(address: impl Into<String>) -> Self {
        SourceAccount::Address(address.into())
    }

    /// Resolves the `G…` address of the source account.
    pub fn resolve_address(&self) -> Result<String, BuildError> {
        match self {
            SourceAccount::Seed(seed) => seed
                .address()
                .map_err(|e| BuildError::InvalidSource(e.to_string())),
            SourceAccount::Address(address) if is_valid_address(address) => Ok(address.clone()),
            SourceAccount::Address(address) => Err(BuildError::InvalidSource(format!(
                "malformed address: {address}"
            ))),
        }
    }

    /// The seed that signs for this source when no explicit signers are given.
    pub fn signing_seed(&self) -> Option<&Seed> {
        match self {
            SourceAccount::Seed(seed) => Some(seed),
            SourceAccount::Address(_) => None,
        }
    }
}

impl From<Seed> for SourceAccount {
    fn from(seed: Seed) -> Self {
        SourceAccount::Seed(seed)
    }
}
