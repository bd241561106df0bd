//! Typed ledger operation descriptors and their XDR encoding.

use crate::constants::{STELLAR_MAX_HOME_DOMAIN_LEN, STELLAR_MAX_WEIGHT};
use crate::models::{account_id_from_address, Asset, BuildError};
use crate::utils::parse_positive_amount;
use serde::{Deserialize, Serialize};
use soroban_rs::xdr::{
    Asset as XdrAsset, ChangeTrustAsset, ChangeTrustOp, CreateAccountOp, MuxedAccount, Operation,
    OperationBody, PaymentOp, SetOptionsOp, Signer, SignerKey, String32, StringM, Uint256,
};
use stellar_strkey::ed25519::PublicKey;

/// Account authorization flags settable through `SetOptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountFlag {
    AuthRequired,
    AuthRevocable,
    AuthImmutable,
    AuthClawbackEnabled,
}

impl AccountFlag {
    pub fn bits(self) -> u32 {
        match self {
            AccountFlag::AuthRequired => 0x1,
            AccountFlag::AuthRevocable => 0x2,
            AccountFlag::AuthImmutable => 0x4,
            AccountFlag::AuthClawbackEnabled => 0x8,
        }
    }

    pub fn combine(flags: &[AccountFlag]) -> u32 {
        flags.iter().fold(0, |acc, flag| acc | flag.bits())
    }
}

/// Trust line limit for `ChangeTrust`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrustLimit {
    Unlimited,
    Limited(String),
    /// Limit zero: deletes the trust line.
    Remove,
}

impl TrustLimit {
    /// An empty limit string means "no limit".
    pub fn from_limit_str(limit: &str) -> Self {
        if limit.is_empty() {
            TrustLimit::Unlimited
        } else {
            TrustLimit::Limited(limit.to_string())
        }
    }

    fn stroops(&self) -> Result<i64, BuildError> {
        match self {
            TrustLimit::Unlimited => Ok(i64::MAX),
            TrustLimit::Limited(limit) => Ok(parse_positive_amount(limit)?),
            TrustLimit::Remove => Ok(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationSpec {
    CreateAccount {
        destination: String,
        starting_balance: String,
    },
    Payment {
        destination: String,
        asset: Asset,
        amount: String,
    },
    ChangeTrust {
        asset: Asset,
        limit: TrustLimit,
    },
    SetMasterWeight {
        weight: u32,
    },
    AddSigner {
        address: String,
        weight: u32,
    },
    RemoveSigner {
        address: String,
    },
    SetThresholds {
        low: u32,
        medium: u32,
        high: u32,
    },
    SetHomeDomain {
        domain: String,
    },
    SetFlags {
        flags: Vec<AccountFlag>,
    },
    ClearFlags {
        flags: Vec<AccountFlag>,
    },
}

fn check_weight(name: &str, value: u32) -> Result<u32, BuildError> {
    if value > STELLAR_MAX_WEIGHT {
        return Err(BuildError::InvalidOperation(format!(
            "{name} must be at most {STELLAR_MAX_WEIGHT}, got {value}"
        )));
    }
    Ok(value)
}

fn signer_key(address: &str) -> Result<SignerKey, BuildError> {
    let pk = PublicKey::from_string(address).map_err(|e| {
        BuildError::InvalidOperation(format!("invalid signer address {address:?}: {e}"))
    })?;
    Ok(SignerKey::Ed25519(Uint256(pk.0)))
}

fn muxed_destination(address: &str) -> Result<MuxedAccount, BuildError> {
    let pk = PublicKey::from_string(address).map_err(|e| {
        BuildError::InvalidOperation(format!("invalid destination {address:?}: {e}"))
    })?;
    Ok(MuxedAccount::Ed25519(Uint256(pk.0)))
}

fn empty_set_options() -> SetOptionsOp {
    SetOptionsOp {
        inflation_dest: None,
        clear_flags: None,
        set_flags: None,
        master_weight: None,
        low_threshold: None,
        med_threshold: None,
        high_threshold: None,
        home_domain: None,
        signer: None,
    }
}

impl TryFrom<&OperationSpec> for Operation {
    type Error = BuildError;

    fn try_from(spec: &OperationSpec) -> Result<Self, Self::Error> {
        let body = match spec {
            OperationSpec::CreateAccount {
                destination,
                starting_balance,
            } => OperationBody::CreateAccount(CreateAccountOp {
                destination: account_id_from_address(destination)?,
                starting_balance: parse_positive_amount(starting_balance)?,
            }),
            OperationSpec::Payment {
                destination,
                asset,
                amount,
            } => OperationBody::Payment(PaymentOp {
                destination: muxed_destination(destination)?,
                asset: XdrAsset::try_from(asset)?,
                amount: parse_positive_amount(amount)?,
            }),
            OperationSpec::ChangeTrust { asset, limit } => OperationBody::ChangeTrust(ChangeTrustOp {
                line: ChangeTrustAsset::try_from(asset)?,
                limit: limit.stroops()?,
            }),
            OperationSpec::SetMasterWeight { weight } => OperationBody::SetOptions(SetOptionsOp {
                master_weight: Some(check_weight("master weight", *weight)?),
                ..empty_set_options()
            }),
            OperationSpec::AddSigner { address, weight } => {
                OperationBody::SetOptions(SetOptionsOp {
                    signer: Some(Signer {
                        key: signer_key(address)?,
                        weight: check_weight("signer weight", *weight)?,
                    }),
                    ..empty_set_options()
                })
            }
            // A signer with weight zero is removed from the account.
            OperationSpec::RemoveSigner { address } => OperationBody::SetOptions(SetOptionsOp {
                signer: Some(Signer {
                    key: signer_key(address)?,
                    weight: 0,
                }),
                ..empty_set_options()
            }),
            OperationSpec::SetThresholds { low, medium, high } => {
                OperationBody::SetOptions(SetOptionsOp {
                    low_threshold: Some(check_weight("low threshold", *low)?),
                    med_threshold: Some(check_weight("medium threshold", *medium)?),
                    high_threshold: Some(check_weight("high threshold", *high)?),
                    ..empty_set_options()
                })
            }
            OperationSpec::SetHomeDomain { domain } => {
                if domain.len() > STELLAR_MAX_HOME_DOMAIN_LEN {
                    return Err(BuildError::InvalidOperation(format!(
                        "home domain is {} bytes, the maximum is {STELLAR_MAX_HOME_DOMAIN_LEN}",
                        domain.len()
                    )));
                }
                let domain = StringM::<32>::try_from(domain.as_str())
                    .map_err(|e| BuildError::InvalidOperation(e.to_string()))?;
                OperationBody::SetOptions(SetOptionsOp {
                    home_domain: Some(String32(domain)),
                    ..empty_set_options()
                })
            }
            OperationSpec::SetFlags { flags } => OperationBody::SetOptions(SetOptionsOp {
                set_flags: Some(AccountFlag::combine(flags)),
                ..empty_set_options()
            }),
            OperationSpec::ClearFlags { flags } => OperationBody::SetOptions(SetOptionsOp {
                clear_flags: Some(AccountFlag::combine(flags)),
                ..empty_set_options()
            }),
        };

        Ok(Operation {
            source_account: None,
            body,
        })
    }
}
