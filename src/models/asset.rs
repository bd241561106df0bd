//! Native and credit assets.

use crate::constants::{STELLAR_ALPHANUM4_CODE_LEN, STELLAR_MAX_ASSET_CODE_LEN};
use crate::models::BuildError;
use serde::{Deserialize, Serialize};
use soroban_rs::xdr::{
    AccountId, AlphaNum12, AlphaNum4, Asset as XdrAsset, AssetCode12, AssetCode4,
    ChangeTrustAsset, PublicKey as XdrPublicKey, Uint256,
};
use std::{fmt, str::FromStr};
use stellar_strkey::ed25519::PublicKey;

/// An asset is native (lumens) when both code and issuer are empty; otherwise it is a
/// credit asset identified by its code and issuing address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub code: String,
    pub issuer: String,
}

impl Asset {
    pub fn native() -> Self {
        Self::default()
    }

    pub fn credit(code: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            issuer: issuer.into(),
        }
    }

    pub fn is_native(&self) -> bool {
        self.code.is_empty() && self.issuer.is_empty()
    }

    fn validate_credit(&self) -> Result<(AccountId, &[u8]), BuildError> {
        let code = self.code.as_bytes();
        if code.is_empty()
            || code.len() > STELLAR_MAX_ASSET_CODE_LEN
            || !code.iter().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(BuildError::InvalidOperation(format!(
                "asset code must be 1-{STELLAR_MAX_ASSET_CODE_LEN} alphanumeric characters, got {:?}",
                self.code
            )));
        }
        let issuer = account_id_from_address(&self.issuer).map_err(|_| {
            BuildError::InvalidOperation(format!(
                "invalid issuer {:?} for asset {}",
                self.issuer, self.code
            ))
        })?;
        Ok((issuer, code))
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "native")
        } else {
            write!(f, "{}:{}", self.code, self.issuer)
        }
    }
}

/// Parses `native` or `CODE:ISSUER`.
impl FromStr for Asset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("native") {
            return Ok(Asset::native());
        }
        match s.split_once(':') {
            Some((code, issuer)) if !code.is_empty() && !issuer.is_empty() => {
                Ok(Asset::credit(code, issuer))
            }
            _ => Err(format!("expected 'native' or 'CODE:ISSUER', got {s:?}")),
        }
    }
}

impl TryFrom<&Asset> for XdrAsset {
    type Error = BuildError;

    fn try_from(asset: &Asset) -> Result<Self, Self::Error> {
        if asset.is_native() {
            return Ok(XdrAsset::Native);
        }
        let (issuer, code) = asset.validate_credit()?;
        if code.len() <= STELLAR_ALPHANUM4_CODE_LEN {
            let mut asset_code = [0u8; 4];
            asset_code[..code.len()].copy_from_slice(code);
            Ok(XdrAsset::CreditAlphanum4(AlphaNum4 {
                asset_code: AssetCode4(asset_code),
                issuer,
            }))
        } else {
            let mut asset_code = [0u8; 12];
            asset_code[..code.len()].copy_from_slice(code);
            Ok(XdrAsset::CreditAlphanum12(AlphaNum12 {
                asset_code: AssetCode12(asset_code),
                issuer,
            }))
        }
    }
}

impl TryFrom<&Asset> for ChangeTrustAsset {
    type Error = BuildError;

    fn try_from(asset: &Asset) -> Result<Self, Self::Error> {
        match XdrAsset::try_from(asset)? {
            XdrAsset::Native => Err(BuildError::InvalidOperation(
                "cannot change trust for the native asset".to_string(),
            )),
            XdrAsset::CreditAlphanum4(a) => Ok(ChangeTrustAsset::CreditAlphanum4(a)),
            XdrAsset::CreditAlphanum12(a) => Ok(ChangeTrustAsset::CreditAlphanum12(a)),
        }
    }
}

/// Parses a `G…` address into an XDR account id.
pub fn account_id_from_address(address: &str) -> Result<AccountId, BuildError> {
    let pk = PublicKey::from_string(address)
        .map_err(|e| BuildError::InvalidOperation(format!("invalid address {address:?}: {e}")))?;
    Ok(AccountId(XdrPublicKey::PublicKeyTypeEd25519(Uint256(pk.0))))
}
