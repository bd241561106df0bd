//! Account snapshots.

use crate::models::{Asset, HorizonAccountResponse};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub asset: Asset,
    pub amount: String,
    /// Trust line limit; empty for the native balance.
    pub limit: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSigner {
    pub key: String,
    pub weight: u32,
    pub signer_type: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    pub low: u8,
    pub medium: u8,
    pub high: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    pub auth_required: bool,
    pub auth_revocable: bool,
    pub auth_immutable: bool,
    pub auth_clawback_enabled: bool,
}

/// Read-only snapshot of an account as the ledger reported it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub address: String,
    pub sequence: i64,
    pub balances: Vec<Balance>,
    pub native_balance: Balance,
    pub signers: Vec<AccountSigner>,
    pub thresholds: Thresholds,
    pub flags: Flags,
    pub home_domain: String,
}

impl Account {
    /// Zero-valued snapshot used when no network is involved.
    pub fn empty(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            native_balance: Balance {
                asset: Asset::native(),
                amount: "0".to_string(),
                limit: String::new(),
            },
            ..Default::default()
        }
    }

    /// Balance held in `asset`, if the account holds it or trusts it.
    pub fn get_balance(&self, asset: &Asset) -> Option<&str> {
        if asset.is_native() {
            return Some(self.native_balance.amount.as_str());
        }
        self.balances
            .iter()
            .find(|b| &b.asset == asset)
            .map(|b| b.amount.as_str())
    }

    pub fn get_native_balance(&self) -> &str {
        &self.native_balance.amount
    }

    /// Weight of the account's own key, zero when the master key was disabled.
    pub fn get_master_weight(&self) -> u32 {
        self.signers
            .iter()
            .find(|s| s.key == self.address)
            .map(|s| s.weight)
            .unwrap_or(0)
    }
}

impl TryFrom<HorizonAccountResponse> for Account {
    type Error = String;

    fn try_from(response: HorizonAccountResponse) -> Result<Self, Self::Error> {
        let sequence = response
            .sequence
            .parse::<i64>()
            .map_err(|e| format!("invalid sequence {:?}: {e}", response.sequence))?;

        let mut native_balance = Balance {
            asset: Asset::native(),
            amount: "0".to_string(),
            limit: String::new(),
        };
        let mut balances = Vec::with_capacity(response.balances.len());
        for b in response.balances {
            let balance = Balance {
                asset: Asset::credit(
                    b.asset_code.unwrap_or_default(),
                    b.asset_issuer.unwrap_or_default(),
                ),
                amount: b.balance,
                limit: b.limit.unwrap_or_default(),
            };
            if b.asset_type == "native" {
                native_balance = balance.clone();
            }
            balances.push(balance);
        }

        Ok(Self {
            address: response.account_id,
            sequence,
            balances,
            native_balance,
            signers: response
                .signers
                .into_iter()
                .map(|s| AccountSigner {
                    key: s.key,
                    weight: s.weight,
                    signer_type: s.signer_type,
                })
                .collect(),
            thresholds: Thresholds {
                low: response.thresholds.low_threshold,
                medium: response.thresholds.med_threshold,
                high: response.thresholds.high_threshold,
            },
            flags: Flags {
                auth_required: response.flags.auth_required,
                auth_revocable: response.flags.auth_revocable,
                auth_immutable: response.flags.auth_immutable,
                auth_clawback_enabled: response.flags.auth_clawback_enabled,
            },
            home_domain: response.home_domain.unwrap_or_default(),
        })
    }
}
