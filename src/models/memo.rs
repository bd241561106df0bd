use crate::constants::STELLAR_MAX_MEMO_TEXT_LEN;
use crate::models::BuildError;
use serde::{Deserialize, Serialize};
use soroban_rs::xdr::{Memo as XdrMemo, StringM};

/// Memo attached to a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Memo {
    #[default]
    None,
    Text(String),
    Id(u64),
}

impl TryFrom<&Memo> for XdrMemo {
    type Error = BuildError;

    fn try_from(memo: &Memo) -> Result<Self, Self::Error> {
        match memo {
            Memo::None => Ok(XdrMemo::None),
            Memo::Text(text) => {
                if text.len() > STELLAR_MAX_MEMO_TEXT_LEN {
                    return Err(BuildError::InvalidMemo(format!(
                        "text memo is {} bytes, the maximum is {STELLAR_MAX_MEMO_TEXT_LEN}",
                        text.len()
                    )));
                }
                let text = StringM::<28>::try_from(text.as_str())
                    .map_err(|e| BuildError::InvalidMemo(e.to_string()))?;
                Ok(XdrMemo::Text(text))
            }
            Memo::Id(id) => Ok(XdrMemo::Id(*id)),
        }
    }
}
