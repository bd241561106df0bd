use crate::models::{Asset, Memo, Seed, SourceAccount};

/// A payment request, consumed once by [`crate::domain::MicroStellar::pay`].
///
/// ```
/// use microstellar::models::{Asset, Payment, SourceAccount};
///
/// let payment = Payment::new(
///     SourceAccount::seed("S..."),
///     "GDEST...",
///     "12.5",
/// )
/// .with_asset(Asset::credit("USD", "GISSUER..."))
/// .with_memo_text("invoice 42");
/// assert!(!payment.asset.is_native());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payment {
    pub source: SourceAccount,
    pub target_address: String,
    pub amount: String,
    pub asset: Asset,
    pub memo: Memo,
    pub signer_seeds: Vec<Seed>,
}

impl Payment {
    /// A native payment of `amount` lumens from `source` to `target_address`.
    pub fn new(
        source: SourceAccount,
        target_address: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            source,
            target_address: target_address.into(),
            amount: amount.into(),
            asset: Asset::native(),
            memo: Memo::None,
            signer_seeds: Vec::new(),
        }
    }

    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.asset = asset;
        self
    }

    pub fn with_memo_text(mut self, text: impl Into<String>) -> Self {
        self.memo = Memo::Text(text.into());
        self
    }

    pub fn with_memo_id(mut self, id: u64) -> Self {
        self.memo = Memo::Id(id);
        self
    }

    /// Adds a signer. Once any signer is added, the source is no longer used to sign.
    pub fn with_signer(mut self, seed: impl Into<Seed>) -> Self {
        self.signer_seeds.push(seed.into());
        self
    }
}
