//! # Local Signer
//!
//! Signs Stellar transactions with an ed25519 key decoded from a seed held in memory.
//! The key bytes are zeroized when the signer is dropped, which happens right after
//! the signing step of a pipeline.

use super::transaction_hash;
use crate::models::{Seed, SignError};
use ed25519_dalek::{Signer as _, SigningKey};
use soroban_rs::xdr::{DecoratedSignature, Hash, Signature, SignatureHint, Transaction};
use stellar_strkey::ed25519::PublicKey;

pub struct LocalSigner {
    signing_key: SigningKey,
}

impl LocalSigner {
    pub fn from_seed(seed: &Seed) -> Result<Self, SignError> {
        let secret = seed.secret_bytes()?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&secret),
        })
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    pub fn address(&self) -> String {
        PublicKey(self.public_key()).to_string()
    }

    /// Last four bytes of the public key, used by the ledger to match signatures to signers.
    pub fn signature_hint(&self) -> SignatureHint {
        let public_key = self.public_key();
        let mut hint = [0u8; 4];
        hint.copy_from_slice(&public_key[28..]);
        SignatureHint(hint)
    }

    pub fn sign_transaction(
        &self,
        transaction: &Transaction,
        network_id: &Hash,
    ) -> Result<DecoratedSignature, SignError> {
        let hash = transaction_hash(transaction, network_id)
            .map_err(|e| SignError::Encoding(e.to_string()))?;
        let signature = self.signing_key.sign(&hash);
        let signature = Signature(
            signature
                .to_bytes()
                .to_vec()
                .try_into()
                .map_err(|e: soroban_rs::xdr::Error| SignError::Encoding(e.to_string()))?,
        );

        Ok(DecoratedSignature {
            hint: self.signature_hint(),
            signature,
        })
    }
}
