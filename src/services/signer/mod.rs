//! Transaction signing with locally held seeds.

mod local_signer;
pub use local_signer::*;

use sha2::{Digest, Sha256};
use soroban_rs::xdr::{
    Hash, Limits, Transaction, TransactionSignaturePayload,
    TransactionSignaturePayloadTaggedTransaction, WriteXdr,
};

/// Network id: SHA-256 of the network passphrase.
pub fn network_id(passphrase: &str) -> Hash {
    Hash(Sha256::digest(passphrase.as_bytes()).into())
}

/// Create signature payload for a transaction directly (for operations-based signing)
pub fn create_transaction_signature_payload(
    transaction: &Transaction,
    network_id: &Hash,
) -> TransactionSignaturePayload {
    TransactionSignaturePayload {
        network_id: network_id.clone(),
        tagged_transaction: TransactionSignaturePayloadTaggedTransaction::Tx(transaction.clone()),
    }
}

/// Transaction hash as the ledger computes it: SHA-256 of the XDR signature payload.
pub fn transaction_hash(
    transaction: &Transaction,
    network_id: &Hash,
) -> Result<[u8; 32], soroban_rs::xdr::Error> {
    let payload = create_transaction_signature_payload(transaction, network_id);
    let bytes = payload.to_xdr(Limits::none())?;
    Ok(Sha256::digest(bytes).into())
}
