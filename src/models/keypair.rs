//! Seeds, addresses and key pairs.
//!
//! In Stellar terms the private key is a *seed* (`S…` strkey) and the public key is an
//! *address* (`G…` strkey). Seeds are held in zeroizing buffers and never printed.

use crate::models::SignError;
use ed25519_dalek::SigningKey;
use rand::RngCore;
use std::fmt;
use stellar_strkey::ed25519::{PrivateKey, PublicKey};
use zeroize::Zeroizing;

/// Secret key material in strkey form.
///
/// The string is not validated on construction; it is decoded when a transaction is
/// signed, so an invalid seed surfaces as a sign-stage error.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed(Zeroizing<String>);

impl Seed {
    pub fn new(seed: impl Into<String>) -> Self {
        Seed(Zeroizing::new(seed.into()))
    }

    /// The raw strkey. Callers must not log it.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Decodes the strkey into the 32-byte ed25519 secret.
    pub fn secret_bytes(&self) -> Result<Zeroizing<[u8; 32]>, SignError> {
        let private_key = PrivateKey::from_string(self.expose())
            .map_err(|e| SignError::InvalidSeed(e.to_string()))?;
        Ok(Zeroizing::new(private_key.0))
    }

    /// Derives the `G…` address controlled by this seed.
    pub fn address(&self) -> Result<String, SignError> {
        let secret = self.secret_bytes()?;
        let signing_key = SigningKey::from_bytes(&secret);
        Ok(PublicKey(signing_key.verifying_key().to_bytes()).to_string())
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(<redacted>)")
    }
}

impl From<&str> for Seed {
    fn from(seed: &str) -> Self {
        Seed::new(seed)
    }
}

impl From<String> for Seed {
    fn from(seed: String) -> Self {
        Seed::new(seed)
    }
}

/// A seed together with the address derived from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyPair {
    pub seed: Seed,
    pub address: String,
}

impl KeyPair {
    /// Generates a fresh key pair from the thread-local CSPRNG.
    pub fn random() -> Self {
        let mut secret = Zeroizing::new([0u8; 32]);
        rand::rng().fill_bytes(&mut secret[..]);
        Self::from_secret_bytes(&secret)
    }

    pub fn from_seed(seed: Seed) -> Result<Self, SignError> {
        let address = seed.address()?;
        Ok(Self { seed, address })
    }

    pub fn from_secret_bytes(secret: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(secret);
        let address = PublicKey(signing_key.verifying_key().to_bytes()).to_string();
        let seed = Seed::new(PrivateKey(*secret).to_string());
        Self { seed, address }
    }
}

/// Checks that `address` is a syntactically valid `G…` account strkey.
pub fn is_valid_address(address: &str) -> bool {
    PublicKey::from_string(address).is_ok()
}
