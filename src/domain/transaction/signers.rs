use crate::models::{Seed, SignError, SourceAccount};

/// Picks the seeds that sign an envelope.
///
/// Explicit signers win and are used in the order given; the source seed is then
/// not used even when one is available. With no explicit signers the source must
/// be a seed and signs for itself.
pub fn resolve_signers<'a>(
    source: &'a SourceAccount,
    signers: &'a [Seed],
) -> Result<Vec<&'a Seed>, SignError> {
    if !signers.is_empty() {
        return Ok(signers.iter().collect());
    }
    source
        .signing_seed()
        .map(|seed| vec![seed])
        .ok_or(SignError::NoSigners)
}
