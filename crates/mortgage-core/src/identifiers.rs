//! Opaque identifiers derived from the input, so identical requests yield
//! identical results.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::MortgageResult;

const ID_HEX_LEN: usize = 8;

/// `<prefix>_<first 8 hex chars of SHA-256(canonical JSON)>`.
pub fn derive_id(prefix: &str, value: &impl Serialize) -> MortgageResult<String> {
    let canonical = serde_json::to_vec(value)?;
    let digest = Sha256::digest(&canonical);
    let hex: String = digest
        .iter()
        .take(ID_HEX_LEN / 2)
        .map(|b| format!("{b:02x}"))
        .collect();
    Ok(format!("{prefix}_{hex}"))
}
