//! Content digests of canonical JSON.
//!
//! Hash input is the UTF-8 bytes of the compact canonical JSON text, fed
//! into SHA-256.  Key order is fixed by `canonicalize`, so the digest depends
//! only on content.  This is an identity hash, not an authentication tag.

use serde_json::Value;
use sha2::{Digest, Sha256};

use indsure_contracts::error::IndsureResult;

use crate::{canonical::canonical_string, strip::strip_volatile_fields};

/// SHA-256 of the canonical form of `value`, as 64 lowercase hex chars.
pub fn hash_value(value: &Value) -> IndsureResult<String> {
    let text = canonical_string(value)?;
    Ok(sha256_hex(text.as_bytes()))
}

/// Hash of a report with the default volatile fields removed.
pub fn report_hash(report: &Value) -> IndsureResult<String> {
    hash_value(&strip_volatile_fields(report))
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
