//! Key-ring provisioning.
//!
//! A production deployment supplies key material out-of-band as a JSON
//! key file: an array of records with hex-encoded id and material plus
//! the activation window in unix seconds. How that file is distributed
//! (secret store, mounted volume) is the operator's concern.
//!
//! Without a key file the server generates a single ephemeral key so
//! development setups work out of the box; everything protected under
//! it is unrecoverable once the process exits.

use std::path::Path;

use sealbox_crypto::{KEY_ID_SIZE, KEY_MATERIAL_SIZE, Key, KeyId, KeyMaterial, KeyRing};
use serde::Deserialize;

use crate::error::ServerError;

/// Lifetime of the ephemeral development key.
const EPHEMERAL_KEY_LIFETIME_SECS: u64 = 90 * 24 * 60 * 60;

/// One key in the key file.
#[derive(Debug, Deserialize)]
struct KeyRecord {
    /// Key id, hex-encoded (32 hex chars)
    id: String,
    /// Key material, hex-encoded (64 hex chars)
    material: String,
    /// Creation timestamp, unix seconds
    created_at: u64,
    /// Activation window start, unix seconds
    not_before: u64,
    /// Activation window end, unix seconds
    not_after: u64,
}

impl KeyRecord {
    fn into_key(self) -> Result<Key, ServerError> {
        let id = decode_exact::<KEY_ID_SIZE>("key id", &self.id)?;
        let material = decode_exact::<KEY_MATERIAL_SIZE>("key material", &self.material)?;

        Ok(Key::new(
            KeyId::from_bytes(id),
            KeyMaterial::new(material),
            self.created_at,
            self.not_before,
            self.not_after,
        ))
    }
}

/// Load a key ring from a JSON key file.
///
/// # Errors
///
/// `KeyFile` if the file cannot be read, is not valid JSON, contains
/// no keys, or contains a record with malformed id or material.
pub fn load_key_ring(path: &Path) -> Result<KeyRing, ServerError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| ServerError::KeyFile(format!("cannot read {}: {err}", path.display())))?;

    let records: Vec<KeyRecord> = serde_json::from_str(&raw)
        .map_err(|err| ServerError::KeyFile(format!("cannot parse {}: {err}", path.display())))?;

    if records.is_empty() {
        return Err(ServerError::KeyFile(format!("{} contains no keys", path.display())));
    }

    let mut ring = KeyRing::new();
    for record in records {
        ring.insert(record.into_key()?);
    }
    Ok(ring)
}

/// Generate a single-key ring for development use.
pub fn ephemeral_key_ring() -> KeyRing {
    KeyRing::from_keys([Key::generate(wall_clock_secs(), EPHEMERAL_KEY_LIFETIME_SECS)])
}

fn decode_exact<const N: usize>(field: &'static str, value: &str) -> Result<[u8; N], ServerError> {
    let bytes = hex::decode(value)
        .map_err(|err| ServerError::KeyFile(format!("{field} is not valid hex: {err}")))?;

    <[u8; N]>::try_from(bytes).map_err(|bytes: Vec<u8>| {
        ServerError::KeyFile(format!("{field} must be {N} bytes, got {}", bytes.len()))
    })
}

#[allow(clippy::expect_used)]
fn wall_clock_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("invariant: system clock is after Unix epoch (1970-01-01)")
        .as_secs()
}
