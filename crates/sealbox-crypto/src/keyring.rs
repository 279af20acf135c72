//! Key ring: master keys with activation windows.
//!
//! The ring holds every key the service knows about, keyed by id. New
//! protect calls always use the "current" key - the active key with the
//! latest `not_before`, ties broken by latest `created_at` - while
//! unprotect calls look keys up by the id recorded in the envelope, so
//! data protected before a rotation stays recoverable until the old key
//! is explicitly revoked.
//!
//! The ring is built during startup/provisioning and is read-only while
//! requests are served. Rotation swaps the whole ring behind an `Arc`;
//! nothing on the cryptographic path ever mutates it.

use std::{collections::HashMap, fmt};

use zeroize::Zeroize;

use crate::{error::ProtectError, rng};

/// Size of a key identifier in bytes.
pub const KEY_ID_SIZE: usize = 16;

/// Size of master key material in bytes (256 bits).
pub const KEY_MATERIAL_SIZE: usize = 32;

/// Opaque identifier for a master key.
///
/// Generated from the OS CSPRNG; rendered as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyId([u8; KEY_ID_SIZE]);

impl KeyId {
    /// Create a key id from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_ID_SIZE]) -> Self {
        Self(bytes)
    }

    /// Generate a fresh random key id.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_ID_SIZE];
        rng::fill(&mut bytes);
        Self(bytes)
    }

    /// Raw id bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_ID_SIZE] {
        &self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyId({self})")
    }
}

/// Master key material, zeroized on drop.
///
/// `Debug` prints a redacted placeholder; the bytes never appear in
/// logs or error messages.
#[derive(Clone)]
pub struct KeyMaterial([u8; KEY_MATERIAL_SIZE]);

impl KeyMaterial {
    /// Wrap raw key material.
    pub fn new(bytes: [u8; KEY_MATERIAL_SIZE]) -> Self {
        Self(bytes)
    }

    /// Generate fresh random key material.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_MATERIAL_SIZE];
        rng::fill(&mut bytes);
        Self(bytes)
    }

    /// Raw key bytes (use with caution).
    pub fn as_bytes(&self) -> &[u8; KEY_MATERIAL_SIZE] {
        &self.0
    }
}

impl Drop for KeyMaterial {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyMaterial([REDACTED {KEY_MATERIAL_SIZE} bytes])")
    }
}

/// A master key with its activation window.
///
/// Immutable once created. Timestamps are unix seconds. The key is
/// usable for new protect calls while `not_before <= now < not_after`;
/// outside that window it can still unprotect existing envelopes as
/// long as it remains in the ring.
#[derive(Debug, Clone)]
pub struct Key {
    id: KeyId,
    material: KeyMaterial,
    created_at: u64,
    not_before: u64,
    not_after: u64,
}

impl Key {
    /// Create a key from explicit parts.
    pub fn new(
        id: KeyId,
        material: KeyMaterial,
        created_at: u64,
        not_before: u64,
        not_after: u64,
    ) -> Self {
        Self { id, material, created_at, not_before, not_after }
    }

    /// Generate a fresh key active from `now` for `lifetime_secs`.
    pub fn generate(now: u64, lifetime_secs: u64) -> Self {
        Self {
            id: KeyId::generate(),
            material: KeyMaterial::generate(),
            created_at: now,
            not_before: now,
            not_after: now.saturating_add(lifetime_secs),
        }
    }

    /// Key identifier.
    pub fn id(&self) -> KeyId {
        self.id
    }

    /// Master key material.
    pub fn material(&self) -> &KeyMaterial {
        &self.material
    }

    /// Creation timestamp (unix seconds).
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Start of the activation window (unix seconds, inclusive).
    pub fn not_before(&self) -> u64 {
        self.not_before
    }

    /// End of the activation window (unix seconds, exclusive).
    pub fn not_after(&self) -> u64 {
        self.not_after
    }

    /// Whether the key may encrypt at instant `now`.
    pub fn is_active_at(&self, now: u64) -> bool {
        self.not_before <= now && now < self.not_after
    }
}

/// Collection of master keys, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct KeyRing {
    keys: HashMap<KeyId, Key>,
}

impl KeyRing {
    /// Create an empty ring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ring from a set of keys.
    ///
    /// Later keys replace earlier ones with the same id.
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        let mut ring = Self::new();
        for key in keys {
            ring.insert(key);
        }
        ring
    }

    /// Add a key to the ring (administrative; not reachable from the
    /// protect/unprotect path).
    pub fn insert(&mut self, key: Key) {
        self.keys.insert(key.id(), key);
    }

    /// Remove a key from the ring, making its envelopes permanently
    /// unrecoverable (administrative).
    pub fn revoke(&mut self, id: &KeyId) -> Option<Key> {
        self.keys.remove(id)
    }

    /// The key new protect calls should use at instant `now`.
    ///
    /// This is the active key with the latest `not_before`; ties are
    /// broken by latest `created_at`, so at most one key is current at
    /// any instant.
    pub fn current_key(&self, now: u64) -> Result<&Key, ProtectError> {
        self.keys
            .values()
            .filter(|key| key.is_active_at(now))
            .max_by_key(|key| (key.not_before(), key.created_at()))
            .ok_or(ProtectError::NoActiveKey)
    }

    /// Look up a key by id, regardless of its activation window.
    ///
    /// Expired keys stay resolvable here so envelopes produced before a
    /// rotation can still be unprotected.
    pub fn lookup(&self, id: &KeyId) -> Result<&Key, ProtectError> {
        self.keys.get(id).ok_or(ProtectError::UnknownKey { id: *id })
    }

    /// Number of keys in the ring.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the ring holds no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key(id_byte: u8, created_at: u64, not_before: u64, not_after: u64) -> Key {
        Key::new(
            KeyId::from_bytes([id_byte; KEY_ID_SIZE]),
            KeyMaterial::new([id_byte; KEY_MATERIAL_SIZE]),
            created_at,
            not_before,
            not_after,
        )
    }

    #[test]
    fn key_id_displays_as_hex() {
        let id = KeyId::from_bytes([0x0F; KEY_ID_SIZE]);
        assert_eq!(id.to_string(), "0f".repeat(KEY_ID_SIZE));
    }

    #[test]
    fn key_material_debug_is_redacted() {
        let material = KeyMaterial::new([0x42; KEY_MATERIAL_SIZE]);
        let rendered = format!("{material:?}");
        assert!(rendered.contains("REDACTED"));
        assert!(!rendered.contains("42"), "material bytes must not leak: {rendered}");
    }

    #[test]
    fn generated_keys_have_distinct_ids_and_material() {
        let a = Key::generate(0, 100);
        let b = Key::generate(0, 100);

        assert_ne!(a.id(), b.id());
        assert_ne!(a.material().as_bytes(), b.material().as_bytes());
    }

    #[test]
    fn activation_window_is_half_open() {
        let key = test_key(1, 0, 100, 200);

        assert!(!key.is_active_at(99));
        assert!(key.is_active_at(100));
        assert!(key.is_active_at(199));
        assert!(!key.is_active_at(200));
    }

    #[test]
    fn empty_ring_has_no_active_key() {
        let ring = KeyRing::new();
        assert_eq!(ring.current_key(0).err(), Some(ProtectError::NoActiveKey));
    }

    #[test]
    fn ring_with_only_expired_keys_has_no_active_key() {
        let ring = KeyRing::from_keys([test_key(1, 0, 0, 50)]);
        assert_eq!(ring.current_key(100).err(), Some(ProtectError::NoActiveKey));
    }

    #[test]
    fn current_key_prefers_latest_not_before() {
        let old = test_key(1, 0, 0, 1000);
        let new = test_key(2, 10, 10, 1000);
        let ring = KeyRing::from_keys([old, new.clone()]);

        let current = ring.current_key(500).unwrap();
        assert_eq!(current.id(), new.id());
    }

    #[test]
    fn current_key_ties_broken_by_created_at() {
        let first = test_key(1, 5, 10, 1000);
        let second = test_key(2, 7, 10, 1000);
        let ring = KeyRing::from_keys([first, second.clone()]);

        let current = ring.current_key(500).unwrap();
        assert_eq!(current.id(), second.id());
    }

    #[test]
    fn expired_key_remains_lookup_able() {
        let key = test_key(1, 0, 0, 50);
        let id = key.id();
        let ring = KeyRing::from_keys([key]);

        // No longer current...
        assert_eq!(ring.current_key(100).err(), Some(ProtectError::NoActiveKey));
        // ...but still resolvable for unprotect
        assert_eq!(ring.lookup(&id).unwrap().id(), id);
    }

    #[test]
    fn lookup_of_absent_id_fails_with_unknown_key() {
        let ring = KeyRing::from_keys([test_key(1, 0, 0, 100)]);
        let absent = KeyId::from_bytes([9; KEY_ID_SIZE]);

        assert_eq!(ring.lookup(&absent).err(), Some(ProtectError::UnknownKey { id: absent }));
    }

    #[test]
    fn revoked_key_is_gone() {
        let key = test_key(1, 0, 0, 100);
        let id = key.id();
        let mut ring = KeyRing::from_keys([key]);

        assert!(ring.revoke(&id).is_some());
        assert!(ring.is_empty());
        assert_eq!(ring.lookup(&id).err(), Some(ProtectError::UnknownKey { id }));
    }

    #[test]
    fn insert_with_same_id_replaces() {
        let mut ring = KeyRing::new();
        ring.insert(test_key(1, 0, 0, 100));
        ring.insert(test_key(1, 5, 0, 100));

        assert_eq!(ring.len(), 1);
        assert_eq!(ring.current_key(10).unwrap().created_at(), 5);
    }
}
