//! OS CSPRNG access for the protection engine.

/// Fill `buffer` with cryptographically secure random bytes.
///
/// # Panics
///
/// Panics if the OS RNG fails. This is intentional - key ids, key
/// material, and nonces all come from this source, and a process
/// without functioning cryptographic randomness cannot operate
/// securely. RNG failure is extremely rare and indicates OS-level
/// issues.
#[allow(clippy::expect_used)]
pub(crate) fn fill(buffer: &mut [u8]) {
    getrandom::fill(buffer)
        .expect("invariant: OS RNG failure is unrecoverable - cannot operate securely");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_produces_distinct_outputs() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];

        fill(&mut a);
        fill(&mut b);

        // Extremely unlikely to be equal if random
        assert_ne!(a, b, "random buffers should differ");
    }
}
