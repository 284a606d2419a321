use rand::Rng;
use siphasher::sip::SipHasher;
use std::fmt;
use std::hash::{BuildHasher, Hasher};

/// Keyed SipHash builder that `CuckooFilter` uses unless another `BuildHasher` is supplied.
///
/// Item bytes reach the hasher through a single `Hasher::write` call (see `hash_bytes`), so two
/// builders with equal keys send every item to the same buckets with the same fingerprint.
#[derive(Clone, Copy)]
pub struct SipHasherBuilder {
    keys: (u64, u64),
    hasher: SipHasher,
}

impl SipHasherBuilder {
    /// Draws both keys from the thread-local RNG. Hashes are stable for the lifetime of the
    /// builder and differ between builders.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::SipHasherBuilder;
    ///
    /// let hash_builder = SipHasherBuilder::from_entropy();
    /// assert_ne!(hash_builder, SipHasherBuilder::from_entropy());
    /// ```
    pub fn from_entropy() -> Self {
        let mut rng = rand::thread_rng();
        Self::from_seed(rng.gen(), rng.gen())
    }

    /// Uses the fixed keys `k0` and `k1`, which makes item placement reproducible across filters
    /// and runs.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::SipHasherBuilder;
    ///
    /// assert_eq!(SipHasherBuilder::from_seed(0, 0), SipHasherBuilder::from_seed(0, 0));
    /// ```
    pub fn from_seed(k0: u64, k1: u64) -> Self {
        SipHasherBuilder {
            keys: (k0, k1),
            hasher: SipHasher::new_with_keys(k0, k1),
        }
    }
}

// Keys only; the prepared hasher state is derived from them.
impl fmt::Debug for SipHasherBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SipHasherBuilder")
            .field(&self.keys.0)
            .field(&self.keys.1)
            .finish()
    }
}

impl PartialEq for SipHasherBuilder {
    fn eq(&self, other: &SipHasherBuilder) -> bool {
        self.keys == other.keys
    }
}

impl Eq for SipHasherBuilder {}

impl BuildHasher for SipHasherBuilder {
    type Hasher = SipHasher;

    #[inline]
    fn build_hasher(&self) -> SipHasher {
        self.hasher
    }
}

/// Hashes `bytes` with one `Hasher::write` call.
///
/// `Hash for [u8]` would prepend the length; writing raw bytes keeps the mapping from item bytes
/// to hash value exactly what the builder's hasher computes.
#[inline]
pub fn hash_bytes(hash_builder: &impl BuildHasher, bytes: &[u8]) -> u64 {
    let mut hasher = hash_builder.build_hasher();
    hasher.write(bytes);
    hasher.finish()
}

#[cfg(test)]
pub mod tests {
    use super::{hash_bytes, SipHasherBuilder};
    use std::hash::{BuildHasher, Hasher};

    pub fn hash_builder_1() -> SipHasherBuilder {
        SipHasherBuilder::from_seed(0, 0)
    }

    pub fn hash_builder_2() -> SipHasherBuilder {
        SipHasherBuilder::from_seed(1, 1)
    }

    /// Folds the written bytes big-endian into a `u64`, so `item(h)` hashes to exactly `h` and a
    /// lone fingerprint byte hashes to its own value.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct IdentityHasherBuilder;

    #[derive(Default)]
    pub struct IdentityHasher(u64);

    impl Hasher for IdentityHasher {
        fn write(&mut self, bytes: &[u8]) {
            for byte in bytes {
                self.0 = (self.0 << 8) | u64::from(*byte);
            }
        }

        fn finish(&self) -> u64 {
            self.0
        }
    }

    impl BuildHasher for IdentityHasherBuilder {
        type Hasher = IdentityHasher;

        fn build_hasher(&self) -> IdentityHasher {
            IdentityHasher::default()
        }
    }

    /// An item whose identity hash has `top` as its most significant byte and `low` below it.
    pub fn item(top: u8, low: u64) -> [u8; 8] {
        ((u64::from(top) << 56) | low).to_be_bytes()
    }

    #[test]
    fn test_seeded_builders_are_deterministic() {
        assert_eq!(hash_builder_1(), SipHasherBuilder::from_seed(0, 0));
        assert_eq!(
            hash_bytes(&hash_builder_1(), b"foo"),
            hash_bytes(&hash_builder_1(), b"foo"),
        );
        assert_ne!(
            hash_bytes(&hash_builder_1(), b"foo"),
            hash_bytes(&hash_builder_2(), b"foo"),
        );
    }

    #[test]
    fn test_debug_shows_keys() {
        assert_eq!(
            format!("{:?}", SipHasherBuilder::from_seed(3, 4)),
            "SipHasherBuilder(3, 4)",
        );
    }

    #[test]
    fn test_identity_hasher() {
        assert_eq!(hash_bytes(&IdentityHasherBuilder, &item(3, 0x11)), 0x0300_0000_0000_0011);
        assert_eq!(hash_bytes(&IdentityHasherBuilder, &[42]), 42);
    }
}
