use crate::util::hash_bytes;
use std::hash::BuildHasher;
use std::num::NonZeroU8;

/// A one-byte, nonzero summary of an item's hash.
///
/// Zero is reserved for empty slots, so `Option<Fingerprint>` is a single byte with `0` meaning
/// empty. Distinct items may share a fingerprint.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Fingerprint(NonZeroU8);

impl Fingerprint {
    /// Returns `None` for the reserved value `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::cuckoo::Fingerprint;
    ///
    /// assert!(Fingerprint::new(0).is_none());
    /// assert_eq!(Fingerprint::new(7).map(Fingerprint::get), Some(7));
    /// ```
    pub fn new(value: u8) -> Option<Self> {
        NonZeroU8::new(value).map(Fingerprint)
    }

    /// Takes the most significant byte of `hash` and remaps it into `1..=255`.
    pub fn from_hash(hash: u64) -> Self {
        let offset = ((hash >> 56) % 255) as u8;
        Fingerprint(NonZeroU8::MIN.saturating_add(offset))
    }

    /// The raw fingerprint byte.
    #[inline]
    pub fn get(self) -> u8 {
        self.0.get()
    }
}

/// Derives fingerprints and candidate bucket indexes from item bytes.
///
/// Indexes are full 64-bit values. Callers reduce them modulo the (power of two) bucket count, so
/// [`alt_index`](FingerprintCodec::alt_index) commutes with the reduction.
#[derive(Clone, Debug, PartialEq)]
pub struct FingerprintCodec<B> {
    hash_builder: B,
}

impl<B> FingerprintCodec<B> {
    /// Constructs a codec that hashes with `hash_builder`.
    pub fn new(hash_builder: B) -> Self {
        FingerprintCodec { hash_builder }
    }

    /// Returns a reference to the codec's hash builder.
    pub fn hasher(&self) -> &B {
        &self.hash_builder
    }
}

impl<B> FingerprintCodec<B>
where
    B: BuildHasher,
{
    /// Returns `(index_1, index_2, fingerprint)` for `item`.
    ///
    /// `index_1` is the item hash itself and `index_2` is its alternate under the fingerprint.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::cuckoo::FingerprintCodec;
    /// use cuckoo_collections::SipHasherBuilder;
    ///
    /// let codec = FingerprintCodec::new(SipHasherBuilder::from_seed(0, 0));
    /// let (index_1, index_2, fingerprint) = codec.derive_indices(b"foo");
    ///
    /// assert_eq!(codec.alt_index(fingerprint, index_2), index_1);
    /// ```
    pub fn derive_indices(&self, item: &[u8]) -> (u64, u64, Fingerprint) {
        let hash = hash_bytes(&self.hash_builder, item);
        let fingerprint = Fingerprint::from_hash(hash);
        (hash, self.alt_index(fingerprint, hash), fingerprint)
    }

    /// The other candidate index of `fingerprint` when it sits at `index`.
    ///
    /// XOR with the fingerprint hash is its own inverse, so applying this twice returns `index`.
    #[inline]
    pub fn alt_index(&self, fingerprint: Fingerprint, index: u64) -> u64 {
        index ^ hash_bytes(&self.hash_builder, &[fingerprint.get()])
    }
}
