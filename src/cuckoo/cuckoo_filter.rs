use crate::config::{Config, EvictionFailure};
use crate::cuckoo::{Bucket, Fingerprint, FingerprintCodec, BUCKET_SIZE};
use crate::error::{Error, Result};
use crate::SipHasherBuilder;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use std::fmt;
use std::hash::BuildHasher;

/// Number of distinct nonzero fingerprint values.
const FINGERPRINT_VALUES: f64 = 255.0;

/// A space-efficient probabilistic data structure to test for membership in a set. Cuckoo filters
/// also provide the flexibility to remove items.
///
/// Every item is reduced to a one-byte fingerprint that may live in one of two candidate buckets.
/// The second candidate is derived from the first and the fingerprint alone, so a stored
/// fingerprint can be moved to its other bucket without knowing the original item. When both
/// candidates of a new item are full, resident fingerprints are kicked to their alternate buckets
/// along a bounded random walk.
///
/// Lookups never report false negatives for items that were inserted and not removed. Removing
/// an item that was never inserted may remove a different item with the same fingerprint and a
/// shared candidate bucket.
///
/// All mutation goes through `&mut self`, so a filter has a single writer at a time. To share one
/// between threads, wrap it in a `Mutex` or shard items across several filters.
///
/// # Examples
///
/// ```
/// use cuckoo_collections::CuckooFilter;
///
/// let mut filter = CuckooFilter::new(100);
///
/// assert!(!filter.contains(b"foo"));
/// assert!(filter.insert(b"foo"));
/// assert!(filter.contains(b"foo"));
///
/// assert!(filter.remove(b"foo"));
/// assert!(!filter.contains(b"foo"));
///
/// assert_eq!(filter.len(), 0);
/// assert_eq!(filter.capacity(), 128);
/// assert_eq!(filter.bucket_len(), 32);
/// ```
pub struct CuckooFilter<B = SipHasherBuilder, R = XorShiftRng> {
    buckets: Box<[Bucket]>,
    count: usize,
    max_kicks: usize,
    eviction_failure: EvictionFailure,
    codec: FingerprintCodec<B>,
    rng: R,
}

impl CuckooFilter {
    /// Constructs a new, empty `CuckooFilter` with an estimated max capacity of `capacity`. The
    /// filter has 4 slots per bucket, 8 bits per fingerprint, and allows 500 displacements per
    /// insertion.
    ///
    /// The capacity will be rounded up to the next power of two. At least one bucket is allocated,
    /// even for a capacity of 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::CuckooFilter;
    ///
    /// let filter = CuckooFilter::new(100);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self::from_config(Config::new(capacity))
    }

    /// Constructs a new, empty `CuckooFilter` from `config`, with an entropy-seeded hasher and
    /// random number generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::{Config, CuckooFilter, EvictionFailure};
    ///
    /// let filter = CuckooFilter::from_config(
    ///     Config::new(1000).eviction_failure(EvictionFailure::Lossy),
    /// );
    /// assert_eq!(filter.capacity(), 1024);
    /// ```
    pub fn from_config(config: Config) -> Self {
        Self::with_hasher_and_rng(
            config,
            SipHasherBuilder::from_entropy(),
            XorShiftRng::from_entropy(),
        )
    }
}

impl Default for CuckooFilter {
    /// Constructs a filter with a capacity of one million items.
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}

impl<B> CuckooFilter<B>
where
    B: BuildHasher,
{
    /// Constructs a new, empty `CuckooFilter` with an estimated max capacity of `capacity` that
    /// hashes items with `hash_builder`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::{CuckooFilter, SipHasherBuilder};
    ///
    /// let filter = CuckooFilter::with_hasher(100, SipHasherBuilder::from_seed(0, 0));
    /// ```
    pub fn with_hasher(capacity: usize, hash_builder: B) -> Self {
        Self::with_hasher_and_rng(
            Config::new(capacity),
            hash_builder,
            XorShiftRng::from_entropy(),
        )
    }
}

impl<B, R> CuckooFilter<B, R>
where
    B: BuildHasher,
    R: Rng,
{
    /// Constructs a new, empty `CuckooFilter` from `config` that hashes items with
    /// `hash_builder` and picks eviction slots with `rng`. Seeding both makes every insertion
    /// reproducible.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::{Config, CuckooFilter, SipHasherBuilder};
    /// use rand::SeedableRng;
    /// use rand_xorshift::XorShiftRng;
    ///
    /// let filter = CuckooFilter::with_hasher_and_rng(
    ///     Config::new(100),
    ///     SipHasherBuilder::from_seed(0, 0),
    ///     XorShiftRng::seed_from_u64(0),
    /// );
    /// ```
    pub fn with_hasher_and_rng(config: Config, hash_builder: B, rng: R) -> Self {
        CuckooFilter {
            buckets: vec![Bucket::new(); config.bucket_len()].into_boxed_slice(),
            count: 0,
            max_kicks: config.max_kicks,
            eviction_failure: config.eviction_failure,
            codec: FingerprintCodec::new(hash_builder),
            rng,
        }
    }

    // The bucket count is a power of two, so reducing after `alt_index` is the same as
    // reducing before it.
    #[inline]
    fn bucket_index(&self, index: u64) -> usize {
        (index % self.buckets.len() as u64) as usize
    }

    /// Inserts an item into the cuckoo filter, reporting why it could not be placed.
    ///
    /// The item may be inserted more than once; each copy occupies its own slot.
    ///
    /// # Errors
    ///
    /// Returns `Error::EvictionBudgetExhausted` if both candidate buckets are full and no free slot
    /// was reached within the displacement budget.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::CuckooFilter;
    ///
    /// let mut filter = CuckooFilter::new(100);
    /// assert_eq!(filter.try_insert(b"foo"), Ok(()));
    /// ```
    pub fn try_insert(&mut self, item: &[u8]) -> Result<()> {
        let (index_1, index_2, fingerprint) = self.codec.derive_indices(item);
        self.insert_fingerprint(fingerprint, index_1, index_2)
    }

    /// Inserts an item into the cuckoo filter. Returns `false` if the filter is too full to place
    /// it.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::CuckooFilter;
    ///
    /// let mut filter = CuckooFilter::new(100);
    /// assert!(filter.insert(b"foo"));
    /// ```
    pub fn insert(&mut self, item: &[u8]) -> bool {
        self.try_insert(item).is_ok()
    }

    /// Inserts an item unless the cuckoo filter already reports it as present.
    ///
    /// # Errors
    ///
    /// Returns `Error::AlreadyPresent` without modifying the filter if `contains(item)` holds,
    /// and `Error::EvictionBudgetExhausted` under the same conditions as
    /// [`try_insert`](CuckooFilter::try_insert).
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::{CuckooFilter, Error};
    ///
    /// let mut filter = CuckooFilter::new(100);
    /// assert_eq!(filter.try_insert_unique(b"foo"), Ok(()));
    /// assert_eq!(filter.try_insert_unique(b"foo"), Err(Error::AlreadyPresent));
    /// ```
    pub fn try_insert_unique(&mut self, item: &[u8]) -> Result<()> {
        let (index_1, index_2, fingerprint) = self.codec.derive_indices(item);
        if self.contains_fingerprint(fingerprint, index_1, index_2) {
            return Err(Error::AlreadyPresent);
        }
        self.insert_fingerprint(fingerprint, index_1, index_2)
    }

    /// Inserts an item unless the cuckoo filter already reports it as present. Returns `false` if
    /// the item was present or could not be placed.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::CuckooFilter;
    ///
    /// let mut filter = CuckooFilter::new(100);
    /// assert!(filter.insert_unique(b"foo"));
    /// assert!(!filter.insert_unique(b"foo"));
    /// assert_eq!(filter.len(), 1);
    /// ```
    pub fn insert_unique(&mut self, item: &[u8]) -> bool {
        self.try_insert_unique(item).is_ok()
    }

    fn insert_fingerprint(
        &mut self,
        fingerprint: Fingerprint,
        index_1: u64,
        index_2: u64,
    ) -> Result<()> {
        let bucket_1 = self.bucket_index(index_1);
        let bucket_2 = self.bucket_index(index_2);
        let placed = self.buckets[bucket_1].insert(fingerprint)
            || self.buckets[bucket_2].insert(fingerprint);
        if !placed {
            // have to kick out an entry
            self.relocate(fingerprint, index_2)?;
        }
        self.count += 1;
        Ok(())
    }

    /// Random walk that displaces resident fingerprints until one lands in a free slot.
    fn relocate(&mut self, mut fingerprint: Fingerprint, mut index: u64) -> Result<()> {
        log::trace!(
            "Candidate buckets full, relocating from bucket {}",
            self.bucket_index(index),
        );

        let mut swaps = Vec::new();
        for _ in 0..self.max_kicks {
            let bucket_index = self.bucket_index(index);
            let slot = self.rng.gen_range(0, BUCKET_SIZE);
            let evicted = match self.buckets[bucket_index].swap(slot, Some(fingerprint)) {
                Some(evicted) => evicted,
                None => return Ok(()),
            };
            if self.eviction_failure == EvictionFailure::Rollback {
                swaps.push((bucket_index, slot, evicted));
            }

            index = self.codec.alt_index(evicted, index);
            let alt_bucket_index = self.bucket_index(index);
            if self.buckets[alt_bucket_index].insert(evicted) {
                return Ok(());
            }
            fingerprint = evicted;
        }

        match self.eviction_failure {
            EvictionFailure::Rollback => {
                log::debug!(
                    "Relocation exhausted {} kicks, rolling back {} swaps",
                    self.max_kicks,
                    swaps.len(),
                );
                for (bucket_index, slot, previous) in swaps.into_iter().rev() {
                    self.buckets[bucket_index].swap(slot, Some(previous));
                }
            }
            EvictionFailure::Lossy => {
                log::debug!(
                    "Relocation exhausted {} kicks, dropping fingerprint {}",
                    self.max_kicks,
                    fingerprint.get(),
                );
            }
        }
        Err(Error::EvictionBudgetExhausted)
    }

    /// Removes an item from the cuckoo filter. Returns `false` if neither candidate bucket held
    /// its fingerprint.
    ///
    /// Only one copy is removed when the item was inserted several times.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::CuckooFilter;
    ///
    /// let mut filter = CuckooFilter::new(100);
    ///
    /// filter.insert(b"foo");
    /// assert!(filter.remove(b"foo"));
    /// assert!(!filter.remove(b"foo"));
    /// ```
    pub fn remove(&mut self, item: &[u8]) -> bool {
        let (index_1, index_2, fingerprint) = self.codec.derive_indices(item);
        let bucket_1 = self.bucket_index(index_1);
        let bucket_2 = self.bucket_index(index_2);
        if self.buckets[bucket_1].delete(fingerprint) || self.buckets[bucket_2].delete(fingerprint)
        {
            self.count -= 1;
            true
        } else {
            false
        }
    }

    /// Checks if an item is possibly in the cuckoo filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::CuckooFilter;
    ///
    /// let mut filter = CuckooFilter::new(100);
    ///
    /// filter.insert(b"foo");
    /// assert!(filter.contains(b"foo"));
    /// ```
    pub fn contains(&self, item: &[u8]) -> bool {
        let (index_1, index_2, fingerprint) = self.codec.derive_indices(item);
        self.contains_fingerprint(fingerprint, index_1, index_2)
    }

    fn contains_fingerprint(&self, fingerprint: Fingerprint, index_1: u64, index_2: u64) -> bool {
        self.buckets[self.bucket_index(index_1)].contains(fingerprint)
            || self.buckets[self.bucket_index(index_2)].contains(fingerprint)
    }

    /// Clears the cuckoo filter, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::CuckooFilter;
    ///
    /// let mut filter = CuckooFilter::new(100);
    ///
    /// filter.insert(b"foo");
    /// filter.clear();
    ///
    /// assert!(!filter.contains(b"foo"));
    /// assert!(filter.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Bucket::clear);
        self.count = 0;
    }
}

impl<B, R> CuckooFilter<B, R> {
    /// Returns the number of successful insertions minus the number of successful removals.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::CuckooFilter;
    ///
    /// let filter = CuckooFilter::new(100);
    ///
    /// assert_eq!(filter.len(), 0);
    /// ```
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the cuckoo filter holds no fingerprints.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the total number of fingerprint slots in the cuckoo filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::CuckooFilter;
    ///
    /// let filter = CuckooFilter::new(100);
    ///
    /// assert_eq!(filter.capacity(), 128);
    /// ```
    pub fn capacity(&self) -> usize {
        self.buckets.len() * BUCKET_SIZE
    }

    /// Returns the number of buckets in the cuckoo filter.
    pub fn bucket_len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the maximum number of displacements per insertion.
    pub fn max_kicks(&self) -> usize {
        self.max_kicks
    }

    /// Returns what a failed relocation walk leaves behind.
    pub fn eviction_failure(&self) -> EvictionFailure {
        self.eviction_failure
    }

    /// Returns the fraction of slots that are occupied.
    pub fn load_factor(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    /// Returns the estimated false positive probability of the cuckoo filter. This value will
    /// increase as more items are added.
    ///
    /// A lookup compares against both candidate buckets, so at full load it is close to
    /// `2 * BUCKET_SIZE / 255`.
    ///
    /// # Examples
    ///
    /// ```
    /// use cuckoo_collections::CuckooFilter;
    ///
    /// let mut filter = CuckooFilter::new(100);
    /// assert!(filter.estimated_fpp() < std::f64::EPSILON);
    ///
    /// filter.insert(b"foo");
    /// assert!(filter.estimated_fpp() > std::f64::EPSILON);
    /// assert!(filter.estimated_fpp() < 0.01);
    /// ```
    pub fn estimated_fpp(&self) -> f64 {
        let single_fpp = (FINGERPRINT_VALUES - 1.0) / FINGERPRINT_VALUES;
        1.0 - single_fpp.powf(2.0 * BUCKET_SIZE as f64 * self.load_factor())
    }

    /// Returns a reference to the cuckoo filter's hasher builder.
    pub fn hasher(&self) -> &B {
        self.codec.hasher()
    }
}

impl<B, R> fmt::Debug for CuckooFilter<B, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CuckooFilter")
            .field("bucket_len", &self.buckets.len())
            .field("count", &self.count)
            .field("max_kicks", &self.max_kicks)
            .field("eviction_failure", &self.eviction_failure)
            .finish()
    }
}
