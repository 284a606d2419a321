use crate::cuckoo::{BUCKET_SIZE, DEFAULT_CAPACITY, DEFAULT_MAX_KICKS};

/// What an insertion leaves behind when its relocation walk runs out of kicks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EvictionFailure {
    /// Undo every swap of the failed walk, so the filter is exactly as it was before the insert.
    Rollback,

    /// Keep the swapped state of the walk. The last displaced fingerprint is dropped, so an item
    /// that was stored before the failed insert may no longer be found.
    Lossy,
}

/// Cuckoo filter configuration
///
/// # Examples
///
/// ```
/// use cuckoo_collections::{Config, EvictionFailure};
///
/// let config = Config::new(100)
///     .max_kicks(64)
///     .eviction_failure(EvictionFailure::Lossy);
///
/// assert_eq!(config.bucket_len(), 32);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Requested item capacity, rounded up to a power of two by the filter
    pub capacity: usize,

    /// Maximum number of displacements per insertion
    pub max_kicks: usize,

    /// Behaviour when the displacement budget runs out
    pub eviction_failure: EvictionFailure,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_kicks: DEFAULT_MAX_KICKS,
            eviction_failure: EvictionFailure::Rollback,
        }
    }
}

impl Config {
    /// Default configuration with a requested capacity of `capacity` items.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Sets the requested item capacity.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the maximum number of displacements per insertion.
    ///
    /// Defaults to 500.
    #[must_use]
    pub fn max_kicks(mut self, max_kicks: usize) -> Self {
        self.max_kicks = max_kicks;
        self
    }

    /// Sets the behaviour when the displacement budget runs out.
    ///
    /// Defaults to [`EvictionFailure::Rollback`].
    #[must_use]
    pub fn eviction_failure(mut self, eviction_failure: EvictionFailure) -> Self {
        self.eviction_failure = eviction_failure;
        self
    }

    /// Number of buckets a filter built from this configuration allocates.
    ///
    /// The capacity is rounded up to the next power of two and split into buckets of
    /// `BUCKET_SIZE` slots. There is always at least one bucket.
    #[must_use]
    pub fn bucket_len(&self) -> usize {
        let slots = self
            .capacity
            .checked_next_power_of_two()
            .unwrap_or(1 << (usize::BITS - 1));
        std::cmp::max(slots / BUCKET_SIZE, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, EvictionFailure};

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.capacity, 1_000_000);
        assert_eq!(config.max_kicks, 500);
        assert_eq!(config.eviction_failure, EvictionFailure::Rollback);
        assert_eq!(config.bucket_len(), 262_144);
    }

    #[test]
    fn test_bucket_len() {
        assert_eq!(Config::new(8).bucket_len(), 2);
        assert_eq!(Config::new(9).bucket_len(), 4);
        assert_eq!(Config::new(100).bucket_len(), 32);
        assert_eq!(Config::new(128).bucket_len(), 32);
    }

    #[test]
    fn test_bucket_len_never_zero() {
        assert_eq!(Config::new(0).bucket_len(), 1);
        assert_eq!(Config::new(1).bucket_len(), 1);
        assert_eq!(Config::new(3).bucket_len(), 1);
        assert_eq!(Config::new(usize::MAX).bucket_len(), (1 << (usize::BITS - 1)) / 4);
    }

    #[test]
    fn test_builder() {
        let config = Config::new(16)
            .capacity(32)
            .max_kicks(0)
            .eviction_failure(EvictionFailure::Lossy);
        assert_eq!(config.capacity, 32);
        assert_eq!(config.max_kicks, 0);
        assert_eq!(config.eviction_failure, EvictionFailure::Lossy);
    }
}
