use crate::cuckoo::{Fingerprint, BUCKET_SIZE};
use crate::error::{Error, Result};

/// A fixed set of `BUCKET_SIZE` fingerprint slots stored inline.
///
/// Slot order carries no meaning and the same fingerprint may occupy several slots.
///
/// # Examples
///
/// ```
/// use cuckoo_collections::cuckoo::{Bucket, Fingerprint};
///
/// let fingerprint = Fingerprint::new(42).unwrap();
/// let mut bucket = Bucket::new();
///
/// assert!(bucket.insert(fingerprint));
/// assert_eq!(bucket.find(fingerprint), Some(0));
///
/// assert!(bucket.delete(fingerprint));
/// assert_eq!(bucket.find(fingerprint), None);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Bucket {
    slots: [Option<Fingerprint>; BUCKET_SIZE],
}

impl Bucket {
    /// Constructs an empty bucket.
    pub fn new() -> Self {
        Bucket {
            slots: [None; BUCKET_SIZE],
        }
    }

    /// Writes `fingerprint` into the first empty slot and returns that slot's index.
    ///
    /// Occupied slots are never overwritten. Returns `Error::BucketFull` if there is no empty
    /// slot.
    pub fn try_insert(&mut self, fingerprint: Fingerprint) -> Result<usize> {
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(Error::BucketFull)?;
        self.slots[slot] = Some(fingerprint);
        Ok(slot)
    }

    /// Writes `fingerprint` into the first empty slot. Returns `false` if the bucket is full.
    #[inline]
    pub fn insert(&mut self, fingerprint: Fingerprint) -> bool {
        self.try_insert(fingerprint).is_ok()
    }

    /// Index of the first slot holding `fingerprint`.
    #[inline]
    pub fn find(&self, fingerprint: Fingerprint) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| *slot == Some(fingerprint))
    }

    /// Returns `true` if any slot holds `fingerprint`.
    #[inline]
    pub fn contains(&self, fingerprint: Fingerprint) -> bool {
        self.find(fingerprint).is_some()
    }

    /// Empties the first slot holding `fingerprint`. Returns `false` if there is none.
    pub fn delete(&mut self, fingerprint: Fingerprint) -> bool {
        match self.find(fingerprint) {
            Some(slot) => {
                self.slots[slot] = None;
                true
            }
            None => false,
        }
    }

    /// Puts `fingerprint` (or nothing) into `slot` and returns the previous occupant.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not less than `BUCKET_SIZE`.
    #[inline]
    pub(crate) fn swap(
        &mut self,
        slot: usize,
        fingerprint: Option<Fingerprint>,
    ) -> Option<Fingerprint> {
        std::mem::replace(&mut self.slots[slot], fingerprint)
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Returns `true` if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        self.slots = [None; BUCKET_SIZE];
    }
}

#[cfg(test)]
mod tests {
    use super::Bucket;
    use crate::cuckoo::{Fingerprint, BUCKET_SIZE};
    use crate::error::Error;

    fn fingerprint(value: u8) -> Fingerprint {
        Fingerprint::new(value).unwrap()
    }

    #[test]
    fn test_layout_is_inline() {
        assert_eq!(std::mem::size_of::<Bucket>(), BUCKET_SIZE);
    }

    #[test]
    fn test_insert_until_full() {
        let mut bucket = Bucket::new();
        for value in 1..=BUCKET_SIZE as u8 {
            assert_eq!(bucket.try_insert(fingerprint(value)), Ok(value as usize - 1));
        }

        assert!(bucket.is_full());
        assert_eq!(bucket.len(), BUCKET_SIZE);
        assert_eq!(bucket.try_insert(fingerprint(9)), Err(Error::BucketFull));
        assert!(!bucket.insert(fingerprint(9)));
        assert!(!bucket.contains(fingerprint(9)));
    }

    #[test]
    fn test_insert_fills_first_empty_slot() {
        let mut bucket = Bucket::new();
        bucket.insert(fingerprint(1));
        bucket.insert(fingerprint(2));
        bucket.insert(fingerprint(3));

        assert!(bucket.delete(fingerprint(2)));
        assert_eq!(bucket.try_insert(fingerprint(4)), Ok(1));
        assert_eq!(bucket.find(fingerprint(4)), Some(1));
    }

    #[test]
    fn test_duplicates() {
        let mut bucket = Bucket::new();
        assert!(bucket.insert(fingerprint(7)));
        assert!(bucket.insert(fingerprint(7)));
        assert_eq!(bucket.len(), 2);

        assert!(bucket.delete(fingerprint(7)));
        assert_eq!(bucket.find(fingerprint(7)), Some(1));
        assert!(bucket.delete(fingerprint(7)));
        assert!(!bucket.delete(fingerprint(7)));
        assert!(bucket.is_empty());
    }

    #[test]
    fn test_swap() {
        let mut bucket = Bucket::new();
        assert_eq!(bucket.swap(2, Some(fingerprint(5))), None);
        assert_eq!(bucket.swap(2, Some(fingerprint(6))), Some(fingerprint(5)));
        assert_eq!(bucket.find(fingerprint(6)), Some(2));
        assert_eq!(bucket.swap(2, None), Some(fingerprint(6)));
        assert!(bucket.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut bucket = Bucket::new();
        bucket.insert(fingerprint(1));
        bucket.insert(fingerprint(2));
        bucket.clear();

        assert!(bucket.is_empty());
        assert_eq!(bucket, Bucket::default());
    }
}
