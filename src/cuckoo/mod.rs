//! Space-efficient probabilistic data structure to test for membership in a set with the ability
//! to remove items.

mod bucket;
mod cuckoo_filter;
mod fingerprint;

/// Number of fingerprint slots in every bucket.
pub const BUCKET_SIZE: usize = 4;

/// Number of displacements an insertion may make before giving up.
pub const DEFAULT_MAX_KICKS: usize = 500;

/// Requested capacity of a default-constructed filter.
pub const DEFAULT_CAPACITY: usize = 1_000_000;

pub use self::bucket::Bucket;
pub use self::cuckoo_filter::CuckooFilter;
pub use self::fingerprint::{Fingerprint, FingerprintCodec};
