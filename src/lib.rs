//! # cuckoo-collections
//!
//! `cuckoo-collections` is a cuckoo filter: a compact set that answers "is this item probably a
//! member?" with no false negatives and a small false positive rate, and that also supports
//! removing items, which classic Bloom filters cannot do.
//!
//! Items are byte slices. Each one is summarized by a one-byte fingerprint that is stored in one
//! of two candidate buckets of four slots. With the default configuration the false positive rate
//! stays around 3% at full load.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! cuckoo-collections = "*"
//! ```
//!
//! ```rust
//! use cuckoo_collections::CuckooFilter;
//!
//! let mut filter = CuckooFilter::new(1000);
//! filter.insert(b"foo");
//!
//! assert!(filter.contains(b"foo"));
//! assert!(filter.remove(b"foo"));
//! assert!(!filter.contains(b"foo"));
//! ```
//!
//! ## References
//!
//!  - [Cuckoo Filter: Practically Better Than Bloom](https://dl.acm.org/citation.cfm?id=2674994)
//!  > Fan, Bin, Dave G. Andersen, Michael Kaminsky, and Michael D. Mitzenmacher. 2014. “Cuckoo Filter: Practically Better Than Bloom.” In *Proceedings of the 10th Acm International on Conference on Emerging Networking Experiments and Technologies*, 75–88. CoNEXT ’14. New York, NY, USA: ACM. doi:[10.1145/2674005.2674994](https://doi.org/10.1145/2674005.2674994).

#![warn(missing_docs)]

mod config;
pub mod cuckoo;
mod error;
mod util;

pub use config::{Config, EvictionFailure};
pub use cuckoo::CuckooFilter;
pub use error::{Error, Result};
pub use util::SipHasherBuilder;
