//! Bloom filter for approximate membership of string keys.
//!
//! A [`MembershipFilter`] is sized once from the number of keys it will hold and an upper
//! bound on the false positive rate. It never reports an inserted key as absent.
//!
//! ```
//! use membership_filter::MembershipFilter;
//!
//! let mut filter = MembershipFilter::new(2, 1e-7).unwrap();
//! filter.insert("a@x.com");
//! filter.insert("b@x.com");
//!
//! assert!(filter.contains("a@x.com"));
//! assert!(!filter.contains("c@x.com"));
//! ```

pub mod bloom_filters;
pub mod error;
pub mod keys;
pub mod sets;

pub use bloom_filters::MembershipFilter;
pub use error::FilterError;
pub use keys::{read_keys, read_keys_from, DEFAULT_HEADER_LABELS};
pub use sets::{Classification, KeySet};

/// Rate used when the caller does not pick one.
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 1e-7;
