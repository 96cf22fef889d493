use crate::error::FilterError;
use bitvec::prelude::*;
use std::f64::consts::LN_2;
use tracing::debug;

#[cfg(all(feature = "xxh3", feature = "shake128"))]
compile_error!("Please choose one hash function to use: xxh3 or shake128.");
#[cfg(all(feature = "xxh3", feature = "blake3"))]
compile_error!("Please choose one hash function to use: xxh3 or blake3.");
#[cfg(all(feature = "shake128", feature = "blake3"))]
compile_error!("Please choose one hash function to use: shake128 or blake3.");
#[cfg(not(any(feature = "xxh3", feature = "shake128", feature = "blake3")))]
compile_error!("Please enable one hash function feature: xxh3, shake128 or blake3.");

#[cfg(feature = "xxh3")]
use xxhash_rust::xxh3::xxh3_64_with_seed;
#[cfg(feature = "xxh3")]
pub fn hash_element(key: &[u8], seed: u64) -> u64 {
    xxh3_64_with_seed(key, seed)
}

#[cfg(feature = "shake128")]
use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake128,
};
#[cfg(feature = "shake128")]
pub fn hash_element(key: &[u8], seed: u64) -> u64 {
    let mut hasher = Shake128::default();
    hasher.update(key);
    hasher.update(&seed.to_le_bytes());
    let mut reader = hasher.finalize_xof();
    let mut res = [0u8; 8];
    reader.read(&mut res);

    u64::from_le_bytes(res)
}

#[cfg(feature = "blake3")]
pub fn hash_element(key: &[u8], seed: u64) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(key);
    hasher.update(&seed.to_le_bytes());
    let mut reader = hasher.finalize_xof();
    let mut res = [0u8; 8];
    reader.fill(&mut res);

    u64::from_le_bytes(res)
}

/// Bit positions probed for `key`: one per seed in `0..hash_count`.
pub fn bloom_filter_indices(
    key: &[u8],
    bin_count: usize,
    hash_count: usize,
) -> impl Iterator<Item = usize> + '_ {
    (0..hash_count).map(move |seed| (hash_element(key, seed as u64) % bin_count as u64) as usize)
}

/// Returns (`min_bin_count`, `hash_count`) that cause an error rate of at most `error_rate` when `element_count` elements are inserted into this Bloom filter.
///
/// `m = ceil(-n ln(p) / ln(2)^2)` and `k = round(m / n * ln(2))`, both at least 1.
pub fn find_compact_params(
    element_count: usize,
    error_rate: f64,
) -> Result<(usize, usize), FilterError> {
    if element_count == 0 {
        return Err(FilterError::InvalidParameter(
            "expected element count must be at least 1".to_string(),
        ));
    }
    // Written so that NaN is rejected too.
    if !(error_rate > 0.0 && error_rate < 1.0) {
        return Err(FilterError::InvalidParameter(format!(
            "false positive rate must lie strictly between 0 and 1, got {}",
            error_rate
        )));
    }

    let n = element_count as f64;
    let bins = (-(n * error_rate.ln()) / (LN_2 * LN_2)).ceil();
    // bitvec reserves the low bits of the length for the head offset.
    if !bins.is_finite() || bins >= BitSlice::<u8, Lsb0>::MAX_BITS as f64 {
        return Err(FilterError::InvalidParameter(format!(
            "{} elements at rate {} need more bits than can be addressed",
            element_count, error_rate
        )));
    }
    let bin_count = (bins as usize).max(1);

    let hash_count = ((bin_count as f64 / n) * LN_2).round() as usize;

    Ok((bin_count, hash_count.max(1)))
}

/// False positive probability `(1 - e^(-kn/m))^k` after `element_count` distinct insertions.
pub fn expected_false_positive_rate(
    bin_count: usize,
    element_count: usize,
    hash_count: usize,
) -> f64 {
    if bin_count == 0 {
        return 1.0;
    }
    let exponent = -(hash_count as f64) * (element_count as f64) / (bin_count as f64);
    (1.0 - exponent.exp()).powi(hash_count as i32)
}

/// Fixed-size Bloom filter over string keys.
///
/// Sized once from the expected number of keys and a target false positive rate.
/// Bits are only ever set, so a key that was inserted is always reported as present.
#[derive(Clone, Debug, PartialEq)]
pub struct MembershipFilter {
    bits: BitVec<u8, Lsb0>,
    hash_count: usize,
    expected_count: usize,
    target_false_positive_rate: f64,
}

impl MembershipFilter {
    pub fn new(expected_count: usize, false_positive_rate: f64) -> Result<Self, FilterError> {
        let (bin_count, hash_count) = find_compact_params(expected_count, false_positive_rate)?;
        debug!(
            expected_count,
            false_positive_rate, bin_count, hash_count, "sized membership filter"
        );

        Ok(MembershipFilter {
            bits: bitvec![u8, Lsb0; 0; bin_count],
            hash_count,
            expected_count,
            target_false_positive_rate: false_positive_rate,
        })
    }

    pub fn insert(&mut self, key: &str) {
        let bin_count = self.bits.len();
        for index in bloom_filter_indices(key.as_bytes(), bin_count, self.hash_count) {
            self.bits.set(index, true);
        }
    }

    /// `false` means the key was never inserted. `true` may be a false positive.
    pub fn contains(&self, key: &str) -> bool {
        let bin_count = self.bits.len();

        for index in bloom_filter_indices(key.as_bytes(), bin_count, self.hash_count) {
            if !self.bits[index] {
                return false;
            }
        }

        true
    }

    pub fn bit_array_size(&self) -> usize {
        self.bits.len()
    }

    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    pub fn expected_count(&self) -> usize {
        self.expected_count
    }

    pub fn target_false_positive_rate(&self) -> f64 {
        self.target_false_positive_rate
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Positions of the set bits, in ascending order.
    pub fn set_bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    pub fn estimated_false_positive_rate(&self, inserted: usize) -> f64 {
        expected_false_positive_rate(self.bits.len(), inserted, self.hash_count)
    }
}
