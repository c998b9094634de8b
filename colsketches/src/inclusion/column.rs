// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Per-column sketch construction.

use crate::hash::DEFAULT_UPDATE_SEED;
use crate::hash::HASH_BITS;
use crate::hll::BucketDigest;
use crate::hll::DEFAULT_LG_K;
use crate::hll::HllSketch;
use crate::hll::MAX_LG_K;
use crate::hll::MIN_LG_K;

/// Smallest bucket exponent used for comparison digests (16 buckets).
pub const MIN_BUCKET_EXPONENT: u8 = MIN_LG_K;
/// Largest bucket exponent used for comparison digests.
pub const MAX_BUCKET_EXPONENT: u8 = MAX_LG_K;

/// Bucket exponent `m` and the number of value bits `k = 32 - m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketParameters {
    /// Number of hash bits used to select a bucket.
    pub m: u8,
    /// Number of hash bits left to populate a bucket value.
    pub k: u8,
}

impl BucketParameters {
    /// Derive the parameters shared by a column pair from its distinct counts.
    pub fn for_counts(n_x: f64, n_y: f64) -> Self {
        Self::for_exponent(choose_bucket_exponent(n_x, n_y))
    }

    /// Parameters of digests built with `2^m` buckets.
    pub fn for_exponent(m: u8) -> Self {
        debug_assert!(m < HASH_BITS);
        Self {
            m,
            k: HASH_BITS - m,
        }
    }

    /// Number of buckets, `2^m`.
    pub fn num_buckets(&self) -> usize {
        1 << self.m
    }
}

/// Choose the bucket exponent for a column pair.
///
/// `m = round(log2(max(n_x, n_y) / 2))`, clamped to
/// [`MIN_BUCKET_EXPONENT`]`..=`[`MAX_BUCKET_EXPONENT`].
pub fn choose_bucket_exponent(n_x: f64, n_y: f64) -> u8 {
    let m = (n_x.max(n_y) / 2.0).log2().round();
    // NaN and -inf (zero counts) fall to the floor.
    m.max(MIN_BUCKET_EXPONENT as f64)
        .min(MAX_BUCKET_EXPONENT as f64) as u8
}

/// Builds the distinct count and the comparison digest of a column.
///
/// Both use the same hash seed, so digests built by one sketcher are
/// comparable whenever they share a bucket exponent.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSketcher {
    seed: u32,
    distinct_lg_k: u8,
}

impl Default for ColumnSketcher {
    fn default() -> Self {
        Self::new(DEFAULT_UPDATE_SEED, DEFAULT_LG_K)
    }
}

impl ColumnSketcher {
    /// Create a sketcher hashing with `seed` and counting distinct values
    /// with a `2^distinct_lg_k` bucket sketch.
    ///
    /// # Panics
    ///
    /// If distinct_lg_k is not in range [4, 16]
    pub fn new(seed: u32, distinct_lg_k: u8) -> Self {
        assert!(
            (MIN_LG_K..=MAX_LG_K).contains(&distinct_lg_k),
            "distinct_lg_k must be in [{}, {}], got {}",
            MIN_LG_K,
            MAX_LG_K,
            distinct_lg_k
        );
        Self {
            seed,
            distinct_lg_k,
        }
    }

    /// Return the hash seed
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Estimate the number of distinct values in `column`.
    ///
    /// Returns exactly `0.0` for an empty column.
    pub fn estimate_distinct<T: AsRef<[u8]>>(&self, column: &[T]) -> f64 {
        self.sketch(column, self.distinct_lg_k).estimate()
    }

    /// Build the `2^m` bucket digest of `column`.
    ///
    /// An empty column yields a digest whose buckets are all `0`.
    ///
    /// # Panics
    ///
    /// If m is not in range [4, 16]
    pub fn build_sketch<T: AsRef<[u8]>>(&self, column: &[T], m: u8) -> BucketDigest {
        self.sketch(column, m).digest()
    }

    fn sketch<T: AsRef<[u8]>>(&self, column: &[T], lg_k: u8) -> HllSketch {
        let mut sketch = HllSketch::builder().lg_k(lg_k).seed(self.seed).build();
        for value in column {
            sketch.update(value);
        }
        sketch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_exponent_follows_larger_count() {
        // log2(1000 / 2) = 8.97
        assert_eq!(choose_bucket_exponent(1_000.0, 10.0), 9);
        assert_eq!(choose_bucket_exponent(10.0, 1_000.0), 9);
        // log2(100_000 / 2) = 15.6
        assert_eq!(choose_bucket_exponent(100_000.0, 3.0), 16);
    }

    #[test]
    fn test_bucket_exponent_is_clamped() {
        assert_eq!(choose_bucket_exponent(4.0, 4.0), MIN_BUCKET_EXPONENT);
        assert_eq!(choose_bucket_exponent(0.0, 0.0), MIN_BUCKET_EXPONENT);
        assert_eq!(choose_bucket_exponent(f64::NAN, 1.0), MIN_BUCKET_EXPONENT);
        assert_eq!(choose_bucket_exponent(1e12, 1.0), MAX_BUCKET_EXPONENT);
    }

    #[test]
    fn test_parameters_split_hash_width() {
        let params = BucketParameters::for_counts(1_000.0, 500.0);
        assert_eq!(params, BucketParameters { m: 9, k: 23 });
        assert_eq!(params.num_buckets(), 512);

        let small = BucketParameters::for_counts(1.0, 1.0);
        assert_eq!(small, BucketParameters { m: 4, k: 28 });
    }

    #[test]
    fn test_empty_column() {
        let sketcher = ColumnSketcher::default();
        let empty: [&str; 0] = [];
        assert_eq!(sketcher.estimate_distinct(&empty), 0.0);
        let digest = sketcher.build_sketch(&empty, 4);
        assert_eq!(digest.len(), 16);
        assert!(digest.iter().all(|value| value == 0));
    }

    #[test]
    fn test_duplicates_count_once() {
        let sketcher = ColumnSketcher::default();
        let n = sketcher.estimate_distinct(&["a", "a", "a"]);
        assert!((n - 1.0).abs() < 0.01, "n={n}");
    }

    #[test]
    fn test_digests_share_seed() {
        let sketcher = ColumnSketcher::new(7, 10);
        let left = sketcher.build_sketch(&["a", "b"], 5);
        let right = sketcher.build_sketch(&[String::from("a"), String::from("b")], 5);
        assert_eq!(left, right);
        assert_eq!(sketcher.seed(), 7);
    }
}
