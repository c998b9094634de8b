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

//! HyperLogLog sketch over 32-bit hashes.
//!
//! The sketch keeps one register per bucket. A value's hash is split into two
//! parts: the low `lg_k` bits select the bucket and the remaining
//! `32 - lg_k` bits determine the bucket value (the position of the leftmost
//! set bit, counted from one). A register holds the largest value routed to it
//! and `0` while the bucket is empty.
//!
//! The same sketch serves two purposes: estimating the distinct count of a
//! column, and producing a [`BucketDigest`] whose per-bucket values can be
//! compared against the digest of another column built with the same `lg_k`.
//!
//! # Usage
//!
//! ```rust
//! # use colsketches::hll::HllSketch;
//! let mut sketch = HllSketch::builder().lg_k(10).build();
//! for value in ["apple", "banana", "apple"] {
//!     sketch.update(value);
//! }
//! assert!((sketch.estimate() - 2.0).abs() < 0.5);
//! assert_eq!(sketch.digest().len(), 1024);
//! ```

mod array8;
mod digest;
mod estimator;
mod sketch;

pub use self::digest::BucketDigest;
pub use self::sketch::HllSketch;
pub use self::sketch::HllSketchBuilder;

use crate::hash::HASH_BITS;

/// Smallest supported bucket exponent (16 buckets).
pub const MIN_LG_K: u8 = 4;
/// Largest supported bucket exponent.
pub const MAX_LG_K: u8 = 16;
/// Bucket exponent used when none is configured.
pub const DEFAULT_LG_K: u8 = 12;

/// Bucket selected by the low `lg_k` bits of `hash`.
#[inline]
pub(crate) fn get_slot(hash: u32, lg_k: u8) -> u32 {
    hash & ((1 << lg_k) - 1)
}

/// Bucket value for the high `32 - lg_k` bits of `hash`.
///
/// The value is `k - bit_length(w) + 1` where `w = hash >> lg_k` and
/// `k = 32 - lg_k`, so it lies in `[1, k + 1]`.
#[inline]
pub(crate) fn get_value(hash: u32, lg_k: u8) -> u8 {
    let w = hash >> lg_k;
    // `w` has `lg_k` leading zeros from the shift alone.
    let value = w.leading_zeros() - lg_k as u32 + 1;
    debug_assert!(value <= (HASH_BITS - lg_k) as u32 + 1);
    value as u8
}
