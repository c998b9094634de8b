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

use std::ops::Index;

/// Immutable copy of an [`HllSketch`](crate::hll::HllSketch)'s bucket values.
///
/// Two digests are comparable bucket by bucket only when they were built with
/// the same `lg_k`, which is reflected in equal lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketDigest {
    lg_k: u8,
    values: Box<[u8]>,
}

impl BucketDigest {
    pub(crate) fn new(lg_k: u8, values: Box<[u8]>) -> Self {
        debug_assert_eq!(values.len(), 1 << lg_k);
        Self { lg_k, values }
    }

    /// Return the bucket exponent the digest was built with.
    pub fn lg_k(&self) -> u8 {
        self.lg_k
    }

    /// Return the number of buckets (`2^lg_k`).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// A digest always holds at least 16 buckets.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return the bucket values in bucket order.
    pub fn as_slice(&self) -> &[u8] {
        &self.values
    }

    /// Return an iterator over the bucket values.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.values.iter().copied()
    }
}

impl Index<usize> for BucketDigest {
    type Output = u8;

    fn index(&self, bucket: usize) -> &u8 {
        &self.values[bucket]
    }
}

impl AsRef<[u8]> for BucketDigest {
    fn as_ref(&self) -> &[u8] {
        &self.values
    }
}
