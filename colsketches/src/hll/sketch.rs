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

//! HyperLogLog sketch and its builder

use crate::hash::DEFAULT_UPDATE_SEED;
use crate::hash::hash32;
use crate::hll::BucketDigest;
use crate::hll::DEFAULT_LG_K;
use crate::hll::MAX_LG_K;
use crate::hll::MIN_LG_K;
use crate::hll::array8::Array8;
use crate::hll::get_slot;
use crate::hll::get_value;

/// HyperLogLog sketch over the byte form of values.
///
/// Each sketch owns its registers; build one per column and never share it
/// between comparisons.
#[derive(Debug, Clone, PartialEq)]
pub struct HllSketch {
    registers: Array8,
    seed: u32,
}

impl HllSketch {
    /// Create a new builder for HllSketch
    pub fn builder() -> HllSketchBuilder {
        HllSketchBuilder::default()
    }

    /// Update the sketch with the byte form of a value.
    ///
    /// Text is hashed as its UTF-8 bytes.
    pub fn update(&mut self, value: impl AsRef<[u8]>) {
        let lg_k = self.registers.lg_config_k();
        let hash = hash32(value.as_ref(), self.seed);
        self.registers
            .update(get_slot(hash, lg_k), get_value(hash, lg_k));
    }

    /// Return the cardinality estimate; exactly `0.0` for an empty sketch.
    pub fn estimate(&self) -> f64 {
        self.registers.estimate()
    }

    /// Check if no value has been observed
    pub fn is_empty(&self) -> bool {
        self.registers.num_zeros() as usize == self.registers.num_slots()
    }

    /// Return lg_k (log2 of the bucket count)
    pub fn lg_k(&self) -> u8 {
        self.registers.lg_config_k()
    }

    /// Return the bucket count
    pub fn num_buckets(&self) -> usize {
        self.registers.num_slots()
    }

    /// Return the hash seed
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Return a copy of the per-bucket values.
    pub fn digest(&self) -> BucketDigest {
        BucketDigest::new(self.lg_k(), self.registers.as_slice().into())
    }
}

/// Builder for HllSketch
#[derive(Debug)]
pub struct HllSketchBuilder {
    lg_k: u8,
    seed: u32,
}

impl Default for HllSketchBuilder {
    fn default() -> Self {
        Self {
            lg_k: DEFAULT_LG_K,
            seed: DEFAULT_UPDATE_SEED,
        }
    }
}

impl HllSketchBuilder {
    /// Set lg_k (log2 of the bucket count).
    ///
    /// # Panics
    ///
    /// If lg_k is not in range [4, 16]
    pub fn lg_k(mut self, lg_k: u8) -> Self {
        assert!(
            (MIN_LG_K..=MAX_LG_K).contains(&lg_k),
            "lg_k must be in [{}, {}], got {}",
            MIN_LG_K,
            MAX_LG_K,
            lg_k
        );
        self.lg_k = lg_k;
        self
    }

    /// Set hash seed.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Build the HllSketch.
    pub fn build(self) -> HllSketch {
        HllSketch {
            registers: Array8::new(self.lg_k),
            seed: self.seed,
        }
    }
}
