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

//! One byte per bucket register array.
//!
//! Bucket values never exceed `32 - 4 + 1 = 29`, so a byte per slot is ample
//! and no bit-packing is needed.

use crate::hll::estimator;

/// Register array storing one byte per bucket
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Array8 {
    lg_config_k: u8,
    /// Direct byte array: bytes[slot] = value
    bytes: Box<[u8]>,
    /// Count of slots with value 0
    num_zeros: u32,
}

impl Array8 {
    pub fn new(lg_config_k: u8) -> Self {
        let k = 1u32 << lg_config_k;

        Self {
            lg_config_k,
            bytes: vec![0u8; k as usize].into_boxed_slice(),
            num_zeros: k,
        }
    }

    /// Get value from a slot
    #[inline]
    pub fn get(&self, slot: u32) -> u8 {
        self.bytes[slot as usize]
    }

    #[inline]
    fn put(&mut self, slot: u32, value: u8) {
        self.bytes[slot as usize] = value;
    }

    /// Keep the larger of the current and the new value in `slot`.
    pub fn update(&mut self, slot: u32, new_value: u8) {
        let old_value = self.get(slot);
        if new_value > old_value {
            self.put(slot, new_value);
            if old_value == 0 {
                self.num_zeros -= 1;
            }
        }
    }

    /// Number of slots still holding 0
    pub fn num_zeros(&self) -> u32 {
        self.num_zeros
    }

    pub fn num_slots(&self) -> usize {
        self.bytes.len()
    }

    pub fn lg_config_k(&self) -> u8 {
        self.lg_config_k
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Cardinality estimate of everything routed into this array
    pub fn estimate(&self) -> f64 {
        estimator::estimate(&self.bytes, self.num_zeros)
    }
}
