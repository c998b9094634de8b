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

//! 32-bit hashing of raw values.
//!
//! Every value is reduced to its byte form and hashed with MurmurHash3 x86_32.
//! The hash width is fixed at [`HASH_BITS`]: the low bits select a bucket and
//! the remaining bits populate the bucket value.

use std::io::Cursor;

/// Width in bits of the hash that feeds the sketches.
pub const HASH_BITS: u8 = 32;

/// Default seed for hashing values into sketches.
pub const DEFAULT_UPDATE_SEED: u32 = 9001;

/// Hash `bytes` with MurmurHash3 x86_32 and the given seed.
pub(crate) fn hash32(bytes: &[u8], seed: u32) -> u32 {
    murmur3::murmur3_32(&mut Cursor::new(bytes), seed).expect("in-memory read")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_vectors() {
        assert_eq!(hash32(b"", 0), 0);
        assert_eq!(hash32(b"", 1), 0x514e_28b7);
        assert_eq!(hash32(b"hello", 0), 0x248b_fa47);
        assert_eq!(
            hash32(b"The quick brown fox jumps over the lazy dog", 0),
            0x2e4f_f723
        );
    }

    #[test]
    fn test_seed_changes_hash() {
        assert_ne!(hash32(b"apple", DEFAULT_UPDATE_SEED), hash32(b"apple", 1));
    }
}
