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

//! Estimation of inclusion coefficients between data columns.
//!
//! Given two columns of raw values, this crate estimates which fraction of the
//! distinct values of one column also occur in the other, using only compact
//! HyperLogLog sketches of each column.
//!
//! - [`hll`] provides the sketch used both for distinct counting and for the
//!   per-bucket digests compared between columns.
//! - [`inclusion`] provides the comparison itself.
//!
//! Results are approximate and depend on the hash seed.

mod error;
pub use self::error::Error;
pub use self::error::ErrorKind;

mod hash;
pub use self::hash::DEFAULT_UPDATE_SEED;
pub use self::hash::HASH_BITS;

pub mod hll;
pub mod inclusion;
