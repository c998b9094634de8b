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

//! Inclusion coefficient estimation between two columns.
//!
//! The inclusion coefficient of X in Y is the fraction of X's distinct values
//! that also appear in Y. It is estimated without materializing either value
//! set:
//!
//! 1. Estimate the distinct counts `n_x` and `n_y`.
//! 2. Choose a bucket exponent `m` from the larger count, `k = 32 - m`.
//! 3. Build a `2^m` bucket HyperLogLog digest per column with the same `m`.
//! 4. Measure `P`, the fraction of buckets where the X value does not exceed
//!    the Y value.
//! 5. Invert a closed-form model of `P` as a function of the overlap size
//!    `n_tau` by bisection over `[0, min(n_x, n_y)]`, and report
//!    `phi = n_tau / n_x`.
//!
//! # References
//!
//! - Azade Nazi, Bolin Ding, Vivek Narasayya, Surajit Chaudhuri, "Efficient
//!   Estimation of Inclusion Coefficient using HyperLogLog Sketches".
//!
//! # Usage
//!
//! ```rust
//! # use colsketches::inclusion::InclusionEstimator;
//! # use colsketches::ErrorKind;
//! let estimator = InclusionEstimator::default();
//! let x = ["a", "a", "a"];
//! let y = ["a"];
//! let phi = estimator.estimate_inclusion(&x, &y).unwrap();
//! assert!(phi > 0.95 && phi <= 1.0);
//!
//! let empty: [&str; 0] = [];
//! let err = estimator.estimate_inclusion(&empty, &y).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::DegenerateInput);
//! ```

mod column;
mod estimator;
mod model;
mod search;

pub use self::column::BucketParameters;
pub use self::column::ColumnSketcher;
pub use self::column::MAX_BUCKET_EXPONENT;
pub use self::column::MIN_BUCKET_EXPONENT;
pub use self::column::choose_bucket_exponent;
pub use self::estimator::InclusionEstimate;
pub use self::estimator::InclusionEstimator;
pub use self::estimator::InclusionEstimatorBuilder;
pub use self::estimator::agreement_ratio;
pub use self::model::OverlapCase;
pub use self::model::disjoint;
pub use self::model::partial_overlap;
pub use self::model::subset;
pub use self::model::support_1;
pub use self::model::support_2;
pub use self::model::support_3;
pub use self::search::DEFAULT_MAX_ITERATIONS;
pub use self::search::DEFAULT_TOLERANCE;
pub use self::search::InclusionLookup;
pub use self::search::SearchInterval;
pub use self::search::SearchOutcome;
pub use self::search::SearchStep;
