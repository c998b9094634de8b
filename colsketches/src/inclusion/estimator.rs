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

//! Inclusion coefficient estimation for a column pair.

use crate::error::Error;
use crate::error::ErrorKind;
use crate::hash::DEFAULT_UPDATE_SEED;
use crate::hll::BucketDigest;
use crate::hll::DEFAULT_LG_K;
use crate::hll::MAX_LG_K;
use crate::hll::MIN_LG_K;
use crate::inclusion::column::BucketParameters;
use crate::inclusion::column::ColumnSketcher;
use crate::inclusion::search::DEFAULT_MAX_ITERATIONS;
use crate::inclusion::search::DEFAULT_TOLERANCE;
use crate::inclusion::search::InclusionLookup;
use crate::inclusion::search::SearchInterval;
use crate::inclusion::search::SearchOutcome;

/// Fraction of buckets where the X value does not exceed the Y value.
///
/// # Errors
///
/// [`ErrorKind::SketchMismatch`](crate::ErrorKind::SketchMismatch) if the
/// digests differ in length.
pub fn agreement_ratio(s_x: &[u8], s_y: &[u8]) -> Result<f64, Error> {
    if s_x.len() != s_y.len() {
        return Err(Error::sketch_mismatch(s_x.len(), s_y.len()));
    }
    if s_x.is_empty() {
        return Err(Error::new(
            ErrorKind::SketchMismatch,
            "digests must hold at least one bucket",
        ));
    }

    let agreeing = s_x
        .iter()
        .zip(s_y.iter())
        .filter(|(x, y)| x <= y)
        .count();
    Ok(agreeing as f64 / s_x.len() as f64)
}

/// Everything computed while estimating one column pair.
#[derive(Debug, Clone, PartialEq)]
pub struct InclusionEstimate {
    /// Estimated distinct count of X.
    pub n_x: f64,
    /// Estimated distinct count of Y.
    pub n_y: f64,
    /// Bucket exponent shared by both digests and the value bit count.
    pub params: BucketParameters,
    /// Agreement ratio `P` of the two digests.
    pub agreement: f64,
    /// The converged search.
    pub outcome: SearchOutcome,
}

impl InclusionEstimate {
    /// Estimated inclusion coefficient of X in Y.
    pub fn phi(&self) -> f64 {
        self.outcome.phi
    }
}

/// Estimates the fraction of X's distinct values that also appear in Y.
///
/// The estimate is directional: `estimate_inclusion(x, y)` and
/// `estimate_inclusion(y, x)` generally differ.
///
/// An estimator holds only configuration, so one instance can serve any number
/// of comparisons, including from several threads.
///
/// # Usage
///
/// ```rust
/// # use colsketches::inclusion::InclusionEstimator;
/// let estimator = InclusionEstimator::builder().tolerance(0.01).build();
/// let x: Vec<String> = (0..1_000).map(|i| i.to_string()).collect();
/// let phi = estimator.estimate_inclusion(&x, &x).unwrap();
/// assert!(phi > 0.9 && phi <= 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InclusionEstimator {
    sketcher: ColumnSketcher,
    lookup: InclusionLookup,
}

impl Default for InclusionEstimator {
    fn default() -> Self {
        InclusionEstimatorBuilder::default().build()
    }
}

impl InclusionEstimator {
    /// Create a new builder for InclusionEstimator
    pub fn builder() -> InclusionEstimatorBuilder {
        InclusionEstimatorBuilder::default()
    }

    /// Return the column sketcher
    pub fn sketcher(&self) -> &ColumnSketcher {
        &self.sketcher
    }

    /// Return the search configuration
    pub fn lookup(&self) -> &InclusionLookup {
        &self.lookup
    }

    /// Estimate the inclusion coefficient of `column_x` in `column_y`.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::DegenerateInput`](crate::ErrorKind::DegenerateInput) if
    ///   either column is empty.
    /// - [`ErrorKind::NonConvergence`](crate::ErrorKind::NonConvergence) if
    ///   the search does not reach the tolerance.
    pub fn estimate_inclusion<X, Y>(&self, column_x: &[X], column_y: &[Y]) -> Result<f64, Error>
    where
        X: AsRef<[u8]>,
        Y: AsRef<[u8]>,
    {
        self.estimate_with_details(column_x, column_y)
            .map(|estimate| estimate.phi())
    }

    /// Like [`estimate_inclusion`](Self::estimate_inclusion), returning the
    /// intermediate quantities as well.
    pub fn estimate_with_details<X, Y>(
        &self,
        column_x: &[X],
        column_y: &[Y],
    ) -> Result<InclusionEstimate, Error>
    where
        X: AsRef<[u8]>,
        Y: AsRef<[u8]>,
    {
        let n_x = self.sketcher.estimate_distinct(column_x);
        let n_y = self.sketcher.estimate_distinct(column_y);
        ensure_positive_counts(n_x, n_y)?;

        let params = BucketParameters::for_counts(n_x, n_y);
        let s_x = self.sketcher.build_sketch(column_x, params.m);
        let s_y = self.sketcher.build_sketch(column_y, params.m);
        self.estimate_from_parts(&s_x, &s_y, n_x, n_y)
    }

    /// Estimate from digests and distinct counts computed beforehand.
    ///
    /// Both digests must come from a sketcher with this estimator's seed and
    /// share their bucket exponent.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::DegenerateInput`](crate::ErrorKind::DegenerateInput) if
    ///   `n_x` or `n_y` is not a finite positive number.
    /// - [`ErrorKind::SketchMismatch`](crate::ErrorKind::SketchMismatch) if
    ///   the digests differ in length.
    /// - [`ErrorKind::NonConvergence`](crate::ErrorKind::NonConvergence) if
    ///   the search does not reach the tolerance.
    pub fn estimate_from_parts(
        &self,
        s_x: &BucketDigest,
        s_y: &BucketDigest,
        n_x: f64,
        n_y: f64,
    ) -> Result<InclusionEstimate, Error> {
        ensure_positive_counts(n_x, n_y)?;
        let agreement = agreement_ratio(s_x.as_slice(), s_y.as_slice())?;
        let params = BucketParameters::for_exponent(s_x.lg_k());

        tracing::debug!(
            n_x,
            n_y,
            m = params.m,
            k = params.k,
            agreement,
            "estimating inclusion coefficient"
        );

        let outcome = self.lookup.run(
            agreement,
            SearchInterval::for_counts(n_x, n_y),
            n_x,
            n_y,
            params.k,
        )?;

        Ok(InclusionEstimate {
            n_x,
            n_y,
            params,
            agreement,
            outcome,
        })
    }
}

fn ensure_positive_counts(n_x: f64, n_y: f64) -> Result<(), Error> {
    if n_x > 0.0 && n_y > 0.0 && n_x.is_finite() && n_y.is_finite() {
        Ok(())
    } else {
        Err(
            Error::degenerate_input("both columns need a positive distinct count")
                .with_context("n_x", n_x)
                .with_context("n_y", n_y),
        )
    }
}

/// Builder for InclusionEstimator
#[derive(Debug)]
pub struct InclusionEstimatorBuilder {
    tolerance: f64,
    max_iterations: usize,
    seed: u32,
    distinct_lg_k: u8,
}

impl Default for InclusionEstimatorBuilder {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: DEFAULT_UPDATE_SEED,
            distinct_lg_k: DEFAULT_LG_K,
        }
    }
}

impl InclusionEstimatorBuilder {
    /// Set the convergence tolerance on `|prob - P|`.
    ///
    /// # Panics
    ///
    /// If tolerance is not in range (0.0, 1.0)
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        assert!(
            tolerance > 0.0 && tolerance < 1.0,
            "tolerance must be in (0.0, 1.0), got {tolerance}"
        );
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration cap of the search.
    ///
    /// # Panics
    ///
    /// If max_iterations is zero
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        assert!(max_iterations > 0, "max_iterations must be positive");
        self.max_iterations = max_iterations;
        self
    }

    /// Set hash seed.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Set lg_k of the sketch used for distinct counting.
    ///
    /// # Panics
    ///
    /// If distinct_lg_k is not in range [4, 16]
    pub fn distinct_lg_k(mut self, distinct_lg_k: u8) -> Self {
        assert!(
            (MIN_LG_K..=MAX_LG_K).contains(&distinct_lg_k),
            "distinct_lg_k must be in [{}, {}], got {}",
            MIN_LG_K,
            MAX_LG_K,
            distinct_lg_k
        );
        self.distinct_lg_k = distinct_lg_k;
        self
    }

    /// Build the InclusionEstimator.
    pub fn build(self) -> InclusionEstimator {
        InclusionEstimator {
            sketcher: ColumnSketcher::new(self.seed, self.distinct_lg_k),
            lookup: InclusionLookup::new(self.tolerance, self.max_iterations),
        }
    }
}
