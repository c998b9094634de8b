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

//! Bounded bisection over the overlap size.
//!
//! The model probability rises with `n_tau`: when it falls short of the
//! observed agreement ratio the search moves to the upper half of the
//! interval, otherwise to the lower half.

use crate::error::Error;
use crate::inclusion::model::OverlapCase;

/// Default distance between model probability and target at which the
/// search stops.
pub const DEFAULT_TOLERANCE: f64 = 0.01;
/// Default cap on search iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 128;

/// Range of candidate overlap sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchInterval {
    /// Lower bound on `n_tau`.
    pub min: f64,
    /// Upper bound on `n_tau`.
    pub max: f64,
}

impl SearchInterval {
    /// The full range `[0, min(n_x, n_y)]`.
    pub fn for_counts(n_x: f64, n_y: f64) -> Self {
        Self {
            min: 0.0,
            max: n_x.min(n_y),
        }
    }

    /// Candidate overlap size probed next.
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// State of one search iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStep {
    /// Zero-based iteration number.
    pub iteration: usize,
    /// Regime the model was evaluated in.
    pub case: OverlapCase,
    /// Interval before this step narrowed it.
    pub interval: SearchInterval,
    /// Candidate overlap size, the interval midpoint.
    pub n_tau: f64,
    /// Model probability at `n_tau`.
    pub prob: f64,
    /// Inclusion coefficient `n_tau / n_x` for this candidate.
    pub phi: f64,
}

/// Result of a converged search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Estimated inclusion coefficient `n_tau / n_x`.
    pub phi: f64,
    /// Estimated overlap size.
    pub n_tau: f64,
    /// Model probability at `n_tau`.
    pub prob: f64,
    /// Every iteration, the converged one last.
    pub steps: Vec<SearchStep>,
}

impl SearchOutcome {
    /// Number of iterations the search took.
    pub fn iterations(&self) -> usize {
        self.steps.len()
    }
}

/// Inverts the probability model by bisection.
///
/// # Usage
///
/// ```rust
/// # use colsketches::inclusion::InclusionLookup;
/// # use colsketches::inclusion::SearchInterval;
/// let lookup = InclusionLookup::default();
/// let interval = SearchInterval::for_counts(1_000.0, 1_000.0);
/// let outcome = lookup.run(0.74, interval, 1_000.0, 1_000.0, 23).unwrap();
/// assert!((outcome.prob - 0.74).abs() <= 0.01);
/// assert!(outcome.phi > 0.4 && outcome.phi < 0.6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InclusionLookup {
    tolerance: f64,
    max_iterations: usize,
}

impl Default for InclusionLookup {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl InclusionLookup {
    /// # Panics
    ///
    /// If tolerance is not in range (0.0, 1.0) or max_iterations is zero
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        assert!(
            tolerance > 0.0 && tolerance < 1.0,
            "tolerance must be in (0.0, 1.0), got {tolerance}"
        );
        assert!(max_iterations > 0, "max_iterations must be positive");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Distance from the target at which the search stops.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Cap on search iterations.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Search `interval` for the overlap size whose model probability is
    /// within tolerance of `target`.
    ///
    /// The search is a pure function of its arguments.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::DegenerateInput`](crate::ErrorKind::DegenerateInput) if
    ///   `n_x` or `n_y` is not a finite positive number.
    /// - [`ErrorKind::InvalidArgument`](crate::ErrorKind::InvalidArgument) if
    ///   `target` is not in `[0, 1]`, or `interval` is not a sub-range of
    ///   `[0, min(n_x, n_y)]`.
    /// - [`ErrorKind::NonConvergence`](crate::ErrorKind::NonConvergence) if
    ///   the iteration cap is reached, the interval can no longer be split,
    ///   or the model probability is not finite.
    pub fn run(
        &self,
        target: f64,
        interval: SearchInterval,
        n_x: f64,
        n_y: f64,
        k: u8,
    ) -> Result<SearchOutcome, Error> {
        // Comparisons with NaN are false, so NaN counts are rejected too.
        let positive = n_x > 0.0 && n_y > 0.0;
        if !positive || !n_x.is_finite() || !n_y.is_finite() {
            return Err(Error::degenerate_input(
                "distinct counts must be positive to estimate inclusion",
            )
            .with_context("n_x", n_x)
            .with_context("n_y", n_y));
        }
        if !(0.0..=1.0).contains(&target) {
            return Err(
                Error::invalid_argument("target must be in [0, 1]").with_context("target", target)
            );
        }
        let upper = n_x.min(n_y);
        let bounded = 0.0 <= interval.min && interval.min <= interval.max && interval.max <= upper;
        if !bounded {
            return Err(Error::invalid_argument(
                "search interval must lie within [0, min(n_x, n_y)]",
            )
            .with_context("min", interval.min)
            .with_context("max", interval.max)
            .with_context("upper", upper));
        }

        let mut interval = interval;
        let mut steps: Vec<SearchStep> = Vec::new();
        for iteration in 0..self.max_iterations {
            let n_tau = interval.midpoint();
            let phi = n_tau / n_x;
            let case = OverlapCase::select(n_tau, n_x, n_y);
            let prob = case.probability(k, n_tau, n_x, n_y);

            tracing::debug!(
                iteration,
                %case,
                min = interval.min,
                max = interval.max,
                n_tau,
                prob,
                phi,
                target,
                "inclusion lookup step"
            );
            steps.push(SearchStep {
                iteration,
                case,
                interval,
                n_tau,
                prob,
                phi,
            });
            ensure_finite(prob, target, &steps)?;

            if (prob - target).abs() <= self.tolerance {
                return Ok(SearchOutcome {
                    phi,
                    n_tau,
                    prob,
                    steps,
                });
            }

            // The midpoint no longer moves once the interval is a single value.
            if n_tau == interval.min || n_tau == interval.max {
                return Err(non_convergence("search interval collapsed", target, &steps));
            }

            if prob < target {
                interval.min = n_tau;
            } else {
                interval.max = n_tau;
            }
        }

        Err(non_convergence("iteration limit reached", target, &steps))
    }
}

fn ensure_finite(prob: f64, target: f64, steps: &[SearchStep]) -> Result<(), Error> {
    if prob.is_finite() {
        Ok(())
    } else {
        Err(non_convergence("model probability is not finite", target, steps))
    }
}

fn non_convergence(message: &str, target: f64, steps: &[SearchStep]) -> Error {
    let mut err = Error::non_convergence(message)
        .with_context("iterations", steps.len())
        .with_context("target", target);
    if let Some(last) = steps.last() {
        err = err
            .with_context("prob", last.prob)
            .with_context("phi", last.phi);
    }
    err
}
