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

//! Probability model relating the overlap size to the agreement ratio.
//!
//! For a candidate overlap size `n_tau`, the model gives the probability that
//! a bucket value of the X digest does not exceed the one of the Y digest.
//! Each regime sums over bucket value levels `i = 1..=k`.

use std::fmt;

/// Relative precision used when comparing `n_tau` with `0`, `n_x` and `n_y`.
const CASE_EPSILON: f64 = 1e-9;

/// `(1 - 2^-i)^n`: none of `n` elements reaches level `i + 1`.
pub fn support_1(n: f64, i: u32) -> f64 {
    (1.0 - 2_f64.powi(-(i as i32))).powf(n)
}

/// `(1 - 2^-(i-1))^n`: none of `n` elements reaches level `i`.
pub fn support_2(n: f64, i: u32) -> f64 {
    (1.0 - 2_f64.powi(1 - i as i32)).powf(n)
}

/// Probability that the maximum level among `n` elements is exactly `i`.
pub fn support_3(n: f64, i: u32) -> f64 {
    support_1(n, i) - support_2(n, i)
}

/// `|a - b|` within [`CASE_EPSILON`] relative to the larger magnitude, or
/// absolutely when both are below one.
fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= CASE_EPSILON * a.abs().max(b.abs()).max(1.0)
}

/// Overlap regime for a candidate `n_tau`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapCase {
    /// `n_tau` equals both `n_x` and `n_y`: the columns look identical.
    Degenerate,
    /// `n_tau == 0`: no common values.
    Disjoint,
    /// `n_x > n_y` and `n_tau == n_y`: Y is contained in X.
    Subset,
    /// Anything else.
    PartialOverlap,
}

impl OverlapCase {
    /// Pick the regime for `n_tau` given the distinct counts.
    pub fn select(n_tau: f64, n_x: f64, n_y: f64) -> Self {
        if approx_eq(n_tau, n_x) && approx_eq(n_tau, n_y) {
            OverlapCase::Degenerate
        } else if approx_eq(n_tau, 0.0) {
            OverlapCase::Disjoint
        } else if n_x > n_y && approx_eq(n_tau, n_y) {
            OverlapCase::Subset
        } else {
            OverlapCase::PartialOverlap
        }
    }

    /// Model probability for this regime, as an absolute value.
    pub fn probability(self, k: u8, n_tau: f64, n_x: f64, n_y: f64) -> f64 {
        let n_xx = n_x - n_tau;
        let n_yy = n_y - n_tau;
        let prob = match self {
            OverlapCase::Degenerate => 1.0,
            OverlapCase::Disjoint => disjoint(k, n_xx, n_yy),
            OverlapCase::Subset => subset(k, n_xx, n_tau),
            OverlapCase::PartialOverlap => partial_overlap(k, n_xx, n_yy, n_tau),
        };
        // Floating point noise can push a near-zero sum below zero.
        prob.abs()
    }

    /// Short lowercase name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            OverlapCase::Degenerate => "degenerate",
            OverlapCase::Disjoint => "disjoint",
            OverlapCase::Subset => "subset",
            OverlapCase::PartialOverlap => "partial-overlap",
        }
    }
}

impl fmt::Display for OverlapCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `sum f1(n_xx, i) * f3(n_yy, i)`
pub fn disjoint(k: u8, n_xx: f64, n_yy: f64) -> f64 {
    (1..=k as u32)
        .map(|i| support_1(n_xx, i) * support_3(n_yy, i))
        .sum()
}

/// `sum f1(n_xx, i) * f3(n_tau, i)`
pub fn subset(k: u8, n_xx: f64, n_tau: f64) -> f64 {
    (1..=k as u32)
        .map(|i| support_1(n_xx, i) * support_3(n_tau, i))
        .sum()
}

/// `sum f1(n_xx, i) * [f2(n_tau, i) f3(n_yy, i) + f3(n_tau, i) f2(n_yy, i) + f3(n_tau, i) f3(n_yy, i)]`
pub fn partial_overlap(k: u8, n_xx: f64, n_yy: f64, n_tau: f64) -> f64 {
    (1..=k as u32)
        .map(|i| {
            let x = support_1(n_xx, i);
            x * support_2(n_tau, i) * support_3(n_yy, i)
                + x * support_3(n_tau, i) * support_2(n_yy, i)
                + x * support_3(n_tau, i) * support_3(n_yy, i)
        })
        .sum()
}
