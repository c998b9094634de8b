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

//! Error types for colsketches.

use std::fmt;

/// The kind of failure reported by an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A column is empty or its estimated distinct count is zero or not
    /// finite, so the inclusion coefficient cannot be computed.
    DegenerateInput,
    /// The bisection search ran out of iterations, or its interval collapsed,
    /// before the model probability came within tolerance of the target.
    NonConvergence,
    /// Two bucket digests of different lengths were compared.
    SketchMismatch,
    /// A search target or interval lies outside the range the model is
    /// defined on.
    InvalidArgument,
}

impl ErrorKind {
    /// Convert this kind to a static str.
    pub const fn into_static(self) -> &'static str {
        match self {
            ErrorKind::DegenerateInput => "DegenerateInput",
            ErrorKind::NonConvergence => "NonConvergence",
            ErrorKind::SketchMismatch => "SketchMismatch",
            ErrorKind::InvalidArgument => "InvalidArgument",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_static())
    }
}

/// Error returned by inclusion estimation.
///
/// An error carries its [`ErrorKind`], a human readable message and a list of
/// key/value pairs describing the state at the point of failure.
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: vec![],
        }
    }

    /// Attach a key/value pair to this error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Return the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return the message of this error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Return the value recorded for `key`, if any.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl Error {
    pub(crate) fn degenerate_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DegenerateInput, message)
    }

    pub(crate) fn non_convergence(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NonConvergence, message)
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    pub(crate) fn sketch_mismatch(left_len: usize, right_len: usize) -> Self {
        Self::new(
            ErrorKind::SketchMismatch,
            "digests must be built with the same bucket exponent",
        )
        .with_context("left_len", left_len)
        .with_context("right_len", right_len)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if !self.context.is_empty() {
            write!(f, ", context: {{ ")?;
            write!(
                f,
                "{}",
                self.context
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Use the compact form when `{:#?}` is not requested.
        if !f.alternate() {
            return write!(f, "{self}");
        }

        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("message", &self.message)
            .field("context", &self.context)
            .finish()
    }
}

impl std::error::Error for Error {}
