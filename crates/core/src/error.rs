// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use refgrid_domain::DomainError;
use refgrid_ingest::{IngestError, InputKind};

/// Errors and conditions surfaced by the reconciliation pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// An input could not be fully read.
    Ingest(IngestError),
    /// The match id is absent from one side of the join; scores were not attached.
    MissingJoinKey {
        /// The input lacking the match id.
        input: InputKind,
    },
    /// The configuration is unusable.
    InvalidConfig {
        /// What is wrong with it.
        reason: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Ingest(err) => write!(f, "Input problem: {err}"),
            Self::MissingJoinKey { input } => write!(
                f,
                "{input}: match id not available; matches shown without scores"
            ),
            Self::InvalidConfig { reason } => write!(f, "Invalid configuration: {reason}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<IngestError> for CoreError {
    fn from(err: IngestError) -> Self {
        Self::Ingest(err)
    }
}
