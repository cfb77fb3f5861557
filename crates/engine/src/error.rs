// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use jd_core::{JobId, JobKind};
use jd_sandbox::{SandboxError, ValidationError};
use jd_storage::StoreError;
use thiserror::Error;

/// Errors returned by [`crate::Orchestrator`] operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid job parameters: {0}")]
    Validation(#[from] ValidationError),

    #[error("job {id} failed to launch: {source}")]
    Launch {
        id: JobId,
        #[source]
        source: SandboxError,
    },

    #[error("job {id} could not be probed: {source}")]
    Probe {
        id: JobId,
        #[source]
        source: SandboxError,
    },

    #[error("ledger error: {0}")]
    Storage(#[from] StoreError),

    #[error("job {id} has unknown kind `{kind}`")]
    UnknownKind { id: JobId, kind: JobKind },

    #[error("job not found: {0}")]
    NotFound(JobId),

    #[error("undecodable record for job {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot resolve a state directory: set JD_STATE_DIR or HOME")]
    NoStateDir,
}
