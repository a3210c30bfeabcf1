// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors surfaced by the profile store. Durable-write failures are not
/// represented here: those are logged and swallowed at the write site.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Cannot delete the last remaining profile")]
    LastProfile,
    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),
    #[error("Invalid profile snapshot: {0}")]
    InvalidSnapshot(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
