// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures raised by the record store. Callers get these unchanged; nothing
/// in the aggregation layer retries or swallows them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("{kind} #{id} not found")]
    NotFound { kind: &'static str, id: i64 },

    #[error("category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("corrupt {column} value '{value}' in row {id}")]
    Corrupt {
        column: &'static str,
        id: i64,
        value: String,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from parsing user-facing values such as `2024-09` or `expense`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid month '{0}', expected YYYY-MM")]
    Month(String),

    #[error("Unknown transaction type '{0}', expected income|expense")]
    Kind(String),
}
