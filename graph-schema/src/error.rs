// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for schema inference

use thiserror::Error;

use crate::session::SessionError;

/// Result type alias for schema operations
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;

/// Main error type for schema inference
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The metadata introspection procedure is not installed on the store.
    /// Recovered internally by switching to sampling discovery.
    #[error("Metadata procedure unavailable: {0}")]
    ProcedureUnavailable(String),

    /// Any other failure while talking to the store
    #[error("Schema discovery failed: {0}")]
    DiscoveryFailed(#[source] SessionError),

    /// Relationship or generic query schemas requested while
    /// `unsupported_kind_is_error` is enabled
    #[error("Unsupported schema kind: {0}")]
    UnsupportedSchemaKind(String),

    /// A query expected to be read-only would mutate data
    #[error("Query is not read-only: {0}")]
    QueryNotReadOnly(String),

    /// Option validation errors
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// The service was used after `close`
    #[error("Session already closed")]
    SessionClosed,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SchemaError {
    /// Whether the service recovers from this error on its own
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SchemaError::ProcedureUnavailable(_))
    }
}

impl From<SessionError> for SchemaError {
    fn from(e: SessionError) -> Self {
        if e.is_procedure_not_found() {
            SchemaError::ProcedureUnavailable(e.message)
        } else {
            SchemaError::DiscoveryFailed(e)
        }
    }
}
