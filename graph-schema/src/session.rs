// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Session interface consumed by the schema service
//!
//! Connection setup, credentials and pooling live with the caller. The
//! service only needs a handle that can run a statement, report the plan
//! type of an `EXPLAIN`, and be released once.

use std::fmt;

use crate::cypher::Statement;
use crate::value::Record;

/// Store error code reported when a called procedure does not exist
pub const PROCEDURE_NOT_FOUND: &str = "Neo.ClientError.Procedure.ProcedureNotFound";

/// A failure reported by the store or the transport
#[derive(Debug, Clone, PartialEq)]
pub struct SessionError {
    /// Store-specific status code, when the failure came from the store
    pub code: Option<String>,
    /// Human readable message
    pub message: String,
}

impl SessionError {
    /// Failure without a status code (network, driver, ...)
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// Failure carrying a store status code
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    pub fn is_procedure_not_found(&self) -> bool {
        self.code.as_deref() == Some(PROCEDURE_NOT_FOUND)
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{}: {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for SessionError {}

/// Plan type reported by the store for an explained query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanType {
    /// `r` - reads only
    ReadOnly,
    /// `rw` - reads and writes data
    ReadWrite,
    /// `w` - writes data only
    WriteOnly,
    /// `s` - writes schema (indexes, constraints) only
    SchemaWrite,
}

impl PlanType {
    /// Parse the short code a Bolt result summary carries
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "r" => Some(PlanType::ReadOnly),
            "rw" => Some(PlanType::ReadWrite),
            "w" => Some(PlanType::WriteOnly),
            "s" => Some(PlanType::SchemaWrite),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            PlanType::ReadOnly => "r",
            PlanType::ReadWrite => "rw",
            PlanType::WriteOnly => "w",
            PlanType::SchemaWrite => "s",
        }
    }

    /// Plans that leave graph data untouched
    pub fn is_read_only(&self) -> bool {
        matches!(self, PlanType::ReadOnly | PlanType::SchemaWrite)
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Handle to an externally owned database session
pub trait GraphSession {
    /// Run a statement and collect every record
    fn run(&mut self, statement: &Statement) -> Result<Vec<Record>, SessionError>;

    /// Run an `EXPLAIN` statement and return the reported plan type.
    /// Nothing is executed against the data.
    fn plan_type(&mut self, statement: &Statement) -> Result<PlanType, SessionError>;

    /// Release the underlying session. Called at most once by the service.
    fn close(&mut self) {}
}

impl<S: GraphSession + ?Sized> GraphSession for Box<S> {
    fn run(&mut self, statement: &Statement) -> Result<Vec<Record>, SessionError> {
        (**self).run(statement)
    }

    fn plan_type(&mut self, statement: &Statement) -> Result<PlanType, SessionError> {
        (**self).plan_type(statement)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_type_codes() {
        for code in ["r", "rw", "w", "s"] {
            let plan = PlanType::from_code(code).unwrap();
            assert_eq!(plan.code(), code);
        }
        assert_eq!(PlanType::from_code("x"), None);
    }

    #[test]
    fn test_plan_type_read_only() {
        assert!(PlanType::ReadOnly.is_read_only());
        assert!(PlanType::SchemaWrite.is_read_only());
        assert!(!PlanType::ReadWrite.is_read_only());
        assert!(!PlanType::WriteOnly.is_read_only());
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::with_code(PROCEDURE_NOT_FOUND, "missing");
        assert!(err.is_procedure_not_found());
        assert_eq!(
            err.to_string(),
            "Neo.ClientError.Procedure.ProcedureNotFound: missing"
        );
        assert!(!SessionError::new("timeout").is_procedure_not_found());
    }
}
