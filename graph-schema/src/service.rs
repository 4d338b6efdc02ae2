// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema service
//!
//! This module ties discovery together:
//! - Node schemas via the metadata procedure, falling back to sampling when
//!   the procedure is not installed
//! - System fields appended after the sorted discovered fields
//! - Query classification through `EXPLAIN`
//! - Deterministic release of the held session
//!
//! Schemas are computed on every call; nothing is cached.

use std::collections::HashSet;

use crate::cypher::{self, LabelSelector};
use crate::discovery::{MetadataDiscovery, SamplingDiscovery};
use crate::error::{SchemaError, SchemaResult};
use crate::options::{QueryKind, SchemaOptions};
use crate::session::GraphSession;
use crate::type_mapping::map_type_with;
use crate::types::{Field, Schema};

/// Read/write intent of a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryClass {
    /// Reads data, or only touches schema (indexes, constraints)
    ReadOnly,
    /// Writes data
    Mutating,
}

/// Infers schemas over a session owned for the lifetime of the service
pub struct SchemaService<S: GraphSession> {
    session: Option<S>,
    options: SchemaOptions,
}

impl<S: GraphSession> SchemaService<S> {
    pub fn new(session: S, options: SchemaOptions) -> SchemaResult<Self> {
        options.validate()?;
        Ok(Self {
            session: Some(session),
            options,
        })
    }

    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }

    /// Infer the schema for the configured read
    pub fn infer_schema(&mut self) -> SchemaResult<Schema> {
        match self.options.query_kind()? {
            QueryKind::Labels(selector) => self.infer_node_schema(&selector),
            QueryKind::Relationship(rel_type) => self.infer_relationship_schema(&rel_type),
            QueryKind::Query(query) => self.infer_query_schema(&query),
        }
    }

    /// Infer the schema of nodes matching the selector
    pub fn infer_node_schema(&mut self, selector: &LabelSelector) -> SchemaResult<Schema> {
        let limit = self.options.schema_flatten_limit;
        let strategy = self.options.schema_strategy;
        let session = self.session.as_mut().ok_or(SchemaError::SessionClosed)?;

        let discovered = match MetadataDiscovery::new().discover(session, selector) {
            Ok(properties) => {
                let mut seen = HashSet::new();
                let mut fields = Vec::with_capacity(properties.len());
                for (name, type_name) in properties {
                    if !seen.insert(name.clone()) {
                        log::warn!("Property '{}' reported more than once, keeping first type", name);
                        continue;
                    }
                    fields.push(Field::nullable(name, map_type_with(&type_name, strategy)));
                }
                fields
            }
            Err(SchemaError::ProcedureUnavailable(reason)) => {
                log::info!("Metadata procedure unavailable ({}), sampling nodes", reason);
                SamplingDiscovery::new(limit, strategy)
                    .discover(session, selector)?
                    .into_iter()
                    .map(|(name, field_type)| Field::nullable(name, field_type))
                    .collect()
            }
            Err(e) => return Err(e),
        };

        log::debug!("Discovered {} fields for '{}'", discovered.len(), selector);
        Ok(Schema::for_nodes(discovered))
    }

    /// Relationship schemas are not inferred yet
    pub fn infer_relationship_schema(&mut self, rel_type: &str) -> SchemaResult<Schema> {
        self.unsupported(format!("relationship '{}'", rel_type))
    }

    /// Generic query schemas are not inferred yet
    pub fn infer_query_schema(&mut self, query: &str) -> SchemaResult<Schema> {
        self.unsupported(format!("query '{}'", query))
    }

    fn unsupported(&self, what: String) -> SchemaResult<Schema> {
        if self.session.is_none() {
            return Err(SchemaError::SessionClosed);
        }
        if self.options.unsupported_kind_is_error {
            return Err(SchemaError::UnsupportedSchemaKind(what));
        }
        log::warn!("Schema inference not supported for {}, returning empty schema", what);
        Ok(Schema::empty())
    }

    /// Classify a query by the plan the store would produce for it.
    /// The query itself is never executed.
    pub fn classify_query(&mut self, query: &str) -> SchemaResult<QueryClass> {
        let session = self.session.as_mut().ok_or(SchemaError::SessionClosed)?;
        let statement = cypher::explain(query);
        let plan = session.plan_type(&statement).map_err(SchemaError::DiscoveryFailed)?;
        log::debug!("Query plan type '{}' for: {}", plan, query);

        if plan.is_read_only() {
            Ok(QueryClass::ReadOnly)
        } else {
            Ok(QueryClass::Mutating)
        }
    }

    /// Fail unless the query is read-only
    pub fn validate_read_query(&mut self, query: &str) -> SchemaResult<()> {
        match self.classify_query(query)? {
            QueryClass::ReadOnly => Ok(()),
            QueryClass::Mutating => Err(SchemaError::QueryNotReadOnly(query.to_string())),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.session.is_none()
    }

    /// Release the session. Further calls are no-ops.
    pub fn close(&mut self) {
        if let Some(mut session) = self.session.take() {
            log::debug!("Closing schema service session");
            session.close();
        }
    }
}

impl<S: GraphSession> Drop for SchemaService<S> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cypher::Statement;
    use crate::session::{PlanType, SessionError};
    use crate::value::Record;

    #[derive(Default)]
    struct PlanSession {
        plan: Option<PlanType>,
        runs: usize,
    }

    impl GraphSession for PlanSession {
        fn run(&mut self, _statement: &Statement) -> Result<Vec<Record>, SessionError> {
            self.runs += 1;
            Ok(Vec::new())
        }

        fn plan_type(&mut self, statement: &Statement) -> Result<PlanType, SessionError> {
            assert!(statement.text.starts_with("EXPLAIN "));
            self.plan.ok_or_else(|| SessionError::new("no plan"))
        }
    }

    fn service(plan: Option<PlanType>) -> SchemaService<PlanSession> {
        let session = PlanSession { plan, runs: 0 };
        SchemaService::new(session, SchemaOptions::for_labels(":Person")).unwrap()
    }

    #[test]
    fn test_classify_query() {
        let cases = [
            (PlanType::ReadOnly, QueryClass::ReadOnly),
            (PlanType::SchemaWrite, QueryClass::ReadOnly),
            (PlanType::ReadWrite, QueryClass::Mutating),
            (PlanType::WriteOnly, QueryClass::Mutating),
        ];
        for (plan, expected) in cases {
            let mut svc = service(Some(plan));
            assert_eq!(svc.classify_query("MATCH (n) RETURN n").unwrap(), expected);
            assert_eq!(svc.session.as_ref().map(|s| s.runs), Some(0));
        }
    }

    #[test]
    fn test_classify_failure_propagates() {
        let mut svc = service(None);
        let err = svc.classify_query("MATCH (n) RETURN n").unwrap_err();
        assert!(matches!(err, SchemaError::DiscoveryFailed(_)));
    }

    #[test]
    fn test_validate_read_query() {
        let mut svc = service(Some(PlanType::ReadWrite));
        let err = svc.validate_read_query("CREATE (n:Person)").unwrap_err();
        assert!(matches!(err, SchemaError::QueryNotReadOnly(_)));

        let mut svc = service(Some(PlanType::ReadOnly));
        assert!(svc.validate_read_query("MATCH (n) RETURN n").is_ok());
    }

    #[test]
    fn test_rejects_invalid_options() {
        let options = SchemaOptions::for_labels(":Person").with_flatten_limit(0);
        assert!(SchemaService::new(PlanSession::default(), options).is_err());
    }
}
