// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Fast-path discovery through `apoc.meta.nodeTypeProperties`

use crate::cypher::{self, LabelSelector};
use crate::error::SchemaResult;
use crate::session::GraphSession;
use crate::value::GraphValue;

pub const PROPERTY_NAME_COLUMN: &str = "propertyName";
pub const PROPERTY_TYPES_COLUMN: &str = "propertyTypes";

/// Discovers property names and type names from store statistics
#[derive(Debug, Clone, Default)]
pub struct MetadataDiscovery;

impl MetadataDiscovery {
    pub fn new() -> Self {
        Self
    }

    /// Returns `(property name, type name)` pairs in the order the store
    /// reports them. Multi-typed properties keep their first reported type.
    ///
    /// Fails with `ProcedureUnavailable` when the procedure is not
    /// installed; every other store error is `DiscoveryFailed`.
    pub fn discover<S>(
        &self,
        session: &mut S,
        selector: &LabelSelector,
    ) -> SchemaResult<Vec<(String, String)>>
    where
        S: GraphSession + ?Sized,
    {
        let statement = cypher::node_type_properties(selector);
        log::debug!("Running metadata discovery: {}", statement);

        let records = session.run(&statement)?;

        let mut properties = Vec::with_capacity(records.len());
        for record in &records {
            let name = match record.get(PROPERTY_NAME_COLUMN).and_then(GraphValue::as_str) {
                Some(name) => name,
                None => {
                    log::warn!("Skipping metadata row without {}", PROPERTY_NAME_COLUMN);
                    continue;
                }
            };

            let type_name = record
                .get(PROPERTY_TYPES_COLUMN)
                .and_then(GraphValue::as_list)
                .and_then(|types| types.first())
                .and_then(GraphValue::as_str)
                .unwrap_or("String");

            properties.push((name.to_string(), type_name.to_string()));
        }

        log::debug!("Metadata discovery found {} properties", properties.len());
        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cypher::Statement;
    use crate::error::SchemaError;
    use crate::session::{PlanType, SessionError, PROCEDURE_NOT_FOUND};
    use crate::value::Record;

    struct FixedSession {
        result: Result<Vec<Record>, SessionError>,
        statements: Vec<Statement>,
    }

    impl GraphSession for FixedSession {
        fn run(&mut self, statement: &Statement) -> Result<Vec<Record>, SessionError> {
            self.statements.push(statement.clone());
            self.result.clone()
        }

        fn plan_type(&mut self, _statement: &Statement) -> Result<PlanType, SessionError> {
            Ok(PlanType::ReadOnly)
        }
    }

    fn row(name: &str, types: Vec<&str>) -> Record {
        Record::new()
            .with(PROPERTY_NAME_COLUMN, name)
            .with(PROPERTY_TYPES_COLUMN, types)
    }

    #[test]
    fn test_first_type_wins() {
        let mut session = FixedSession {
            result: Ok(vec![row("age", vec!["Long", "String"]), row("name", vec!["String"])]),
            statements: Vec::new(),
        };
        let found = MetadataDiscovery::new()
            .discover(&mut session, &LabelSelector::new(["Person"]))
            .unwrap();

        assert_eq!(
            found,
            vec![
                ("age".to_string(), "Long".to_string()),
                ("name".to_string(), "String".to_string()),
            ]
        );
        assert_eq!(session.statements.len(), 1);
    }

    #[test]
    fn test_malformed_rows() {
        let mut session = FixedSession {
            result: Ok(vec![
                Record::new().with(PROPERTY_TYPES_COLUMN, vec!["Long"]),
                row("tags", vec![]),
            ]),
            statements: Vec::new(),
        };
        let found = MetadataDiscovery::new()
            .discover(&mut session, &LabelSelector::default())
            .unwrap();

        assert_eq!(found, vec![("tags".to_string(), "String".to_string())]);
    }

    #[test]
    fn test_missing_procedure() {
        let mut session = FixedSession {
            result: Err(SessionError::with_code(PROCEDURE_NOT_FOUND, "unknown procedure")),
            statements: Vec::new(),
        };
        let err = MetadataDiscovery::new()
            .discover(&mut session, &LabelSelector::new(["Person"]))
            .unwrap_err();
        assert!(matches!(err, SchemaError::ProcedureUnavailable(_)));
    }

    #[test]
    fn test_other_failures() {
        let mut session = FixedSession {
            result: Err(SessionError::new("connection refused")),
            statements: Vec::new(),
        };
        let err = MetadataDiscovery::new()
            .discover(&mut session, &LabelSelector::new(["Person"]))
            .unwrap_err();
        assert!(matches!(err, SchemaError::DiscoveryFailed(_)));
    }
}
