// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Fallback discovery by sampling matching nodes
//!
//! Properties are typed from the first value encountered across the sampled
//! records. Values seen later are not reconciled with it, so a property
//! holding different types on different nodes takes whichever type was read
//! first, and properties missing from every sampled node are not reported.

use std::collections::BTreeMap;

use crate::cypher::{self, LabelSelector, NODE_VARIABLE};
use crate::error::{SchemaError, SchemaResult};
use crate::options::SchemaStrategy;
use crate::session::GraphSession;
use crate::type_mapping::{map_type_with, ARRAY_SUFFIX};
use crate::types::FieldType;
use crate::value::GraphValue;

/// Discovers property types from at most `limit` sampled nodes
#[derive(Debug, Clone)]
pub struct SamplingDiscovery {
    limit: usize,
    strategy: SchemaStrategy,
}

impl SamplingDiscovery {
    pub fn new(limit: usize, strategy: SchemaStrategy) -> Self {
        Self { limit, strategy }
    }

    pub fn discover<S>(
        &self,
        session: &mut S,
        selector: &LabelSelector,
    ) -> SchemaResult<BTreeMap<String, FieldType>>
    where
        S: GraphSession + ?Sized,
    {
        let statement = cypher::node_sample(selector, self.limit);
        log::debug!("Running sampling discovery: {}", statement);

        // A procedure-coded failure here is not the metadata fallback signal
        let records = session.run(&statement).map_err(SchemaError::DiscoveryFailed)?;
        log::debug!("Sampled {} records", records.len());

        let mut fields = BTreeMap::new();
        let nodes = records
            .iter()
            .take(self.limit)
            .filter_map(|record| record.get(NODE_VARIABLE).and_then(GraphValue::as_node));

        for node in nodes {
            for (name, value) in &node.properties {
                if !fields.contains_key(name) {
                    let type_name = sampled_type_name(value);
                    fields.insert(name.clone(), map_type_with(&type_name, self.strategy));
                }
            }
        }

        Ok(fields)
    }
}

/// Type name for a sampled value; lists are named after their first element
pub fn sampled_type_name(value: &GraphValue) -> String {
    match value {
        GraphValue::List(items) => match items.first() {
            Some(first) => format!("{}{}", first.type_name(), ARRAY_SUFFIX),
            None => {
                log::warn!("Empty list sampled, typing it as a list of strings");
                format!("String{}", ARRAY_SUFFIX)
            }
        },
        other => other.type_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampled_type_names() {
        assert_eq!(sampled_type_name(&GraphValue::Integer(1)), "Long");
        assert_eq!(sampled_type_name(&GraphValue::from(vec![1.5, 2.5])), "DoubleArray");
        assert_eq!(sampled_type_name(&GraphValue::List(Vec::new())), "StringArray");
        assert_eq!(
            sampled_type_name(&GraphValue::List(vec![GraphValue::List(Vec::new())])),
            "ListArray"
        );
    }
}
