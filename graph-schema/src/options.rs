// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema inference options
//!
//! Options arrive either as a flat string map shared with the connection
//! options (`labels`, `schema.flatten.limit`, ...) or as a JSON document.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cypher::LabelSelector;
use crate::error::{SchemaError, SchemaResult};

/// Default number of records sampled by fallback discovery
pub const DEFAULT_FLATTEN_LIMIT: usize = 10;

pub const LABELS_KEY: &str = "labels";
pub const RELATIONSHIP_KEY: &str = "relationship";
pub const QUERY_KEY: &str = "query";
pub const FLATTEN_LIMIT_KEY: &str = "schema.flatten.limit";
pub const STRATEGY_KEY: &str = "schema.strategy";
pub const UNSUPPORTED_ERROR_KEY: &str = "schema.unsupported.error";

/// How discovered property types become field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaStrategy {
    /// Use the discovered type of each property
    #[default]
    Sample,
    /// Type every discovered property as `String`
    String,
}

impl std::str::FromStr for SchemaStrategy {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sample" => Ok(SchemaStrategy::Sample),
            "string" => Ok(SchemaStrategy::String),
            _ => Err(SchemaError::InvalidOptions(format!(
                "Unknown schema strategy: {}. Valid options: sample, string",
                s
            ))),
        }
    }
}

/// What kind of read the schema describes
#[derive(Debug, Clone, PartialEq)]
pub enum QueryKind {
    Labels(LabelSelector),
    Relationship(String),
    Query(String),
}

/// Options controlling schema inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOptions {
    /// Label expression such as `:Person:Customer`
    pub labels: Option<String>,
    /// Relationship type
    pub relationship: Option<String>,
    /// Free-form Cypher query
    pub query: Option<String>,
    /// Maximum records sampled when the metadata procedure is missing
    pub schema_flatten_limit: usize,
    pub schema_strategy: SchemaStrategy,
    /// Fail instead of returning an empty schema for relationship and
    /// query reads
    pub unsupported_kind_is_error: bool,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            labels: None,
            relationship: None,
            query: None,
            schema_flatten_limit: DEFAULT_FLATTEN_LIMIT,
            schema_strategy: SchemaStrategy::Sample,
            unsupported_kind_is_error: false,
        }
    }
}

impl SchemaOptions {
    /// Options for a node read over the given label expression
    pub fn for_labels(labels: impl Into<String>) -> Self {
        Self {
            labels: Some(labels.into()),
            ..Default::default()
        }
    }

    pub fn with_flatten_limit(mut self, limit: usize) -> Self {
        self.schema_flatten_limit = limit;
        self
    }

    pub fn with_strategy(mut self, strategy: SchemaStrategy) -> Self {
        self.schema_strategy = strategy;
        self
    }

    /// Parse from a flat option map. Unknown keys are ignored.
    pub fn from_map(map: &HashMap<String, String>) -> SchemaResult<Self> {
        let mut options = Self::default();
        let non_empty = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        options.labels = non_empty(LABELS_KEY);
        options.relationship = non_empty(RELATIONSHIP_KEY);
        options.query = non_empty(QUERY_KEY);

        if let Some(limit) = non_empty(FLATTEN_LIMIT_KEY) {
            options.schema_flatten_limit = limit.parse().map_err(|_| {
                SchemaError::InvalidOptions(format!(
                    "{} must be a positive integer, got '{}'",
                    FLATTEN_LIMIT_KEY, limit
                ))
            })?;
        }
        if let Some(strategy) = non_empty(STRATEGY_KEY) {
            options.schema_strategy = strategy.parse()?;
        }
        if let Some(flag) = non_empty(UNSUPPORTED_ERROR_KEY) {
            options.unsupported_kind_is_error = flag.parse().map_err(|_| {
                SchemaError::InvalidOptions(format!(
                    "{} must be true or false, got '{}'",
                    UNSUPPORTED_ERROR_KEY, flag
                ))
            })?;
        }

        options.validate()?;
        Ok(options)
    }

    /// Load from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let options: SchemaOptions = serde_json::from_str(&content)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> SchemaResult<()> {
        if self.schema_flatten_limit == 0 {
            return Err(SchemaError::InvalidOptions(format!(
                "{} must be greater than zero",
                FLATTEN_LIMIT_KEY
            )));
        }
        self.query_kind().map(|_| ())
    }

    /// Exactly one of labels, relationship or query must be set
    pub fn query_kind(&self) -> SchemaResult<QueryKind> {
        match (&self.labels, &self.relationship, &self.query) {
            (Some(labels), None, None) => Ok(QueryKind::Labels(LabelSelector::parse(labels)?)),
            (None, Some(rel), None) => Ok(QueryKind::Relationship(rel.clone())),
            (None, None, Some(query)) => Ok(QueryKind::Query(query.clone())),
            (None, None, None) => Err(SchemaError::InvalidOptions(format!(
                "One of {}, {} or {} is required",
                LABELS_KEY, RELATIONSHIP_KEY, QUERY_KEY
            ))),
            _ => Err(SchemaError::InvalidOptions(format!(
                "Only one of {}, {} or {} may be set",
                LABELS_KEY, RELATIONSHIP_KEY, QUERY_KEY
            ))),
        }
    }
}
