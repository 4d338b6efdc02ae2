// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Cypher statement construction
//!
//! Builds the handful of statements schema inference issues:
//! - bounded node sampling (`MATCH (n:A:B) RETURN n LIMIT $limit`)
//! - the metadata procedure call (`apoc.meta.nodeTypeProperties`)
//! - `EXPLAIN` wrapping for plan classification
//!
//! User supplied labels are always backtick quoted; numeric bounds are
//! always passed as parameters.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value as JsonValue};

use crate::error::{SchemaError, SchemaResult};

/// Variable bound to sampled nodes
pub const NODE_VARIABLE: &str = "n";

/// Parameter carrying the sampling bound
pub const LIMIT_PARAM: &str = "limit";

/// Parameter carrying the metadata procedure configuration
pub const CONFIG_PARAM: &str = "config";

static LABEL_EXPRESSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\s*:\s*(?:`(?:[^`]|``)+`|[^:`\s]+))*\s*$").unwrap()
});

static LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"`((?:[^`]|``)+)`|([^:`\s]+)").unwrap()
});

/// A statement and its parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub text: String,
    pub parameters: BTreeMap<String, JsonValue>,
}

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&JsonValue> {
        self.parameters.get(name)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Ordered set of node labels, e.g. parsed from `:Person:Customer`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LabelSelector {
    labels: Vec<String>,
}

impl LabelSelector {
    /// Build from already split label names; duplicates are dropped
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selector = Self::default();
        for label in labels {
            selector.push(label.into());
        }
        selector
    }

    /// Parse a label expression. The leading colon is optional and labels
    /// containing `:` or spaces must be backtick quoted.
    pub fn parse(expression: &str) -> SchemaResult<Self> {
        let trimmed = expression.trim();
        let normalized = if trimmed.is_empty() || trimmed.starts_with(':') {
            trimmed.to_string()
        } else {
            format!(":{}", trimmed)
        };

        if !LABEL_EXPRESSION.is_match(&normalized) {
            return Err(SchemaError::InvalidOptions(format!(
                "Invalid label expression: '{}'",
                expression
            )));
        }

        let mut selector = Self::default();
        for caps in LABEL.captures_iter(&normalized) {
            let label = match (caps.get(1), caps.get(2)) {
                (Some(quoted), _) => quoted.as_str().replace("``", "`"),
                (None, Some(plain)) => plain.as_str().to_string(),
                (None, None) => continue,
            };
            selector.push(label);
        }
        Ok(selector)
    }

    fn push(&mut self, label: String) {
        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Pattern suffix such as `:`Person`:`Customer``, empty when no labels
    pub fn to_pattern(&self) -> String {
        self.labels
            .iter()
            .map(|label| format!(":{}", quote_identifier(label)))
            .collect()
    }
}

impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_pattern())
    }
}

/// Backtick quote an identifier, doubling embedded backticks
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Sample at most `limit` nodes matching the selector
pub fn node_sample(selector: &LabelSelector, limit: usize) -> Statement {
    let text = format!(
        "MATCH ({var}{pattern}) RETURN {var} LIMIT ${param}",
        var = NODE_VARIABLE,
        pattern = selector.to_pattern(),
        param = LIMIT_PARAM,
    );
    Statement::new(text).with_parameter(LIMIT_PARAM, json!(limit))
}

/// Property names and types for the selected labels from store statistics.
/// No `sample` setting is passed: APOC treats it as a skip rate, not a cap.
pub fn node_type_properties(selector: &LabelSelector) -> Statement {
    let text = format!(
        "CALL apoc.meta.nodeTypeProperties(${param}) \
         YIELD propertyName, propertyTypes \
         WITH DISTINCT propertyName, propertyTypes \
         RETURN propertyName, propertyTypes",
        param = CONFIG_PARAM,
    );
    let config = json!({ "includeLabels": selector.labels() });
    Statement::new(text).with_parameter(CONFIG_PARAM, config)
}

/// Wrap a query so the store only plans it
pub fn explain(query: &str) -> Statement {
    Statement::new(format!("EXPLAIN {}", query.trim()))
}
