// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Shared fixtures for schema service integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use graph_schema::cypher::{Statement, LIMIT_PARAM};
use graph_schema::discovery::metadata::{PROPERTY_NAME_COLUMN, PROPERTY_TYPES_COLUMN};
use graph_schema::session::PROCEDURE_NOT_FOUND;
use graph_schema::{GraphSession, Node, PlanType, Record, SessionError};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// What the mock saw, shared with the test after the service takes the session
#[derive(Debug, Default)]
pub struct SessionLog {
    pub statements: Vec<Statement>,
    pub explained: Vec<Statement>,
    pub closed: usize,
}

impl SessionLog {
    pub fn texts(&self) -> Vec<String> {
        self.statements.iter().map(|s| s.text.clone()).collect()
    }
}

/// Scripted session answering metadata calls, node samples and `EXPLAIN`
pub struct MockSession {
    metadata: Result<Vec<Record>, SessionError>,
    nodes: Vec<Node>,
    sample_error: Option<SessionError>,
    plan: PlanType,
    log: Rc<RefCell<SessionLog>>,
}

impl MockSession {
    pub fn new() -> (Self, Rc<RefCell<SessionLog>>) {
        let log = Rc::new(RefCell::new(SessionLog::default()));
        let session = Self {
            metadata: Ok(Vec::new()),
            nodes: Vec::new(),
            sample_error: None,
            plan: PlanType::ReadOnly,
            log: log.clone(),
        };
        (session, log)
    }

    /// Metadata procedure reports these `(name, types)` rows
    pub fn with_metadata(mut self, rows: Vec<(&str, Vec<&str>)>) -> Self {
        self.metadata = Ok(rows
            .into_iter()
            .map(|(name, types)| {
                Record::new()
                    .with(PROPERTY_NAME_COLUMN, name)
                    .with(PROPERTY_TYPES_COLUMN, types)
            })
            .collect());
        self
    }

    /// Metadata procedure is not installed
    pub fn without_procedure(mut self) -> Self {
        self.metadata = Err(SessionError::with_code(
            PROCEDURE_NOT_FOUND,
            "There is no procedure with the name `apoc.meta.nodeTypeProperties` registered",
        ));
        self
    }

    pub fn with_metadata_error(mut self, error: SessionError) -> Self {
        self.metadata = Err(error);
        self
    }

    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_sample_error(mut self, error: SessionError) -> Self {
        self.sample_error = Some(error);
        self
    }

    pub fn with_plan(mut self, plan: PlanType) -> Self {
        self.plan = plan;
        self
    }
}

impl GraphSession for MockSession {
    fn run(&mut self, statement: &Statement) -> Result<Vec<Record>, SessionError> {
        self.log.borrow_mut().statements.push(statement.clone());

        if statement.text.contains("apoc.meta.nodeTypeProperties") {
            return self.metadata.clone();
        }
        if let Some(err) = &self.sample_error {
            return Err(err.clone());
        }

        let limit = statement
            .parameter(LIMIT_PARAM)
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .unwrap_or(usize::MAX);
        Ok(self
            .nodes
            .iter()
            .take(limit)
            .map(|node| Record::new().with("n", node.clone()))
            .collect())
    }

    fn plan_type(&mut self, statement: &Statement) -> Result<PlanType, SessionError> {
        self.log.borrow_mut().explained.push(statement.clone());
        Ok(self.plan)
    }

    fn close(&mut self) {
        self.log.borrow_mut().closed += 1;
    }
}

pub fn person(id: i64) -> Node {
    Node::new(id, vec!["Person".to_string()])
}
