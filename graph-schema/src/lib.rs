// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema inference for property graph query results
//!
//! This crate discovers the column structure of a Cypher query result and
//! maps every discovered property type onto a statically typed field
//! descriptor that a columnar engine can consume.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  SchemaService                          │
//! │  - infer_schema / infer_node_schema     │
//! │  - classify_query / validate_read_query │
//! └─────────────────────────────────────────┘
//!          │                    │
//!          ▼                    ▼
//! ┌──────────────────┐  ┌──────────────────┐
//! │ MetadataDiscovery│  │ SamplingDiscovery│
//! │ (fast path)      │  │ (fallback)       │
//! └──────────────────┘  └──────────────────┘
//!          │                    │
//!          ▼                    ▼
//! ┌─────────────────────────────────────────┐
//! │  type_mapping::map_type                 │
//! └─────────────────────────────────────────┘
//! ```
//!
//! The database session itself is supplied by the caller through the
//! [`GraphSession`] trait.
//!
//! # Module Organization
//!
//! - [`types`] - Field types, fields and schemas
//! - [`type_mapping`] - Cypher type name to field type table
//! - [`value`] - Runtime graph values returned by a session
//! - [`cypher`] - Statement construction
//! - [`session`] - Session interface consumed by the service
//! - [`discovery`] - Metadata and sampling discoverers
//! - [`options`] - Schema inference options
//! - [`service`] - Schema service orchestration
//! - [`error`] - Error types and handling

pub mod cypher;
pub mod discovery;
pub mod error;
pub mod options;
pub mod service;
pub mod session;
pub mod type_mapping;
pub mod types;
pub mod value;

pub use cypher::{LabelSelector, Statement};
pub use error::{SchemaError, SchemaResult};
pub use options::{QueryKind, SchemaOptions, SchemaStrategy};
pub use service::{QueryClass, SchemaService};
pub use session::{GraphSession, PlanType, SessionError};
pub use type_mapping::map_type;
pub use types::{Field, FieldType, Schema};
pub use value::{GraphValue, Node, Record};
