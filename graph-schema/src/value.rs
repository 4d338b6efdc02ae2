// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Runtime graph values returned by a session
//!
//! These mirror the values a Bolt driver hands back: scalars, temporal and
//! spatial values, containers, and nodes. Sampling discovery only
//! needs each value's runtime type name.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;

/// A single property or column value
#[derive(Debug, Clone, PartialEq)]
pub enum GraphValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<GraphValue>),
    Map(BTreeMap<String, GraphValue>),
    Node(Node),
    Point2D { srid: i32, x: f64, y: f64 },
    Point3D { srid: i32, x: f64, y: f64, z: f64 },
    Date(NaiveDate),
    /// Time of day with a UTC offset
    Time(NaiveTime, FixedOffset),
    LocalTime(NaiveTime),
    DateTime(DateTime<FixedOffset>),
    ZonedDateTime(DateTime<Tz>),
    LocalDateTime(NaiveDateTime),
    Duration {
        months: i64,
        days: i64,
        seconds: i64,
        nanoseconds: i32,
    },
}

impl GraphValue {
    /// Runtime type name, in the vocabulary understood by `map_type`
    pub fn type_name(&self) -> &'static str {
        match self {
            GraphValue::Null => "Null",
            GraphValue::Boolean(_) => "Boolean",
            GraphValue::Integer(_) => "Long",
            GraphValue::Float(_) => "Double",
            GraphValue::String(_) => "String",
            GraphValue::Bytes(_) => "ByteArray",
            GraphValue::List(_) => "List",
            GraphValue::Map(_) => "Map",
            GraphValue::Node(_) => "InternalNode",
            GraphValue::Point2D { .. } => "InternalPoint2D",
            GraphValue::Point3D { .. } => "InternalPoint3D",
            GraphValue::Date(_) => "LocalDate",
            GraphValue::Time(..) => "OffsetTime",
            GraphValue::LocalTime(_) => "LocalTime",
            GraphValue::DateTime(_) => "DateTime",
            GraphValue::ZonedDateTime(_) => "ZonedDateTime",
            GraphValue::LocalDateTime(_) => "LocalDateTime",
            GraphValue::Duration { .. } => "InternalIsoDuration",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GraphValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[GraphValue]> {
        match self {
            GraphValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            GraphValue::Node(node) => Some(node),
            _ => None,
        }
    }
}

impl From<bool> for GraphValue {
    fn from(v: bool) -> Self {
        GraphValue::Boolean(v)
    }
}

impl From<i64> for GraphValue {
    fn from(v: i64) -> Self {
        GraphValue::Integer(v)
    }
}

impl From<f64> for GraphValue {
    fn from(v: f64) -> Self {
        GraphValue::Float(v)
    }
}

impl From<&str> for GraphValue {
    fn from(v: &str) -> Self {
        GraphValue::String(v.to_string())
    }
}

impl From<String> for GraphValue {
    fn from(v: String) -> Self {
        GraphValue::String(v)
    }
}

impl<T: Into<GraphValue>> From<Vec<T>> for GraphValue {
    fn from(v: Vec<T>) -> Self {
        GraphValue::List(v.into_iter().map(Into::into).collect())
    }
}

/// A node with its labels and property map
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: BTreeMap<String, GraphValue>,
}

impl Node {
    pub fn new(id: i64, labels: Vec<String>) -> Self {
        Self {
            id,
            labels,
            properties: BTreeMap::new(),
        }
    }

    /// Builder-style property setter
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<GraphValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }
}

/// One result row, keyed by column name in result order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    columns: Vec<(String, GraphValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column setter
    pub fn with(mut self, column: impl Into<String>, value: impl Into<GraphValue>) -> Self {
        self.columns.push((column.into(), value.into()));
        self
    }

    pub fn get(&self, column: &str) -> Option<&GraphValue> {
        self.columns.iter().find(|(name, _)| name == column).map(|(_, v)| v)
    }
}

impl From<Node> for GraphValue {
    fn from(node: Node) -> Self {
        GraphValue::Node(node)
    }
}
