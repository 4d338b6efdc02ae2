// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Field types, fields and schemas
//!
//! This module defines the statically typed descriptors produced by schema
//! inference:
//! - `FieldType` - column type, including the fixed composite shapes used
//!   for points, times and durations
//! - `Field` - named, nullable column
//! - `Schema` - ordered list of fields, always ending with the two system
//!   fields when produced by node schema inference
//!
//! Every type converts into its Arrow counterpart for columnar consumers.

use std::fmt;
use std::sync::Arc;

use arrow_schema::{DataType, Field as ArrowField, Fields, Schema as ArrowSchema, TimeUnit};
use serde::{Deserialize, Serialize};

/// Name of the system field holding the node labels: `<labels>`.
///
/// Emitted as a nullable `ArrayOf(String)` column after all discovered
/// properties. The angle brackets keep it distinct from a node property
/// named `labels`.
pub const LABELS_FIELD: &str = "<labels>";

/// Name of the system field holding the internal node id: `<id>`.
///
/// Emitted as a non-nullable `Int64` column, always the last column of a
/// node schema. The angle brackets keep it distinct from a node property
/// named `id` or `internal_id`.
pub const ID_FIELD: &str = "<id>";

/// Column type of a discovered property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldType {
    Boolean,
    String,
    Int32,
    Int64,
    Float64,
    /// Struct `type, srid, x, y, z`
    Point,
    Timestamp,
    /// Struct `type, value`
    Time,
    Date,
    /// Struct `type, months, days, seconds, nanoseconds, value`
    Duration,
    ArrayOf(Box<FieldType>),
    Struct(Vec<Field>),
}

impl FieldType {
    /// Array of the given element type
    pub fn array_of(element: FieldType) -> Self {
        FieldType::ArrayOf(Box::new(element))
    }

    /// Ordered member fields for struct-encoded types, `None` for the rest
    pub fn struct_fields(&self) -> Option<Vec<Field>> {
        match self {
            FieldType::Point => Some(vec![
                Field::required("type", FieldType::String),
                Field::required("srid", FieldType::Int32),
                Field::required("x", FieldType::Float64),
                Field::required("y", FieldType::Float64),
                Field::nullable("z", FieldType::Float64),
            ]),
            FieldType::Time => Some(vec![
                Field::required("type", FieldType::String),
                Field::required("value", FieldType::String),
            ]),
            FieldType::Duration => Some(vec![
                Field::required("type", FieldType::String),
                Field::required("months", FieldType::Int64),
                Field::required("days", FieldType::Int64),
                Field::required("seconds", FieldType::Int64),
                Field::required("nanoseconds", FieldType::Int32),
                Field::required("value", FieldType::String),
            ]),
            FieldType::Struct(fields) => Some(fields.clone()),
            _ => None,
        }
    }

    pub fn is_struct(&self) -> bool {
        self.struct_fields().is_some()
    }

    /// Arrow data type for this field type
    pub fn to_arrow(&self) -> DataType {
        match self {
            FieldType::Boolean => DataType::Boolean,
            FieldType::String => DataType::Utf8,
            FieldType::Int32 => DataType::Int32,
            FieldType::Int64 => DataType::Int64,
            FieldType::Float64 => DataType::Float64,
            FieldType::Timestamp => DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())),
            FieldType::Date => DataType::Date32,
            FieldType::ArrayOf(element) => {
                DataType::List(Arc::new(ArrowField::new("item", element.to_arrow(), true)))
            }
            FieldType::Point | FieldType::Time | FieldType::Duration | FieldType::Struct(_) => {
                let members = self.struct_fields().unwrap_or_default();
                DataType::Struct(Fields::from(
                    members.iter().map(Field::to_arrow).collect::<Vec<_>>(),
                ))
            }
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Boolean => write!(f, "Boolean"),
            FieldType::String => write!(f, "String"),
            FieldType::Int32 => write!(f, "Int32"),
            FieldType::Int64 => write!(f, "Int64"),
            FieldType::Float64 => write!(f, "Float64"),
            FieldType::Point => write!(f, "Point"),
            FieldType::Timestamp => write!(f, "Timestamp"),
            FieldType::Time => write!(f, "Time"),
            FieldType::Date => write!(f, "Date"),
            FieldType::Duration => write!(f, "Duration"),
            FieldType::ArrayOf(element) => write!(f, "ArrayOf({})", element),
            FieldType::Struct(fields) => {
                let members: Vec<String> = fields.iter().map(|fd| fd.to_string()).collect();
                write!(f, "Struct({})", members.join(", "))
            }
        }
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub nullable: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            nullable,
        }
    }

    pub fn nullable(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, field_type, true)
    }

    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self::new(name, field_type, false)
    }

    pub fn to_arrow(&self) -> ArrowField {
        ArrowField::new(self.name.clone(), self.field_type.to_arrow(), self.nullable)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let null = if self.nullable { "" } else { " not null" };
        write!(f, "{}:{}{}", self.name, self.field_type, null)
    }
}

/// Ordered list of fields describing one query result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Schema with no columns
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a node schema: discovered fields sorted by name, then the
    /// labels field, then the internal id field
    pub fn for_nodes(mut discovered: Vec<Field>) -> Self {
        discovered.sort_by(|a, b| a.name.cmp(&b.name));
        discovered.push(Field::nullable(LABELS_FIELD, FieldType::array_of(FieldType::String)));
        discovered.push(Field::required(ID_FIELD, FieldType::Int64));
        Self { fields: discovered }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    pub fn to_arrow(&self) -> ArrowSchema {
        ArrowSchema::new(self.fields.iter().map(Field::to_arrow).collect::<Vec<_>>())
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<String> = self.fields.iter().map(|fd| fd.to_string()).collect();
        write!(f, "[{}]", fields.join(", "))
    }
}

impl IntoIterator for Schema {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
